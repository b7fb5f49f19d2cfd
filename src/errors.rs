//! Error taxonomy for the engine.
//!
//! Configuration problems are fatal and reported before any probing starts.
//! Probe failures are recoverable at single-item granularity: the worker
//! reports them and moves on, they never abort the pool.

use thiserror::Error;

/// A fatal problem with the supplied configuration, detected before the
/// worker pool starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The body template references a different set of numbered placeholders
    /// than the wordlists supplied in combination mode.
    #[error(
        "body template references {found} distinct numbered placeholder(s) \
         but {expected} wordlists were supplied"
    )]
    PlaceholderMismatch { found: usize, expected: usize },

    /// A numbered placeholder points past the last supplied wordlist.
    #[error("body template references wordlist_{index} but only {expected} wordlists were supplied")]
    PlaceholderOutOfRange { index: usize, expected: usize },

    /// A status filter entry could not be parsed.
    #[error("invalid status filter entry '{0}'")]
    InvalidStatusFilter(String),

    /// A size filter entry could not be parsed.
    #[error("invalid size filter entry '{0}'")]
    InvalidSizeFilter(String),
}

/// The failure of a single probe attempt. One failed probe is terminal for
/// that payload only; the pool provides no retry.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else if err.is_connect() {
            ProbeError::Connect(err.to_string())
        } else {
            ProbeError::Transport(err.to_string())
        }
    }
}
