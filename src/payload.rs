//! This module generates the candidate payload sequence from one or more
//! wordlists. A single wordlist produces a flat sequence of values; multiple
//! wordlists produce their full cartesian product as ordered tuples, one
//! element per wordlist in declaration order, with the last wordlist varying
//! fastest.

use crate::errors::ConfigError;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// A pre-compiled regex matching the numbered body placeholders.
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"wordlist_(\d+)").unwrap());

/// One concrete substitution value drawn from the wordlist(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A single value from the lone wordlist.
    Single(String),
    /// One value per wordlist, in wordlist declaration order.
    Combination(Vec<String>),
}

impl Payload {
    /// The element substituted into the URL and into single-mode body
    /// templates: the value itself, or the tuple's first element.
    pub fn primary(&self) -> &str {
        match self {
            Payload::Single(word) => word,
            Payload::Combination(words) => &words[0],
        }
    }

    /// A human-readable representation for display and for the saved record.
    pub fn label(&self) -> String {
        match self {
            Payload::Single(word) => word.clone(),
            Payload::Combination(words) => words.join(":"),
        }
    }
}

/// Turns the loaded wordlists into the payload sequence.
///
/// Exactly one wordlist yields `Single` payloads in file order. More than
/// one yields the cartesian product as `Combination` tuples of length N,
/// enumerated with the last wordlist varying fastest.
pub fn generate(wordlists: Vec<Vec<String>>) -> Vec<Payload> {
    if wordlists.len() == 1 {
        let mut lists = wordlists;
        return lists.remove(0).into_iter().map(Payload::Single).collect();
    }

    wordlists
        .iter()
        .map(|list| list.iter())
        .multi_cartesian_product()
        .map(|combo| Payload::Combination(combo.into_iter().cloned().collect()))
        .collect()
}

/// Validates a body template against the number of wordlists supplied in
/// combination mode. Checked once before any probing starts.
///
/// The distinct numbered placeholders referenced by the body must be exactly
/// `wordlist_1..wordlist_N`; a count mismatch or an out-of-range index is a
/// configuration error.
pub fn validate_body_template(body: Option<&str>, wordlists: usize) -> Result<(), ConfigError> {
    if wordlists < 2 {
        return Ok(());
    }
    let Some(body) = body else {
        return Ok(());
    };

    let indices: BTreeSet<usize> = PLACEHOLDER_REGEX
        .captures_iter(body)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();

    if let Some(&index) = indices.iter().find(|&&index| index == 0 || index > wordlists) {
        return Err(ConfigError::PlaceholderOutOfRange {
            index,
            expected: wordlists,
        });
    }
    if indices.len() != wordlists {
        return Err(ConfigError::PlaceholderMismatch {
            found: indices.len(),
            expected: wordlists,
        });
    }
    Ok(())
}
