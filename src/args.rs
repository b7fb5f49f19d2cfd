//! This module defines the command-line arguments for the application.
//! It uses the `clap` crate to parse and validate user input.
//! Target selection (URL fuzzing vs. subdomain enumeration) is mutually
//! exclusive and enforced here, before the engine ever starts.

use clap::{ArgGroup, Parser};

/// A fast, concurrent endpoint fuzzer and subdomain enumerator.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["url", "domain"])))]
pub struct Args {
    /// Target URL to fuzz. The token FUZZ marks the substitution point;
    /// without it the payload is appended as a path segment.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Base domain for subdomain enumeration mode (e.g. example.com).
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Path to a wordlist file. Repeat the flag for multi-wordlist
    /// combination mode; omit it in URL mode to read from stdin.
    #[arg(short, long)]
    pub wordlist: Vec<String>,

    /// HTTP method to use for each probe.
    #[arg(short = 'X', long, default_value = "GET",
          value_parser = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"])]
    pub method: String,

    /// Custom headers, comma separated (e.g. 'Authorization: Bearer TOKEN, X-Api-Key: k').
    #[arg(short = 'H', long)]
    pub headers: Option<String>,

    /// Request body template. Supports FUZZ in single-wordlist mode and
    /// wordlist_1..wordlist_N placeholders in combination mode.
    #[arg(long)]
    pub data: Option<String>,

    /// Number of concurrent workers.
    #[arg(short, long, default_value_t = 10)]
    pub threads: usize,

    /// Fixed delay between requests per worker, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub delay: u64,

    /// Timeout in seconds for each probe.
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Also show 404 responses in the live feed (they are never saved).
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress per-probe error lines.
    #[arg(long)]
    pub silent: bool,

    /// Hide the progress bar during the scan.
    #[arg(long)]
    pub no_progress: bool,

    /// Save the collected results to a JSON file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Accept only these status codes (e.g. "200,301-302").
    #[arg(long)]
    pub match_status: Option<String>,

    /// Accept only these response sizes (e.g. "1234", "100-200", ">100", "<50").
    #[arg(long)]
    pub match_size: Option<String>,

    /// Keep only responses whose body matches any of these comma-separated
    /// case-insensitive patterns.
    #[arg(long)]
    pub include: Option<String>,

    /// Drop responses whose body matches any of these comma-separated
    /// case-insensitive patterns.
    #[arg(long)]
    pub exclude: Option<String>,

    /// Extra subdomain candidates, comma separated (subdomain mode).
    #[arg(long)]
    pub subdomains: Option<String>,

    /// Skip the DNS resolution phase in subdomain mode.
    #[arg(long)]
    pub no_dns: bool,

    /// Probe only http:// in subdomain mode.
    #[arg(long)]
    pub http_only: bool,

    /// Probe only https:// in subdomain mode (wins over --http-only).
    #[arg(long)]
    pub https_only: bool,
}
