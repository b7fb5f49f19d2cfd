//! This module contains the input parsing functions used throughout the
//! application: wordlist files, stdin wordlists, and custom header strings.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::io::BufRead;

/// Parses a wordlist file into a vector of strings.
///
/// Each line in the file is treated as a separate candidate. Empty and
/// whitespace-only lines are dropped.
pub fn parse_word_list(wl_arg: &str) -> Result<Vec<String>, std::io::Error> {
    let content = read_to_string(wl_arg)?;
    let words: Vec<String> = content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    Ok(words)
}

/// Reads a wordlist from standard input, one candidate per line.
pub fn parse_word_list_stdin() -> Vec<String> {
    std::io::stdin()
        .lock()
        .lines()
        .map_while(Result::ok)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parses a comma-separated header string into a map.
///
/// Each entry is expected to be in "Name: Value" format. Entries without a
/// colon are skipped, not fatal. Later duplicates override earlier ones.
pub fn parse_custom_headers(headers: Option<&str>) -> HashMap<String, String> {
    let mut header_map = HashMap::new();
    let Some(headers) = headers else {
        return header_map;
    };
    for header in headers.split(',') {
        if let Some((key, value)) = header.split_once(':') {
            header_map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    header_map
}
