//! This module handles output formatting: colorized live-feed lines for the
//! terminal and serialization of the final result collection to JSON.

use crate::engine::{DiscoveryMethod, Outcome};
use crate::errors::ProbeError;
use crate::filters::StatusTier;
use colored::Colorize;
use std::fs::write;

/// Formats one outcome as a colorized live-feed line.
///
/// HTTP outcomes render as `[status] url -> preview`, colored by tier.
/// DNS outcomes render as `[DNS] domain -> ip, ip`.
pub fn format_outcome(outcome: &Outcome, tier: StatusTier) -> String {
    if outcome.method == Some(DiscoveryMethod::Dns) {
        let line = format!("[DNS] {} -> {}", outcome.url, outcome.ips.join(", "));
        return line.green().to_string();
    }

    let status = outcome.status.unwrap_or_default();
    let preview = outcome
        .response
        .as_ref()
        .map(preview_text)
        .unwrap_or_default();
    let mut line = format!("[{status}] {}", outcome.url);
    if outcome.payload != outcome.url && !outcome.url.contains(&outcome.payload) {
        line.push_str(&format!(" ({})", outcome.payload));
    }
    line.push_str(&format!(" -> {preview}"));

    match tier {
        StatusTier::Success => line.green().to_string(),
        StatusTier::Redirect => line.yellow().to_string(),
        StatusTier::Forbidden => line.red().to_string(),
        StatusTier::ServerError => line.magenta().to_string(),
        StatusTier::Neutral => line.white().to_string(),
    }
}

/// Formats a recoverable per-probe failure.
pub fn format_error(label: &str, err: &ProbeError) -> String {
    format!("[!] Error on '{label}': {err}").cyan().to_string()
}

fn preview_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Serializes the aggregated outcomes as a pretty-printed JSON array.
pub fn save_results(outcomes: &[Outcome], output_file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = serde_json::to_string_pretty(outcomes)?;
    write(output_file, json_output)?;
    Ok(())
}
