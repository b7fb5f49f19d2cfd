//! This module classifies completed responses: it parses the user-supplied
//! filter strings into an immutable `FilterSpec`, applies the filter
//! composition to every response, and assigns the display tier used for
//! colorizing the live feed.

use crate::errors::ConfigError;
use regex::RegexBuilder;

/// One accepted status code or inclusive code range.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusRule {
    Code(u16),
    Range(u16, u16),
}

impl StatusRule {
    fn matches(&self, status: u16) -> bool {
        match self {
            StatusRule::Code(code) => status == *code,
            StatusRule::Range(lo, hi) => (*lo..=*hi).contains(&status),
        }
    }
}

/// One accepted response-size predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeRule {
    Exact(u64),
    Range(u64, u64),
    Over(u64),
    Under(u64),
}

impl SizeRule {
    fn matches(&self, size: u64) -> bool {
        match self {
            SizeRule::Exact(value) => size == *value,
            SizeRule::Range(lo, hi) => (*lo..=*hi).contains(&size),
            SizeRule::Over(bound) => size > *bound,
            SizeRule::Under(bound) => size < *bound,
        }
    }
}

/// A case-insensitive body pattern: a compiled regex, or a plain lowercase
/// substring when the pattern is not valid regex syntax.
#[derive(Debug, Clone)]
pub enum ContentPattern {
    Regex(regex::Regex),
    Literal(String),
}

impl ContentPattern {
    fn new(pattern: &str) -> Self {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => ContentPattern::Regex(regex),
            Err(_) => ContentPattern::Literal(pattern.to_lowercase()),
        }
    }

    fn is_match(&self, body: &str) -> bool {
        match self {
            ContentPattern::Regex(regex) => regex.is_match(body),
            ContentPattern::Literal(needle) => body.to_lowercase().contains(needle),
        }
    }
}

/// The composed accept/reject rule set, parsed once from configuration and
/// applied read-only to every probe outcome.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub status: Option<Vec<StatusRule>>,
    pub size: Option<Vec<SizeRule>>,
    pub include: Option<Vec<ContentPattern>>,
    pub exclude: Option<Vec<ContentPattern>>,
}

impl FilterSpec {
    /// Builds the filter specification from the raw CLI strings.
    pub fn parse(
        status: Option<&str>,
        size: Option<&str>,
        include: Option<&str>,
        exclude: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Ok(FilterSpec {
            status: status.map(parse_status_rules).transpose()?,
            size: size.map(parse_size_rules).transpose()?,
            include: include.map(parse_patterns),
            exclude: exclude.map(parse_patterns),
        })
    }

    /// Applies the filter composition to one completed response.
    ///
    /// Order matters: status, then size, then include (which returns its own
    /// verdict and never falls through to exclude), then exclude.
    pub fn should_display(&self, status: u16, size: u64, body: &str) -> bool {
        if let Some(rules) = &self.status {
            if !rules.iter().any(|rule| rule.matches(status)) {
                return false;
            }
        }
        if let Some(rules) = &self.size {
            if !rules.iter().any(|rule| rule.matches(size)) {
                return false;
            }
        }
        if let Some(patterns) = &self.include {
            return patterns.iter().any(|pattern| pattern.is_match(body));
        }
        if let Some(patterns) = &self.exclude {
            if patterns.iter().any(|pattern| pattern.is_match(body)) {
                return false;
            }
        }
        true
    }
}

fn parse_status_rules(spec: &str) -> Result<Vec<StatusRule>, ConfigError> {
    let mut rules = Vec::new();
    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let rule = if let Some((lo, hi)) = entry.split_once('-') {
            let lo = lo.trim().parse();
            let hi = hi.trim().parse();
            match (lo, hi) {
                (Ok(lo), Ok(hi)) => StatusRule::Range(lo, hi),
                _ => return Err(ConfigError::InvalidStatusFilter(entry.to_string())),
            }
        } else {
            entry
                .parse()
                .map(StatusRule::Code)
                .map_err(|_| ConfigError::InvalidStatusFilter(entry.to_string()))?
        };
        rules.push(rule);
    }
    Ok(rules)
}

fn parse_size_rules(spec: &str) -> Result<Vec<SizeRule>, ConfigError> {
    let mut rules = Vec::new();
    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let rule = if let Some(bound) = entry.strip_prefix('>') {
            bound
                .trim()
                .parse()
                .map(SizeRule::Over)
                .map_err(|_| ConfigError::InvalidSizeFilter(entry.to_string()))?
        } else if let Some(bound) = entry.strip_prefix('<') {
            bound
                .trim()
                .parse()
                .map(SizeRule::Under)
                .map_err(|_| ConfigError::InvalidSizeFilter(entry.to_string()))?
        } else if let Some((lo, hi)) = entry.split_once('-') {
            match (lo.trim().parse(), hi.trim().parse()) {
                (Ok(lo), Ok(hi)) => SizeRule::Range(lo, hi),
                _ => return Err(ConfigError::InvalidSizeFilter(entry.to_string())),
            }
        } else {
            entry
                .parse()
                .map(SizeRule::Exact)
                .map_err(|_| ConfigError::InvalidSizeFilter(entry.to_string()))?
        };
        rules.push(rule);
    }
    Ok(rules)
}

fn parse_patterns(spec: &str) -> Vec<ContentPattern> {
    spec.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ContentPattern::new)
        .collect()
}

/// Display salience tier for a status code. Presentation only, not a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTier {
    Success,
    Redirect,
    Forbidden,
    ServerError,
    Neutral,
}

/// Maps a status code to its display tier.
pub fn status_tier(status: u16) -> StatusTier {
    match status {
        200 | 201 | 202 | 204 => StatusTier::Success,
        301 | 302 => StatusTier::Redirect,
        403 => StatusTier::Forbidden,
        500.. => StatusTier::ServerError,
        _ => StatusTier::Neutral,
    }
}

/// The classification of one completed response: whether it passed the
/// configured filters, whether it goes to the live feed, and whether it is
/// retained in the result collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    pub display: bool,
    pub keep: bool,
    pub tier: StatusTier,
}

/// Classifies a completed response.
///
/// A 404 is never kept in the result collection; the verbose flag only
/// controls whether it appears in the live feed.
pub fn classify(filter: &FilterSpec, status: u16, size: u64, body: &str, verbose: bool) -> Verdict {
    let passed = filter.should_display(status, size, body);
    let display = passed && (status != 404 || verbose);
    let keep = passed && status != 404;
    Verdict {
        passed,
        display,
        keep,
        tier: status_tier(status),
    }
}
