//! This module implements subdomain enumeration: building the candidate set
//! and, per candidate, a DNS resolution phase followed by a protocol-ordered
//! HTTP fallback probe. DNS and HTTP are independent phases and may each
//! contribute an outcome for the same candidate.

use crate::engine::{Classified, DiscoveryMethod, Outcome, ProbeContext, response_preview};
use crate::filters::{self, StatusTier, Verdict};
use crate::parser;
use colored::Colorize;
use std::collections::HashSet;
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};

/// Subdomain labels probed when no wordlist is supplied. A supplied wordlist
/// extends this set rather than replacing it.
pub const DEFAULT_SUBDOMAINS: &[&str] = &[
    "www", "mail", "ftp", "webmail", "smtp", "pop", "imap", "ns1", "ns2", "api", "dev", "staging",
    "test", "admin", "portal", "vpn", "blog", "shop", "cdn", "static", "m", "app", "beta", "docs",
    "git", "status", "mx", "remote", "intranet", "dashboard",
];

/// The protocols tried during the HTTP fallback phase, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Https,
    Http,
}

impl Protocol {
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        }
    }
}

/// Resolves the configured protocol restriction into a probe order.
/// `https-only` wins when both restrictions are set.
pub fn protocol_order(http_only: bool, https_only: bool) -> Vec<Protocol> {
    if https_only {
        vec![Protocol::Https]
    } else if http_only {
        vec![Protocol::Http]
    } else {
        vec![Protocol::Https, Protocol::Http]
    }
}

/// The subdomain resolution task shared read-only by every worker.
pub struct SubdomainProbe {
    pub base: String,
    /// None when the DNS phase is disabled via configuration.
    pub resolver: Option<TokioAsyncResolver>,
    pub protocols: Vec<Protocol>,
}

impl SubdomainProbe {
    pub fn new(base: String, skip_dns: bool, protocols: Vec<Protocol>) -> Self {
        let resolver = if skip_dns {
            None
        } else {
            Some(TokioAsyncResolver::tokio(
                ResolverConfig::default(),
                ResolverOpts::default(),
            ))
        };
        SubdomainProbe {
            base,
            resolver,
            protocols,
        }
    }
}

/// Builds the candidate set: built-in defaults, plus an optional external
/// wordlist, plus optional inline comma-separated extras, deduplicated.
///
/// A missing wordlist file is a warning, not fatal; the default list stays
/// in effect.
pub fn candidate_set(wordlist: Option<&str>, extras: Option<&str>) -> HashSet<String> {
    let mut candidates: HashSet<String> =
        DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect();

    if let Some(path) = wordlist {
        match parser::parse_word_list(path) {
            Ok(words) => candidates.extend(words),
            Err(err) => eprintln!(
                "{}",
                format!("[!] Could not read subdomain wordlist '{path}': {err}; using the default list")
                    .yellow()
            ),
        }
    }

    if let Some(extras) = extras {
        candidates.extend(
            extras
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string),
        );
    }

    candidates
}

/// Probes one candidate: DNS phase first (unless skipped), then protocols in
/// order until one yields a response. Returns zero, one, or two outcomes.
///
/// DNS failure and per-protocol network failures are silent; a candidate
/// that answers nothing simply contributes no outcome.
pub async fn resolve_host(
    ctx: &ProbeContext,
    probe: &SubdomainProbe,
    candidate: &str,
) -> Vec<Classified> {
    let domain = format!("{}.{}", candidate, probe.base);
    let mut found = Vec::new();

    if let Some(resolver) = &probe.resolver {
        if let Ok(lookup) = resolver.lookup_ip(domain.as_str()).await {
            let ips: Vec<String> = lookup.iter().map(|ip| ip.to_string()).collect();
            if !ips.is_empty() {
                found.push(Classified {
                    outcome: Outcome {
                        payload: candidate.to_string(),
                        url: domain.clone(),
                        status: None,
                        size: None,
                        response: None,
                        method: Some(DiscoveryMethod::Dns),
                        ips,
                    },
                    verdict: Verdict {
                        passed: true,
                        display: true,
                        keep: true,
                        tier: StatusTier::Neutral,
                    },
                });
            }
        }
    }

    for protocol in &probe.protocols {
        let url = format!("{}://{}", protocol.scheme(), domain);
        let response = match ctx.client.get(&url).send().await {
            Ok(response) => response,
            Err(_) => continue,
        };

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let size = text.len() as u64;
        let verdict = filters::classify(&ctx.filter, status, size, &text, ctx.config.verbose);
        found.push(Classified {
            outcome: Outcome {
                payload: candidate.to_string(),
                url,
                status: Some(status),
                size: Some(size),
                response: Some(response_preview(&text)),
                method: Some(DiscoveryMethod::Http),
                ips: Vec::new(),
            },
            verdict,
        });
        break;
    }

    found
}
