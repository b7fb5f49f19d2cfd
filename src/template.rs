//! This module renders concrete requests from the immutable target template.
//! Rendering is pure: it substitutes the payload into the URL and/or body
//! and performs no I/O.

use crate::payload::Payload;
use reqwest::Method;
use std::collections::HashMap;

/// The placeholder token recognized in URL and body templates.
pub const FUZZ: &str = "FUZZ";

/// The URL/body/header skeleton, built once from configuration and shared
/// read-only by every worker.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

/// The concrete URL and body for one probe. Method and headers come from
/// the template unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRequest {
    pub url: String,
    pub body: Option<String>,
}

impl RequestTemplate {
    /// Substitutes a payload into the template.
    ///
    /// Resolution order:
    /// 1. `FUZZ` in the URL: replaced with the payload's primary element;
    ///    a body containing `FUZZ` is independently substituted with the
    ///    same value.
    /// 2. Otherwise, if a body template is present, the URL is used as-is:
    ///    single mode substitutes the lone `FUZZ` token, combination mode
    ///    substitutes every `wordlist_i` with the i-th tuple element.
    /// 3. Otherwise the primary element is appended as a trailing path
    ///    segment, with the template's trailing slash stripped first.
    pub fn render(&self, payload: &Payload) -> RenderedRequest {
        if self.url.contains(FUZZ) {
            let url = self.url.replace(FUZZ, payload.primary());
            let body = self
                .body
                .as_ref()
                .map(|body| body.replace(FUZZ, payload.primary()));
            return RenderedRequest { url, body };
        }

        if let Some(body) = &self.body {
            let rendered = match payload {
                Payload::Single(word) => body.replace(FUZZ, word),
                Payload::Combination(words) => {
                    let mut out = body.clone();
                    for (i, word) in words.iter().enumerate() {
                        out = out.replace(&format!("wordlist_{}", i + 1), word);
                    }
                    out
                }
            };
            return RenderedRequest {
                url: self.url.clone(),
                body: Some(rendered),
            };
        }

        RenderedRequest {
            url: format!("{}/{}", self.url.trim_end_matches('/'), payload.primary()),
            body: None,
        }
    }
}
