//! This module contains the concurrent probing engine shared by both modes.
//! It defines the outcome data structures and shared scan state, and runs a
//! bounded pool of workers draining one shared work queue: each worker
//! renders a probe, issues it, classifies the response, and appends matches
//! to the shared result collection.

use crate::errors::ProbeError;
use crate::filters::{self, FilterSpec, Verdict};
use crate::output;
use crate::payload::Payload;
use crate::resolver::{self, SubdomainProbe};
use crate::template::RequestTemplate;
use futures::future::join_all;
use indicatif::ProgressBar;
use reqwest::Client;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

/// How a subdomain outcome was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiscoveryMethod {
    #[serde(rename = "DNS")]
    Dns,
    #[serde(rename = "HTTP")]
    Http,
}

/// The recorded result of one completed probe attempt. Never mutated after
/// creation; ownership moves to the shared result collection on append.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub payload: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<DiscoveryMethod>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ips: Vec<String>,
}

/// An outcome together with its classification verdict.
#[derive(Debug, Clone)]
pub struct Classified {
    pub outcome: Outcome,
    pub verdict: Verdict,
}

/// Engine settings shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub threads: usize,
    pub delay_ms: u64,
    pub verbose: bool,
    pub silent: bool,
}

/// The mode-specific half of the probe: either a request template to fuzz,
/// or a subdomain resolution task.
pub enum ProbeMode {
    Fuzz(RequestTemplate),
    Subdomains(SubdomainProbe),
}

/// Counters shared across all workers.
#[derive(Debug, Default)]
pub struct ScanState {
    pub found_count: AtomicUsize,
    pub error_count: AtomicUsize,
    pub filtered_count: AtomicUsize,
}

/// Everything a worker needs, built once before the pool starts and
/// read-only for its lifetime (the counters are atomic).
pub struct ProbeContext {
    pub mode: ProbeMode,
    pub config: EngineConfig,
    pub client: Client,
    pub filter: FilterSpec,
    pub state: ScanState,
    pub progress: Option<ProgressBar>,
}

/// Runs the worker pool until the queue is drained and returns the
/// aggregated result collection.
///
/// Collection order reflects completion order, not submission order, and is
/// therefore non-deterministic across runs.
pub async fn run(ctx: Arc<ProbeContext>, items: Vec<Payload>) -> Vec<Outcome> {
    let queue = Arc::new(Mutex::new(VecDeque::from(items)));
    let results: Arc<Mutex<Vec<Outcome>>> = Arc::new(Mutex::new(Vec::new()));

    let workers: Vec<_> = (0..ctx.config.threads.max(1))
        .map(|_| {
            let queue = queue.clone();
            let ctx = ctx.clone();
            let results = results.clone();
            tokio::spawn(async move { worker(queue, ctx, results).await })
        })
        .collect();

    join_all(workers).await;

    let mut collected = results.lock().await;
    collected.drain(..).collect()
}

/// One worker: dequeue, probe, classify, record, sleep, repeat. An observed
/// empty queue ends the worker. A failed probe is reported and the worker
/// moves on; it never aborts the pool.
async fn worker(
    queue: Arc<Mutex<VecDeque<Payload>>>,
    ctx: Arc<ProbeContext>,
    results: Arc<Mutex<Vec<Outcome>>>,
) {
    loop {
        let item = queue.lock().await.pop_front();
        let Some(item) = item else {
            break;
        };

        match &ctx.mode {
            ProbeMode::Fuzz(template) => match fuzz_one(&ctx, template, &item).await {
                Ok(classified) => record(&ctx, &results, classified).await,
                Err(err) => report_error(&ctx, &item.label(), &err),
            },
            ProbeMode::Subdomains(probe) => {
                for classified in resolver::resolve_host(&ctx, probe, item.primary()).await {
                    record(&ctx, &results, classified).await;
                }
            }
        }

        if let Some(pb) = &ctx.progress {
            pb.inc(1);
        }
        if ctx.config.delay_ms > 0 {
            sleep(Duration::from_millis(ctx.config.delay_ms)).await;
        }
    }
}

/// Issues one templated probe and classifies the response.
async fn fuzz_one(
    ctx: &ProbeContext,
    template: &RequestTemplate,
    payload: &Payload,
) -> Result<Classified, ProbeError> {
    let request = template.render(payload);

    let mut builder = ctx.client.request(template.method.clone(), &request.url);
    for (name, value) in &template.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let size = text.len() as u64;

    let verdict = filters::classify(&ctx.filter, status, size, &text, ctx.config.verbose);
    let outcome = Outcome {
        payload: payload.label(),
        url: request.url,
        status: Some(status),
        size: Some(size),
        response: Some(response_preview(&text)),
        method: None,
        ips: Vec::new(),
    };
    Ok(Classified { outcome, verdict })
}

/// Keeps a preview of the response body: the parsed JSON value when the
/// body is JSON, otherwise the first 100 characters of text.
pub(crate) fn response_preview(text: &str) -> serde_json::Value {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => value,
        Err(_) => serde_json::Value::String(text.chars().take(100).collect()),
    }
}

/// Updates counters, prints the live line, and appends kept outcomes to the
/// shared collection.
async fn record(ctx: &ProbeContext, results: &Arc<Mutex<Vec<Outcome>>>, classified: Classified) {
    if !classified.verdict.passed {
        ctx.state.filtered_count.fetch_add(1, Ordering::Relaxed);
    }
    if classified.verdict.display {
        let line = output::format_outcome(&classified.outcome, classified.verdict.tier);
        match &ctx.progress {
            Some(pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
    if classified.verdict.keep {
        ctx.state.found_count.fetch_add(1, Ordering::Relaxed);
        results.lock().await.push(classified.outcome);
    }
}

/// Reports a recoverable per-probe failure.
fn report_error(ctx: &ProbeContext, label: &str, err: &ProbeError) {
    ctx.state.error_count.fetch_add(1, Ordering::Relaxed);
    if ctx.config.silent {
        return;
    }
    let line = output::format_error(label, err);
    match &ctx.progress {
        Some(pb) => pb.suspend(|| println!("{line}")),
        None => println!("{line}"),
    }
}
