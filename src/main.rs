//! This is the main entry point for the fuzzhound application.
//! It handles the entire probing process, including:
//! - Parsing command-line arguments.
//! - Reading wordlists from files or standard input.
//! - Building the request template, filter specification, and HTTP client.
//! - Running the probe worker pool concurrently using Tokio.
//! - Displaying live results and a final summary.
//! - Saving the collected results to a JSON file.

use clap::Parser;
use colored::*;
use engine::{EngineConfig, Outcome, ProbeContext, ProbeMode, ScanState};
use filters::FilterSpec;
use indicatif::{ProgressBar, ProgressStyle};
use payload::Payload;
use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::time::Instant;

mod args;
mod engine;
mod errors;
mod filters;
mod output;
mod parser;
mod payload;
mod resolver;
mod template;

const BANNER: &str = r#"
   __                  _                           _
  / _|_   _ ___ ___   | |__   ___  _   _ _ __   __| |
 | |_| | | |_  /_  /  | '_ \ / _ \| | | | '_ \ / _` |
 |  _| |_| |/ / / /   | | | | (_) | |_| | | | | (_| |
 |_|  \__,_/___/___|  |_| |_|\___/ \__,_|_| |_|\__,_|

          Sniffing out endpoints and subdomains
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", BANNER.yellow());
    let args = args::Args::parse();

    let filter = match FilterSpec::parse(
        args.match_status.as_deref(),
        args.match_size.as_deref(),
        args.include.as_deref(),
        args.exclude.as_deref(),
    ) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("{}", format!("[-] Error: {err}").red());
            std::process::exit(1);
        }
    };

    let config = EngineConfig {
        threads: args.threads,
        delay_ms: args.delay,
        verbose: args.verbose,
        silent: args.silent,
    };

    println!(
        "{}",
        format!(
            "[+] Scan started at {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )
        .cyan()
    );

    let start = Instant::now();
    let (outcomes, ctx, total) = match (args.url.clone(), args.domain.clone()) {
        (Some(url), _) => run_endpoint_scan(&args, url, filter, config).await?,
        (None, Some(domain)) => run_subdomain_scan(&args, domain, filter, config).await?,
        (None, None) => {
            // clap's target group guarantees one of the two is present.
            eprintln!("{}", "[-] Error: provide a target URL or domain".red());
            std::process::exit(1);
        }
    };

    if let Some(pb) = &ctx.progress {
        pb.finish_with_message("Scan complete!");
    }

    let elapsed = start.elapsed();
    let final_found = ctx.state.found_count.load(Ordering::Relaxed);
    let final_errors = ctx.state.error_count.load(Ordering::Relaxed);
    let final_filtered = ctx.state.filtered_count.load(Ordering::Relaxed);

    println!(
        "{}",
        format!("\n[+] Probing completed! Found {final_found} interesting results").green()
    );

    if let Some(output_file) = &args.output {
        output::save_results(&outcomes, output_file)?;
        println!("{}", format!("[+] Results saved to: {output_file}").cyan());
    }

    println!("\n{}", "Summary:".bold().underline().blue());
    println!("{:<15}{}", "Total items:".bold(), total.to_string().white());
    println!("{:<15}{}", "Found:".bold(), final_found.to_string().green());
    println!("{:<15}{}", "Errors:".bold(), final_errors.to_string().red());
    println!(
        "{:<15}{}",
        "Filtered:".bold(),
        final_filtered.to_string().yellow()
    );
    println!("{:<15}{:?}", "Elapsed:".bold(), elapsed);
    if !elapsed.is_zero() {
        println!(
            "{:<15}{:.2} req/sec",
            "Rate:".bold(),
            total as f64 / elapsed.as_secs_f64()
        );
    }

    Ok(())
}

/// Endpoint fuzzing mode: wordlist payloads substituted into the URL/body
/// template.
async fn run_endpoint_scan(
    args: &args::Args,
    url: String,
    filter: FilterSpec,
    config: EngineConfig,
) -> Result<(Vec<Outcome>, Arc<ProbeContext>, usize), Box<dyn std::error::Error>> {
    let mut wordlists = Vec::new();
    if args.wordlist.is_empty() {
        if std::io::stdin().is_terminal() {
            eprintln!(
                "{}",
                "[-] Error: either provide a wordlist file with -w or pipe input through stdin"
                    .red()
            );
            std::process::exit(1);
        }
        println!("{}", "[+] Reading wordlist from stdin...".yellow());
        wordlists.push(parser::parse_word_list_stdin());
    } else {
        for path in &args.wordlist {
            match parser::parse_word_list(path) {
                Ok(words) => {
                    println!(
                        "{}",
                        format!("[+] Loaded wordlist: {path} ({} entries)", words.len()).green()
                    );
                    wordlists.push(words);
                }
                Err(err) => {
                    eprintln!(
                        "{}",
                        format!("[-] Error: wordlist file '{path}': {err}").red()
                    );
                    std::process::exit(1);
                }
            }
        }
    }

    if let Err(err) = payload::validate_body_template(args.data.as_deref(), wordlists.len()) {
        eprintln!("{}", format!("[-] Error: {err}").red());
        std::process::exit(1);
    }

    let payloads = payload::generate(wordlists);
    let total = payloads.len();

    let template = template::RequestTemplate {
        method: parse_method(&args.method),
        url: url.clone(),
        headers: parser::parse_custom_headers(args.headers.as_deref()),
        body: args.data.clone(),
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    println!("{}", format!("[+] Target URL: {url}").cyan());
    println!("{}", format!("[+] HTTP Method: {}", args.method).cyan());
    println!("{}", format!("[+] Threads: {}", args.threads).cyan());
    println!("{}", format!("[+] Total payloads: {total}").cyan());
    println!("{}", "[+] Starting fuzzing...\n".cyan());

    let ctx = Arc::new(ProbeContext {
        mode: ProbeMode::Fuzz(template),
        config,
        client,
        filter,
        state: ScanState::default(),
        progress: build_progress(args.no_progress, total),
    });

    let outcomes = engine::run(ctx.clone(), payloads).await;
    Ok((outcomes, ctx, total))
}

/// Subdomain enumeration mode: DNS resolution with an HTTP fallback probe
/// for every candidate label.
async fn run_subdomain_scan(
    args: &args::Args,
    domain: String,
    filter: FilterSpec,
    config: EngineConfig,
) -> Result<(Vec<Outcome>, Arc<ProbeContext>, usize), Box<dyn std::error::Error>> {
    let candidates = resolver::candidate_set(
        args.wordlist.first().map(String::as_str),
        args.subdomains.as_deref(),
    );
    let items: Vec<Payload> = candidates.into_iter().map(Payload::Single).collect();
    let total = items.len();

    let protocols = resolver::protocol_order(args.http_only, args.https_only);
    let probe = resolver::SubdomainProbe::new(domain.clone(), args.no_dns, protocols);

    // Diagnostic probing, not trust verification: accept any certificate.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .danger_accept_invalid_certs(true)
        .build()?;

    println!("{}", format!("[+] Target domain: {domain}").cyan());
    println!("{}", format!("[+] Threads: {}", args.threads).cyan());
    println!("{}", format!("[+] Total candidates: {total}").cyan());
    println!("{}", "[+] Starting subdomain enumeration...\n".cyan());

    let ctx = Arc::new(ProbeContext {
        mode: ProbeMode::Subdomains(probe),
        config,
        client,
        filter,
        state: ScanState::default(),
        progress: build_progress(args.no_progress, total),
    });

    let outcomes = engine::run(ctx.clone(), items).await;
    Ok((outcomes, ctx, total))
}

/// clap restricts the method to the supported verb set, so the fallback is
/// never taken in practice.
fn parse_method(method: &str) -> reqwest::Method {
    reqwest::Method::from_bytes(method.as_bytes()).unwrap_or(reqwest::Method::GET)
}

/// Sets up the progress bar unless it was disabled.
fn build_progress(no_progress: bool, total: usize) -> Option<ProgressBar> {
    if no_progress {
        return None;
    }
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Probing...");
    Some(pb)
}
