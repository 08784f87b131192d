//! Match OCR text against the SKU catalog and print the result as JSON.
//!
//! Run with:
//!     cargo run --bin match-sku -- "OKF Sparkling Zero Grape 350ml"
//!     echo "Hershey Kisses 146g" | cargo run --bin match-sku -- --stdin --explain
//!
//! Catalog: `--catalog`, else `SKU_CATALOG_PATH`, else `data/sku_master.json`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use skumatch::config::resolve_catalog_path;
use skumatch::ranking::ScoreBreakdown;
use skumatch::SkuMatcher;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OCR text to match
    text: Option<String>,

    /// Read the OCR text from stdin instead
    #[arg(long)]
    stdin: bool,

    /// Path to the catalog JSON file
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Print the whole ranking instead of match + alternatives
    #[arg(long)]
    all: bool,

    /// Print per-candidate score components
    #[arg(long)]
    explain: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct ExplainedCandidate<'a> {
    code: &'a str,
    brand_line: &'a str,
    flavor: &'a str,
    score: f64,
    jaccard: f64,
    hint_bonus: f64,
    volume_bonus: f64,
    brand_boost: f64,
    flavor_penalty: f64,
}

impl<'a> ExplainedCandidate<'a> {
    fn new(record: &'a skumatch::SkuRecord, score: f64, b: ScoreBreakdown) -> Self {
        Self {
            code: &record.code,
            brand_line: &record.brand_line,
            flavor: &record.flavor,
            score,
            jaccard: b.jaccard,
            hint_bonus: b.hint_bonus,
            volume_bonus: b.volume_bonus,
            brand_boost: b.brand_boost,
            flavor_penalty: b.flavor_penalty,
        }
    }
}

/// OCR text comes either from the positional argument or from `input`.
fn read_query(text: Option<&str>, use_stdin: bool, mut input: impl Read) -> Result<String> {
    match (text, use_stdin) {
        (Some(text), false) => Ok(text.to_string()),
        (None, true) => {
            let mut buf = String::new();
            input
                .read_to_string(&mut buf)
                .context("Failed to read OCR text from stdin")?;
            Ok(buf)
        }
        (Some(_), true) => bail!("Pass the OCR text either as an argument or with --stdin, not both"),
        (None, false) => bail!("No OCR text given (pass it as an argument or use --stdin)"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let query = read_query(args.text.as_deref(), args.stdin, std::io::stdin())?;
    let catalog_path = resolve_catalog_path(args.catalog.clone());
    let matcher = SkuMatcher::from_path(&catalog_path);

    // Build up front so catalog problems surface with the path attached
    matcher
        .index()
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;

    let output = if args.explain {
        let ranked = matcher.explain(&query)?;
        let limit = if args.all { ranked.len() } else { 1 + skumatch::search::MAX_ALTERNATIVES };
        let candidates: Vec<ExplainedCandidate> = ranked
            .iter()
            .take(limit)
            .map(|r| ExplainedCandidate::new(r.entry.record(), r.score, r.breakdown))
            .collect();
        serde_json::to_string_pretty(&candidates)?
    } else if args.all {
        serde_json::to_string_pretty(&matcher.rank(&query)?)?
    } else {
        serde_json::to_string_pretty(&matcher.match_sku(&query)?)?
    };

    println!("{}", output);
    Ok(())
}
