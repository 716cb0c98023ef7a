//! # Till Register
//!
//! Runs one checkout session from the command line.
//!
//! ```text
//! $ till-register atv atv atv vga
//! 249.00
//!
//! $ printf 'mbp\nvga\nipd\n' | till-register --output json
//! {"total":"1949.98","tally":{"ipd":1,"mbp":1,"vga":1}}
//! ```
//!
//! SKUs come from the arguments, or one per line on stdin when there are
//! none. Logs go to stderr so stdout carries only the total.

mod config;

use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use till_core::{Checkout, Money, Tally};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, RegisterArgs};

/// What `--output json` prints.
#[derive(Debug, Serialize)]
struct Summary {
    total: Money,
    tally: Tally,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = RegisterArgs::parse();
    let pricing = args.load_pricing()?;
    let engine = Arc::new(
        pricing
            .build_engine()
            .context("Pricing configuration rejected")?,
    );

    let scans = if args.skus.is_empty() {
        read_scans(io::stdin().lock())?
    } else {
        args.skus
    };

    let mut checkout = Checkout::open(engine);
    for sku in &scans {
        checkout.scan(sku);
    }

    let tally = checkout.tally().clone();
    let total = checkout.close()?;
    info!(%total, "Total computed");

    match args.output {
        OutputFormat::Text => println!("{}", total),
        OutputFormat::Json => println!("{}", serde_json::to_string(&Summary { total, tally })?),
    }

    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// Set via `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Show every priced line
/// - `RUST_LOG=till_core=trace` - Show every scan too
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// One SKU per line; blank lines and `#` comments are skipped.
fn read_scans<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut scans = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let sku = line.trim();
        if sku.is_empty() || sku.starts_with('#') {
            continue;
        }
        scans.push(sku.to_string());
    }
    Ok(scans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scans_skips_blanks_and_comments() {
        let input = "atv\n\n  ipd  \n# promo items\nvga\n";
        let scans = read_scans(input.as_bytes()).unwrap();
        assert_eq!(scans, vec!["atv", "ipd", "vga"]);
    }

    #[test]
    fn test_summary_json() {
        let tally: Tally = ["mbp", "vga"].into_iter().collect();
        let summary = Summary {
            total: Money::from_cents(139999),
            tally,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"total":"1399.99","tally":{"mbp":1,"vga":1}}"#);
    }
}
