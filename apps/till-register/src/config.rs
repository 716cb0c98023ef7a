//! Register configuration module.
//!
//! Options come from the command line, each with an environment fallback.
//!
//! | Flag               | Variable              | Default | Meaning                     |
//! |--------------------|-----------------------|---------|-----------------------------|
//! | `--pricing-config` | `TILL_PRICING_CONFIG` | (unset) | Path to a pricing JSON file |
//! | `--output`         | `TILL_OUTPUT`         | `text`  | `text` or `json`            |
//!
//! Log filtering uses the standard `RUST_LOG`.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use till_core::{CoreError, PricingConfig};
use tracing::info;

/// How the total is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Prices one checkout session.
///
/// SKUs are read from the arguments, or one per line on stdin when none
/// are given.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "till-register", version, about)]
pub struct RegisterArgs {
    /// SKUs scanned, in order.
    pub skus: Vec<String>,

    /// Pricing file; the reference store when unset.
    #[arg(long, env = "TILL_PRICING_CONFIG")]
    pub pricing_config: Option<PathBuf>,

    /// Output format for the total.
    #[arg(long, env = "TILL_OUTPUT", value_enum, default_value_t)]
    pub output: OutputFormat,
}

impl RegisterArgs {
    /// Reads the pricing file, or falls back to the reference store.
    pub fn load_pricing(&self) -> Result<PricingConfig, ConfigError> {
        let Some(path) = &self.pricing_config else {
            info!("No pricing file given, using reference pricing");
            return Ok(PricingConfig::reference());
        };

        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let pricing = PricingConfig::from_json(&json)?;

        info!(
            path = %path.display(),
            products = pricing.products.len(),
            "Pricing configuration loaded"
        );
        Ok(pricing)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Pricing(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::env;

    #[test]
    fn test_positional_skus() {
        let args = RegisterArgs::try_parse_from(["till-register", "atv", "atv", "vga"]).unwrap();
        assert_eq!(args.skus, vec!["atv", "atv", "vga"]);
        assert!(args.pricing_config.is_none());
    }

    #[test]
    fn test_options() {
        let args = RegisterArgs::try_parse_from([
            "till-register",
            "--output",
            "json",
            "--pricing-config",
            "/etc/till/pricing.json",
            "mbp",
        ])
        .unwrap();

        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.pricing_config, Some(PathBuf::from("/etc/till/pricing.json")));
        assert_eq!(args.skus, vec!["mbp"]);
    }

    #[test]
    fn test_help_is_not_a_sku() {
        let err = RegisterArgs::try_parse_from(["till-register", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_invalid_output() {
        let err = RegisterArgs::try_parse_from(["till-register", "--output", "xml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_sku_is_an_error() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("till-register"),
            OsString::from("atv"),
            OsString::from_vec(vec![0xff]),
        ];
        let err = RegisterArgs::try_parse_from(args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
    }

    #[test]
    fn test_reference_pricing_when_unset() {
        let pricing = RegisterArgs::default().load_pricing().unwrap();
        assert_eq!(pricing, PricingConfig::reference());
    }

    #[test]
    fn test_missing_pricing_file() {
        let args = RegisterArgs {
            pricing_config: Some(PathBuf::from("/nonexistent/till/pricing.json")),
            ..RegisterArgs::default()
        };

        assert!(matches!(args.load_pricing(), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_pricing_file_round_trip() {
        let path = env::temp_dir().join(format!("till-pricing-{}.json", std::process::id()));
        let json = serde_json::to_string_pretty(&PricingConfig::reference()).unwrap();
        fs::write(&path, json).unwrap();

        let args = RegisterArgs {
            pricing_config: Some(path.clone()),
            ..RegisterArgs::default()
        };
        let pricing = args.load_pricing();
        fs::remove_file(&path).unwrap();

        assert_eq!(pricing.unwrap(), PricingConfig::reference());
    }
}
