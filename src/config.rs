use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::pricing::{PricingPolicy, DEFAULT_MOQ_AMOUNT, DEFAULT_TAX_RATE};

const DEFAULT_CHANNEL_BUFFER: usize = 32;
const DEFAULT_RECONCILE_DEBOUNCE_MS: u64 = 500;
const DEFAULT_SESSION_DIR: &str = ".storefront/sessions";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub tax_rate: f64,
    pub moq_amount: f64,
    pub channel_buffer: usize,
    pub reconcile_debounce: Duration,
    pub session_dir: PathBuf,
    pub log_filter: String,
}

impl StorefrontConfig {
    /// Command line and environment win over the config file, which wins over defaults.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            tax_rate: cli_tax_rate,
            moq_amount: cli_moq_amount,
            channel_buffer: cli_channel_buffer,
            reconcile_debounce_ms: cli_reconcile_debounce_ms,
            session_dir: cli_session_dir,
            log_filter: cli_log_filter,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let tax_rate = cli_tax_rate.or(file_config.tax_rate).unwrap_or(DEFAULT_TAX_RATE);
        anyhow::ensure!(
            (0.0..1.0).contains(&tax_rate),
            "tax rate must be a fraction in [0, 1), got {tax_rate}"
        );

        let moq_amount = cli_moq_amount.or(file_config.moq_amount).unwrap_or(DEFAULT_MOQ_AMOUNT);
        anyhow::ensure!(
            moq_amount.is_finite() && moq_amount >= 0.0,
            "minimum order amount must be non-negative, got {moq_amount}"
        );

        let channel_buffer = cli_channel_buffer
            .or(file_config.channel_buffer)
            .unwrap_or(DEFAULT_CHANNEL_BUFFER);
        anyhow::ensure!(channel_buffer > 0, "channel buffer must be at least 1");

        let reconcile_debounce = Duration::from_millis(
            cli_reconcile_debounce_ms
                .or(file_config.reconcile_debounce_ms)
                .unwrap_or(DEFAULT_RECONCILE_DEBOUNCE_MS),
        );

        let session_dir = cli_session_dir
            .or(file_config.session_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR));

        let log_filter = cli_log_filter
            .or(file_config.log_filter)
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            tax_rate,
            moq_amount,
            channel_buffer,
            reconcile_debounce,
            session_dir,
            log_filter,
        })
    }

    pub fn pricing(&self) -> PricingPolicy {
        PricingPolicy { tax_rate: self.tax_rate, moq_amount: self.moq_amount }
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "storefront", about = "Storefront actor system", version)]
pub struct CliArgs {
    #[arg(long, value_name = "FILE", help = "Path to a configuration file (YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "STOREFRONT_TAX_RATE",
        value_name = "RATE",
        help = "Tax rate applied to the discounted subtotal, as a fraction"
    )]
    pub tax_rate: Option<f64>,

    #[arg(
        long,
        env = "STOREFRONT_MOQ_AMOUNT",
        value_name = "RUPEES",
        help = "Minimum cart value required to place an order"
    )]
    pub moq_amount: Option<f64>,

    #[arg(
        long,
        env = "STOREFRONT_CHANNEL_BUFFER",
        value_name = "N",
        help = "Request queue depth of each actor",
        value_parser = clap::value_parser!(usize)
    )]
    pub channel_buffer: Option<usize>,

    #[arg(
        long,
        env = "STOREFRONT_RECONCILE_DEBOUNCE_MS",
        value_name = "MS",
        help = "Delay before a cart stock reconciliation pass runs"
    )]
    pub reconcile_debounce_ms: Option<u64>,

    #[arg(
        long,
        env = "STOREFRONT_SESSION_DIR",
        value_name = "DIR",
        help = "Directory holding saved checkout sessions"
    )]
    pub session_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "STOREFRONT_LOG",
        value_name = "FILTER",
        help = "Log filter used when RUST_LOG is not set"
    )]
    pub log_filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
struct PartialConfig {
    tax_rate: Option<f64>,
    moq_amount: Option<f64>,
    channel_buffer: Option<usize>,
    reconcile_debounce_ms: Option<u64>,
    session_dir: Option<PathBuf>,
    log_filter: Option<String>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => {
            serde_yaml::from_str(&contents).with_context(|| format!("failed to parse YAML config {:?}", path))?
        }
        "json" => serde_json::from_str(&contents).with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
