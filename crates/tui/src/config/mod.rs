use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/sheetbook.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Web-app URL of the sheet; answers `GET` with the rows and `POST` with `{ok, error}`.
    pub endpoint: String,
    pub currency_symbol: String,
    /// IANA name. Unset keeps the sheet's UTC dates.
    pub timezone: Option<String>,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://script.google.com/macros/s/DEPLOYMENT_ID/exec".to_string(),
            currency_symbol: "$".to_string(),
            timezone: None,
            log_file: "sheetbook.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sheetbook", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the sheet endpoint URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// Override the currency symbol shown before amounts.
    #[arg(long)]
    currency_symbol: Option<String>,
    /// Derive missing dates in this timezone (IANA name) instead of UTC.
    #[arg(long)]
    timezone: Option<String>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SHEETBOOK_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(currency_symbol) = args.currency_symbol {
        settings.currency_symbol = currency_symbol;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = Some(timezone);
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
