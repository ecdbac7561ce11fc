//! Subcommands and the helpers they share.

pub mod config;
pub mod session;
pub mod summarize;

use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use tracing::debug;

use brief_core::summarize::Severity;
use brief_core::{BriefConfig, HfInferenceBackend, Outcome, Page};

/// Environment variable consulted when the config has no API token.
pub const TOKEN_ENV: &str = "HF_TOKEN";

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("brief")
        .join("config.json")
}

/// Load the config from `--config`, else the default location, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BriefConfig> {
    let config = match config_path {
        Some(path) => BriefConfig::from_file(Path::new(path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Using config at {}", path.display());
                BriefConfig::from_file(&path)?
            } else {
                BriefConfig::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

/// A page whose engine is the configured hosted model, built on first use.
pub fn build_page(config: &BriefConfig) -> anyhow::Result<Page<HfInferenceBackend>> {
    let settings = config.summarizer.clone();
    let page = Page::lazy(move || {
        let token = settings
            .api_token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV).ok());
        HfInferenceBackend::builder()
            .endpoint(settings.endpoint.clone())
            .model(settings.model.clone())
            .api_token(token)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .wait_for_model(settings.wait_for_model)
            .build()
    });
    Ok(page.configured(config)?)
}

/// Print an outcome the way the page shows it.
pub fn print_outcome(outcome: &Outcome) {
    let message = outcome.message();
    match outcome.severity() {
        Severity::Success => {
            println!("{} {}", style("✓").green(), style(message).green().bold());
            if let Some(summary) = outcome.summary() {
                println!("{}", summary.text);
            }
        }
        Severity::Warning => eprintln!("{} {}", style("⚠").yellow(), style(message).yellow()),
        Severity::Error => eprintln!("{} {}", style("✗").red(), style(message).red()),
    }
}
