use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, SalesError};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Per-region sales performance dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "region-sales",
    about = "Per-region sales performance dashboard",
    version
)]
pub struct Settings {
    /// Sales CSV file
    #[arg(long, env = "REGION_SALES_DATA", default_value = "data/Amazon-cleaned.csv")]
    pub data_path: PathBuf,

    /// Region selected at startup (defaults to the first region; pass "" for none)
    #[arg(long)]
    pub region: Option<String>,

    /// Output mode
    #[arg(long, default_value = "interactive", value_parser = ["interactive", "report", "json"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Self::load`] but with an explicit argument list, enabling
    /// unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<std::ffi::OsString>) -> Self {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Resolve `--region` against the available regions.
    ///
    /// * not given → first region, or `None` when the dataset has none
    /// * empty string → `None` (start with nothing selected)
    /// * otherwise → the matching region's canonical spelling, compared
    ///   case-insensitively; unknown names are a [`SalesError::Config`]
    pub fn initial_region(&self, regions: &[String]) -> Result<Option<String>> {
        let Some(requested) = self.region.as_deref() else {
            return Ok(regions.first().cloned());
        };

        let requested = requested.trim();
        if requested.is_empty() {
            return Ok(None);
        }

        let wanted = requested.to_uppercase();
        regions
            .iter()
            .find(|r| r.to_uppercase() == wanted)
            .cloned()
            .map(Some)
            .ok_or_else(|| SalesError::Config(format!("unknown region \"{}\"", requested)))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
