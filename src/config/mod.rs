pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, FilterValues};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::FileConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_API_ENDPOINT: &str = "http://127.0.0.1:5000/api/ladder";
pub const DEFAULT_MIN_RATING: &str = "800";
pub const DEFAULT_MAX_RATING: &str = "3500";
pub const DEFAULT_SORT_KEY: &str = "solved";
pub const DEFAULT_OUTPUT_PATH: &str = "./ladder.html";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "cf-ladder")]
#[command(about = "Fetch a Codeforces problem ladder and render it as an HTML table")]
pub struct CliConfig {
    /// Ladder endpoint of the backend [default: http://127.0.0.1:5000/api/ladder]
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Codeforces handle whose solved problems the backend marks
    #[arg(long, env = "LADDER_HANDLE")]
    pub handle: Option<String>,

    /// Minimum rating, sent as typed [default: 800]
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<String>,

    /// Maximum rating, sent as typed [default: 3500]
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<String>,

    /// Sort key: solved, rating, newest or oldest [default: solved]
    #[arg(long)]
    pub sort: Option<String>,

    /// Comma separated problem indices, e.g. A,B
    #[arg(long)]
    pub indices: Option<String>,

    /// Where the rendered page is written [default: ./ladder.html]
    #[arg(long)]
    pub output_path: Option<String>,

    /// Give up on a request after this many seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// TOML file with defaults; flags given here win
    #[arg(short, long)]
    pub config: Option<String>,

    /// Read filter commands from stdin and re-render on `apply`
    #[arg(short, long)]
    pub interactive: bool,

    /// Only check that the backend answers, then exit
    #[arg(long)]
    pub check: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

/// Effective settings after layering flags over the file over defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderConfig {
    pub api_endpoint: String,
    pub handle: String,
    pub output_path: String,
    pub timeout_seconds: Option<u64>,
    pub filters: FilterValues,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self::from_file_config(&FileConfig::default())
    }
}

impl LadderConfig {
    pub fn from_file_config(file: &FileConfig) -> Self {
        Self {
            api_endpoint: file
                .source
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            handle: file.source.handle.clone().unwrap_or_default(),
            output_path: file
                .output
                .path
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            timeout_seconds: file.source.timeout_seconds,
            filters: FilterValues {
                min: file
                    .filters
                    .min_text()
                    .unwrap_or_else(|| DEFAULT_MIN_RATING.to_string()),
                max: file
                    .filters
                    .max_text()
                    .unwrap_or_else(|| DEFAULT_MAX_RATING.to_string()),
                sort: file
                    .filters
                    .sort
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SORT_KEY.to_string()),
                indices: file.filters.indices_text().unwrap_or_default(),
            },
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: Option<&FileConfig>) -> Self {
        let mut config = file.map(Self::from_file_config).unwrap_or_default();

        if let Some(endpoint) = &cli.api_endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(handle) = &cli.handle {
            config.handle = handle.trim().to_string();
        }
        if let Some(path) = &cli.output_path {
            config.output_path = path.clone();
        }
        if cli.timeout_seconds.is_some() {
            config.timeout_seconds = cli.timeout_seconds;
        }
        if let Some(min) = &cli.min {
            config.filters.min = min.clone();
        }
        if let Some(max) = &cli.max {
            config.filters.max = max.clone();
        }
        if let Some(sort) = &cli.sort {
            config.filters.sort = sort.clone();
        }
        if let Some(indices) = &cli.indices {
            config.filters.indices = indices.clone();
        }

        config
    }
}

impl ConfigProvider for LadderConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn handle(&self) -> &str {
        &self.handle
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for LadderConfig {
    // Filter values are passed through unchecked.
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_endpoint_route("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
