pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::{FilterPanel, LocalStorage, StderrNotifier};
pub use config::LadderConfig;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::app::{LadderApp, RefreshOutcome};
pub use core::fetcher::{HttpLadderSource, ALERT_MESSAGE};
pub use core::renderer::{LadderPage, LadderRow, LadderTable};
pub use domain::model::{FilterValues, LadderQuery, ProblemEntry};
pub use utils::error::{LadderError, Result};
