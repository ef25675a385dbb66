pub mod app;
pub mod fetcher;
pub mod renderer;

pub use crate::domain::model::{FilterValues, LadderQuery, ProblemEntry};
pub use crate::domain::ports::{ConfigProvider, FilterSource, LadderSource, Notifier, Storage};
pub use crate::utils::error::Result;
