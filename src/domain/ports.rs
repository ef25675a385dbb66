use crate::domain::model::{FilterValues, LadderQuery, ProblemEntry};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn handle(&self) -> &str;
    fn output_path(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait LadderSource: Send + Sync {
    async fn fetch(&self, query: &LadderQuery) -> Result<Vec<ProblemEntry>>;
}

/// The filter controls. Read again on every refresh.
pub trait FilterSource: Send + Sync {
    fn current(&self) -> FilterValues;
}

/// Blocking user-facing failure surface.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
