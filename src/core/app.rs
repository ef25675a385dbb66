use crate::core::fetcher::ALERT_MESSAGE;
use crate::core::renderer::{LadderPage, LadderTable};
use crate::core::{FilterSource, LadderQuery, LadderSource, Notifier, Storage};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The table now shows this many rows.
    Rendered(usize),
    /// A newer refresh started while this one was in flight.
    Superseded,
    Failed,
}

/// Wires filter controls, the ladder source and the table together.
///
/// Both triggers (`on_load`, `apply_filters`) run the same refresh. Each
/// refresh takes a generation ticket when it starts and only renders if
/// its ticket is still the newest once the response is in, so overlapping
/// requests can never leave an older filter set on screen.
pub struct LadderApp<S: LadderSource, F: FilterSource, N: Notifier> {
    source: S,
    filters: F,
    notifier: N,
    handle: String,
    table: Arc<Mutex<LadderTable>>,
    generation: AtomicU64,
}

impl<S: LadderSource, F: FilterSource, N: Notifier> LadderApp<S, F, N> {
    pub fn new(source: S, filters: F, notifier: N, handle: impl Into<String>) -> Self {
        Self {
            source,
            filters,
            notifier,
            handle: handle.into(),
            table: Arc::new(Mutex::new(LadderTable::new())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn table(&self) -> Arc<Mutex<LadderTable>> {
        Arc::clone(&self.table)
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub async fn on_load(&self) -> RefreshOutcome {
        tracing::info!("Loading ladder");
        self.refresh().await
    }

    pub async fn apply_filters(&self) -> RefreshOutcome {
        tracing::info!("Applying filters");
        self.refresh().await
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = LadderQuery::new(self.handle.clone(), self.filters.current());
        tracing::debug!("Refresh #{} with {:?}", ticket, query.filters);

        match self.source.fetch(&query).await {
            Ok(entries) => {
                let mut table = self.table.lock().await;
                if !self.is_current(ticket) {
                    tracing::debug!("Refresh #{} superseded, dropping {} entries", ticket, entries.len());
                    return RefreshOutcome::Superseded;
                }
                table.render_table(&entries);
                RefreshOutcome::Rendered(table.len())
            }
            Err(e) if !self.is_current(ticket) => {
                tracing::debug!("Refresh #{} superseded and failed: {}", ticket, e);
                RefreshOutcome::Superseded
            }
            Err(e) => {
                tracing::error!(
                    "❌ Failed to fetch ladder: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                self.notifier.alert(ALERT_MESSAGE);
                RefreshOutcome::Failed
            }
        }
    }

    /// Renders the full page around the current table and stores it,
    /// returning the number of rows on the written page.
    ///
    /// The table lock is held until the write finishes, so concurrent
    /// writers to the same path go one after another.
    pub async fn write_page<T: Storage>(&self, storage: &T, path: &str) -> Result<usize> {
        let filters = self.filters.current();
        let table = self.table.lock().await;
        let html = LadderPage::new(&table, &self.handle, &filters).to_html()?;

        tracing::debug!("Writing page ({} bytes) to {}", html.len(), path);
        storage.write_file(path, html.as_bytes()).await?;
        Ok(table.len())
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}
