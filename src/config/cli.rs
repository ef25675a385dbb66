use crate::core::{FilterSource, FilterValues, Notifier, Storage};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

/// Editable filter controls: min/max rating, sort key and problem indices.
#[derive(Debug, Default)]
pub struct FilterPanel {
    values: RwLock<FilterValues>,
}

impl FilterPanel {
    pub fn new(values: FilterValues) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    pub fn set_min(&self, value: &str) {
        self.update(|v| v.min = value.to_string());
    }

    pub fn set_max(&self, value: &str) {
        self.update(|v| v.max = value.to_string());
    }

    pub fn set_sort(&self, value: &str) {
        self.update(|v| v.sort = value.to_string());
    }

    pub fn set_indices(&self, value: &str) {
        self.update(|v| v.indices = value.to_string());
    }

    fn update(&self, f: impl FnOnce(&mut FilterValues)) {
        // a poisoned lock still holds plain strings, keep using them
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        f(&mut values);
    }
}

impl FilterSource for FilterPanel {
    fn current(&self) -> FilterValues {
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Prints alerts to stderr, where a terminal user will see them.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}
