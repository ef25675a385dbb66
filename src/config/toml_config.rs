use crate::utils::error::{LadderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `ladder.toml`: every table and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub handle: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Filter defaults. Numbers and strings are both accepted (`min = 1200`
/// or `min = "1200"`), they end up as the raw text sent to the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltersConfig {
    pub min: Option<toml::Value>,
    pub max: Option<toml::Value>,
    pub sort: Option<String>,
    pub indices: Option<toml::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LadderError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LadderError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CF_HANDLE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LadderError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl FiltersConfig {
    pub fn min_text(&self) -> Option<String> {
        self.min.as_ref().map(value_text)
    }

    pub fn max_text(&self) -> Option<String> {
        self.max.as_ref().map(value_text)
    }

    /// `indices = ["A", "B"]` or `indices = "A,B"`.
    pub fn indices_text(&self) -> Option<String> {
        self.indices.as_ref().map(|v| match v {
            toml::Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
            other => value_text(other),
        })
    }
}

fn value_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
