use serde::{Deserialize, Serialize};

/// One problem of the ladder, as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemEntry {
    pub index: String,
    pub name: String,
    pub link: String,
    pub contest_name: String,
    pub division: String,
    pub rating: Option<i64>,
    pub solved_count: u64,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<i64>,
    /// Whether the requesting handle has already solved it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solved: Option<bool>,
}

/// Raw filter control values. Forwarded to the backend untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValues {
    pub min: String,
    pub max: String,
    pub sort: String,
    #[serde(default)]
    pub indices: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderQuery {
    pub handle: String,
    pub filters: FilterValues,
}

impl LadderQuery {
    pub fn new(handle: impl Into<String>, filters: FilterValues) -> Self {
        Self {
            handle: handle.into(),
            filters,
        }
    }

    /// Query pairs in wire order. `indices` is only sent when set.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("handle", self.handle.as_str()),
            ("min", self.filters.min.as_str()),
            ("max", self.filters.max.as_str()),
            ("sort", self.filters.sort.as_str()),
        ];
        if !self.filters.indices.trim().is_empty() {
            pairs.push(("indices", self.filters.indices.as_str()));
        }
        pairs
    }
}
