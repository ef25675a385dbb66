use crate::core::{FilterValues, ProblemEntry};
use crate::utils::error::Result;
use askama::Template;
use url::Url;

const SORT_KEYS: [(&str, &str); 4] = [
    ("solved", "Most solved"),
    ("rating", "Rating"),
    ("newest", "Newest"),
    ("oldest", "Oldest"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct LadderRow {
    pub rank: usize,
    pub index: String,
    pub name: String,
    pub link: String,
    pub contest_name: String,
    pub division: String,
    pub rating: String,
    pub solved_count: u64,
    pub tags: Vec<String>,
    pub solved: bool,
}

impl LadderRow {
    fn from_entry(rank: usize, entry: &ProblemEntry) -> Self {
        Self {
            rank,
            index: entry.index.clone(),
            name: entry.name.clone(),
            link: safe_link(&entry.link),
            contest_name: entry.contest_name.clone(),
            division: entry.division.clone(),
            rating: entry.rating.map(|r| r.to_string()).unwrap_or_default(),
            solved_count: entry.solved_count,
            tags: entry.tags.clone(),
            solved: entry.solved.unwrap_or(false),
        }
    }
}

/// The ladder table body. Every render replaces the whole content.
#[derive(Debug, Default, Template)]
#[template(path = "ladder_rows.html")]
pub struct LadderTable {
    rows: Vec<LadderRow>,
}

impl LadderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_table(&mut self, data: &[ProblemEntry]) {
        self.rows.clear();
        self.rows.extend(
            data.iter()
                .enumerate()
                .map(|(i, entry)| LadderRow::from_entry(i + 1, entry)),
        );
        tracing::debug!("Rendered {} ladder rows", self.rows.len());
    }

    pub fn rows(&self) -> &[LadderRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `<tr>` markup of the body, every field escaped.
    pub fn to_html(&self) -> Result<String> {
        Ok(self.render()?)
    }
}

#[derive(Debug)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "ladder_page.html")]
pub struct LadderPage<'a> {
    pub handle: &'a str,
    pub filters: &'a FilterValues,
    pub sort_options: Vec<SortOption>,
    pub rows: &'a [LadderRow],
    pub generated_at: String,
}

impl<'a> LadderPage<'a> {
    pub fn new(table: &'a LadderTable, handle: &'a str, filters: &'a FilterValues) -> Self {
        let sort_options: Vec<SortOption> = SORT_KEYS
            .iter()
            .map(|&(value, label)| SortOption {
                value,
                label,
                selected: value == filters.sort,
            })
            .collect();

        Self {
            handle,
            filters,
            sort_options,
            rows: table.rows(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn to_html(&self) -> Result<String> {
        Ok(self.render()?)
    }
}

/// Only http(s) links are emitted; anything else becomes `#`.
fn safe_link(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => link.to_string(),
        _ => {
            tracing::warn!("Dropping non-http problem link: {}", link);
            "#".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: &str, name: &str, tags: &[&str]) -> ProblemEntry {
        ProblemEntry {
            index: index.to_string(),
            name: name.to_string(),
            link: format!("https://codeforces.com/contest/1/problem/{}", index),
            contest_name: "Div2 #1".to_string(),
            division: "2".to_string(),
            rating: Some(1300),
            solved_count: 500,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            contest_id: Some(1),
            solved: None,
        }
    }

    #[test]
    fn test_render_table_ranks_in_order() {
        let mut table = LadderTable::new();
        table.render_table(&[entry("A", "Sum", &["math"]), entry("B", "Diff", &[])]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].rank, 1);
        assert_eq!(table.rows()[0].index, "A");
        assert_eq!(table.rows()[1].rank, 2);
        assert_eq!(table.rows()[1].name, "Diff");
    }

    #[test]
    fn test_render_table_replaces_previous_rows() {
        let mut table = LadderTable::new();
        table.render_table(&[entry("A", "Sum", &[]), entry("B", "Diff", &[])]);
        table.render_table(&[entry("C", "Prod", &[])]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].index, "C");
        assert_eq!(table.rows()[0].rank, 1);
    }

    #[test]
    fn test_render_empty_data() {
        let mut table = LadderTable::new();
        table.render_table(&[entry("A", "Sum", &[])]);
        table.render_table(&[]);

        assert!(table.is_empty());
        assert!(!table.to_html().unwrap().contains("<tr"));
    }

    #[test]
    fn test_null_rating_renders_empty_cell() {
        let mut problem = entry("A", "Sum", &[]);
        problem.rating = None;

        let mut table = LadderTable::new();
        table.render_table(&[problem]);

        assert_eq!(table.rows()[0].rating, "");
        assert!(table.to_html().unwrap().contains("<td></td>"));
    }

    #[test]
    fn test_html_row_columns() {
        let mut problem = entry("A", "Sum", &["math", "greedy"]);
        problem.link = "https://x/a".to_string();

        let mut table = LadderTable::new();
        table.render_table(&[problem]);
        let html = table.to_html().unwrap();

        assert!(html.contains("<td>1</td>"));
        assert!(html.contains(
            r#"<a href="https://x/a" target="_blank" rel="noopener noreferrer">A — Sum</a>"#
        ));
        assert!(html.contains("<td>Div2 #1</td>"));
        assert!(html.contains("<td>1300</td>"));
        assert!(html.contains("<td>500</td>"));
        assert!(html.contains(r#"<span class="tag">math</span> <span class="tag">greedy</span>"#));
    }

    #[test]
    fn test_markup_in_fields_is_escaped() {
        let mut problem = entry("A", "<script>alert(1)</script>", &["<b>dp</b>"]);
        problem.contest_name = "Round & \"Co\"".to_string();

        let mut table = LadderTable::new();
        table.render_table(&[problem]);
        let html = table.to_html().unwrap();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;dp&lt;/b&gt;"));
        assert!(html.contains("Round &amp;"));
    }

    #[test]
    fn test_non_http_link_is_dropped() {
        let mut problem = entry("A", "Sum", &[]);
        problem.link = "javascript:alert(1)".to_string();

        let mut table = LadderTable::new();
        table.render_table(&[problem]);

        assert_eq!(table.rows()[0].link, "#");
    }

    #[test]
    fn test_solved_rows_are_marked() {
        let mut problem = entry("A", "Sum", &[]);
        problem.solved = Some(true);

        let mut table = LadderTable::new();
        table.render_table(&[problem, entry("B", "Diff", &[])]);
        let html = table.to_html().unwrap();

        assert_eq!(html.matches(r#"<tr class="solved">"#).count(), 1);
    }

    #[test]
    fn test_page_has_filter_controls() {
        let mut table = LadderTable::new();
        table.render_table(&[entry("A", "Sum", &["math"])]);
        let filters = FilterValues {
            min: "1200".to_string(),
            max: "1600".to_string(),
            sort: "rating".to_string(),
            indices: String::new(),
        };

        let html = LadderPage::new(&table, "Samia5038", &filters).to_html().unwrap();

        assert!(html.contains(r#"id="minRating""#));
        assert!(html.contains(r#"value="1200""#));
        assert!(html.contains(r#"<option value="rating" selected>"#));
        assert!(html.contains(r#"id="applyFilters""#));
        assert!(html.contains(r#"<table id="ladder">"#));
        assert!(html.contains("for Samia5038"));
        assert!(html.contains("1 problems"));
    }
}
