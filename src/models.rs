use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One organic result returned by the search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
}

/// An entity accepted by the extraction pipeline, e.g. ("Bob X. Smith", "PERSON").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHit {
    pub text: String,
    pub label: String,
}

/// One report row: everything attributed to a single source link.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRow {
    pub title: String,
    pub link: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub entities: Vec<EntityHit>,
}

/// Which extraction facets are active for a run.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub emails: bool,
    pub phones: bool,
    pub entities: bool,
    /// Skip placeholder-domain and local-part-length checks.
    pub email_only: bool,
    /// Reject .gov pages and government-flavored addresses.
    pub exclude_gov: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            emails: true,
            phones: true,
            entities: true,
            email_only: false,
            exclude_gov: false,
        }
    }
}

/// How many result pages to pull per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCount {
    Bounded(u32),
    /// Run until interrupted, flushing the report after every page.
    Indefinite,
}

impl PageCount {
    pub fn is_indefinite(&self) -> bool {
        matches!(self, PageCount::Indefinite)
    }
}

impl std::str::FromStr for PageCount {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(PageCount::Indefinite);
        }
        s.parse::<u32>()
            .map(PageCount::Bounded)
            .map_err(|_| format!("invalid page count: {} (expected a number or 'all')", s))
    }
}
