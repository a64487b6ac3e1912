use std::collections::HashSet;

use crate::config::LookupsConfig;
use crate::models::Result;

/// Immutable filter sets loaded once at startup and injected into the
/// extractor: known top-level domains, NANP area codes, and common first
/// names for the PERSON-entity heuristic.
#[derive(Debug)]
pub struct Lookups {
    tlds: HashSet<String>,
    area_codes: HashSet<u16>,
    first_names: HashSet<String>,
}

impl Lookups {
    pub async fn load(config: &LookupsConfig) -> Result<Self> {
        let tlds = tokio::fs::read_to_string(&config.tld_file).await?;
        let area_codes = tokio::fs::read_to_string(&config.area_codes_file).await?;
        let first_names = tokio::fs::read_to_string(&config.first_names_file).await?;
        Self::parse(&tlds, &area_codes, &first_names)
    }

    pub fn parse(tlds: &str, area_codes: &str, first_names: &str) -> Result<Self> {
        let tlds = entries(tlds).map(|e| e.to_lowercase()).collect();

        let mut codes = HashSet::new();
        for entry in entries(area_codes) {
            let code: u16 = entry
                .parse()
                .map_err(|_| format!("invalid area code entry: {}", entry))?;
            codes.insert(code);
        }

        // The name list is comma- or line-separated, one name per entry.
        let first_names = entries(first_names)
            .flat_map(|line| line.split(','))
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(Self {
            tlds,
            area_codes: codes,
            first_names,
        })
    }

    pub fn is_known_tld(&self, tld: &str) -> bool {
        self.tlds.contains(tld)
    }

    pub fn is_known_area_code(&self, code: u16) -> bool {
        self.area_codes.contains(&code)
    }

    pub fn is_first_name(&self, name: &str) -> bool {
        self.first_names.contains(name)
    }
}

fn entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
