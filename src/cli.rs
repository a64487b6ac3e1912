use clap::Parser;

use crate::models::{ExtractOptions, PageCount};
use crate::search::EngineSelection;

/// Scrape search results for leads: emails, phone numbers, and named
/// entities, grouped by source page.
#[derive(Debug, Parser)]
#[command(name = "lead-harvester", version)]
pub struct Args {
    /// Search query to run against each engine.
    #[arg(short, long, default_value = "test")]
    pub query: String,

    /// Result pages per engine, or 'all' to run until interrupted.
    #[arg(long, default_value = "2")]
    pub pages: PageCount,

    /// Engine name, 'all', or 'american'.
    #[arg(short, long, default_value = "google")]
    pub engine: EngineSelection,

    /// Output CSV path; '.csv' is appended when missing.
    #[arg(short, long, default_value = "leads.csv")]
    pub output: String,

    /// Skip placeholder-domain and local-part-length checks on emails.
    #[arg(long)]
    pub email_only: bool,

    /// Exclude .gov pages and government-flavored addresses.
    #[arg(long)]
    pub no_gov: bool,

    /// Disable email extraction (and with it, spidering).
    #[arg(long)]
    pub no_emails: bool,

    /// Disable phone extraction.
    #[arg(long)]
    pub no_phones: bool,

    /// Disable entity extraction.
    #[arg(long)]
    pub no_entities: bool,

    /// Skip the entity-recognition service even when configured.
    #[arg(long)]
    pub no_ner: bool,

    /// Configuration file.
    #[arg(long, default_value = "config.yml")]
    pub config: String,
}

impl Args {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            emails: !self.no_emails,
            phones: !self.no_phones,
            entities: !self.no_entities,
            email_only: self.email_only,
            exclude_gov: self.no_gov,
        }
    }
}

pub fn ensure_csv_extension(output: &str) -> String {
    if output.contains(".csv") {
        output.to_string()
    } else {
        format!("{}.csv", output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_is_appended_once() {
        assert_eq!(ensure_csv_extension("leads"), "leads.csv");
        assert_eq!(ensure_csv_extension("leads.csv"), "leads.csv");
    }

    #[test]
    fn flags_invert_into_options() {
        let args = Args::parse_from(["lead-harvester", "--no-phones", "--no-gov"]);
        let options = args.extract_options();
        assert!(options.emails);
        assert!(!options.phones);
        assert!(options.entities);
        assert!(options.exclude_gov);
        assert!(!options.email_only);
    }

    #[test]
    fn engine_and_pages_parse_through_clap() {
        let args = Args::parse_from(["lead-harvester", "-e", "american", "--pages", "all"]);
        assert_eq!(args.engine, EngineSelection::American);
        assert!(args.pages.is_indefinite());
    }
}
