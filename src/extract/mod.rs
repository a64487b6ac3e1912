mod emails;
mod entities;
mod phones;

use std::sync::Arc;

use regex::Regex;

use crate::config::ExtractConfig;
use crate::lookups::Lookups;
use crate::models::ExtractOptions;

/// Turns raw page text into validated contact candidates.
///
/// All filter data is injected at construction; the extractor itself is
/// immutable and shared across engine tasks. Deduplication lives in the
/// `RecordStore`, which the email pipeline consults mid-validation.
pub struct Extractor {
    email_regex: Regex,
    phone_regex: Regex,
    lookups: Arc<Lookups>,
    options: ExtractOptions,
    max_local_part: usize,
}

impl Extractor {
    pub fn new(lookups: Arc<Lookups>, options: ExtractOptions, config: &ExtractConfig) -> Self {
        Self {
            email_regex: Regex::new(r"[a-zA-Z0-9+_.-]+@[a-zA-Z0-9.-]+").unwrap(),
            // NANP: area code and exchange cannot start with 0 or 1.
            phone_regex: Regex::new(r"\(?\b[2-9][0-9]{2}\)?[-. ]?[2-9][0-9]{2}[-. ]?[0-9]{4}\b")
                .unwrap(),
            lookups,
            options,
            max_local_part: config.max_local_part,
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    fn lookups(&self) -> &Lookups {
        &self.lookups
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::config::Config;

    pub(crate) fn lookups() -> Arc<Lookups> {
        Arc::new(
            Lookups::parse(
                "com\nnet\norg\nio\nedu\ngov\nca\n",
                "202\n212\n410\n703\n",
                "alice\nbob\ncarol\njohn\nmary\n",
            )
            .unwrap(),
        )
    }

    pub(crate) fn extractor(options: ExtractOptions) -> Extractor {
        Extractor::new(lookups(), options, &Config::default().extract)
    }
}
