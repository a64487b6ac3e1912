use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{error, info, warn};
use url::Url;

use crate::config::Config;
use crate::crawler::{plain_text, spider_targets, Fetcher};
use crate::extract::Extractor;
use crate::lookups::Lookups;
use crate::models::{ExtractOptions, PageCount, Result, SearchResult};
use crate::ner::{EntityRecognizer, HttpRecognizer};
use crate::report::Reporter;
use crate::search::{Engine, EngineSelection, SerpClient};
use crate::store::RecordStore;

/// One scraping run: drives the selected engines through the search API,
/// feeds every result page through fetch -> extract -> store, and spiders
/// same-domain links off pages that yielded an email.
pub struct ScrapeRunner {
    extractor: Extractor,
    store: RecordStore,
    fetcher: Fetcher,
    serp: SerpClient,
    recognizer: Option<Box<dyn EntityRecognizer>>,
    reporter: Reporter,
    exclude_gov: bool,
    max_text_len: usize,
    spider_max_depth: usize,
    indefinite: bool,
}

impl ScrapeRunner {
    pub fn new(
        config: &Config,
        options: ExtractOptions,
        lookups: Arc<Lookups>,
        api_key: String,
        output: &str,
        pages: PageCount,
        use_ner: bool,
    ) -> Result<Self> {
        let recognizer: Option<Box<dyn EntityRecognizer>> = match (&config.ner.endpoint, use_ner) {
            (Some(endpoint), true) => Some(Box::new(HttpRecognizer::new(
                endpoint,
                config.fetch.timeout_seconds,
            )?)),
            _ => None,
        };

        Ok(Self {
            extractor: Extractor::new(lookups, options, &config.extract),
            store: RecordStore::new(),
            fetcher: Fetcher::new(&config.fetch)?,
            serp: SerpClient::new(&config.search, api_key, config.fetch.timeout_seconds)?,
            recognizer,
            reporter: Reporter::create(output, pages.is_indefinite())?,
            exclude_gov: options.exclude_gov,
            max_text_len: config.ner.max_text_len,
            spider_max_depth: config.extract.spider_max_depth,
            indefinite: pages.is_indefinite(),
        })
    }

    pub async fn run(
        self: Arc<Self>,
        query: String,
        pages: PageCount,
        selection: EngineSelection,
    ) -> Result<()> {
        let engines = selection.engines();
        if let [engine] = engines.as_slice() {
            self.scrape_engine(*engine, &query, pages).await;
            return Ok(());
        }

        // One task per engine, all feeding the shared store.
        let mut handles = Vec::new();
        for engine in engines {
            let runner = Arc::clone(&self);
            let query = query.clone();
            handles.push(tokio::spawn(async move {
                runner.scrape_engine(engine, &query, pages).await;
            }));
        }
        for handle in handles {
            if let Err(e) = handle.await {
                error!("Engine task failed: {}", e);
            }
        }
        Ok(())
    }

    async fn scrape_engine(&self, engine: Engine, query: &str, pages: PageCount) {
        let mut index = 0usize;
        loop {
            if let PageCount::Bounded(limit) = pages {
                if index >= limit as usize {
                    break;
                }
            }

            match self.serp.search(engine, query, index).await {
                Ok(results) => {
                    info!(
                        "{}: {} results on page {}",
                        engine.name(),
                        results.len(),
                        index
                    );
                    for result in &results {
                        self.process_result(result).await;
                    }
                }
                Err(e) => {
                    warn!("{}: search failed on page {}: {}", engine.name(), index, e);
                }
            }
            index += 1;
        }
    }

    /// Processes one search result plus everything the spider reaches from
    /// it. The spider is an explicit queue bounded by the shared visited
    /// set, not call-stack recursion, so an interrupt always lands between
    /// pages and a depth cap is honored when configured.
    async fn process_result(&self, result: &SearchResult) {
        if self.exclude_gov && result.link.contains(".gov") {
            info!("Skipping .gov page: {}", result.link);
            return;
        }
        let origin = match Url::parse(&result.link)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
        {
            Some(host) => host,
            None => {
                warn!("Skipping result with unparseable link: {}", result.link);
                return;
            }
        };

        let mut queue: VecDeque<(String, usize)> = VecDeque::new();
        self.store.mark_visited(&result.link);
        queue.push_back((result.link.clone(), 0));

        while let Some((url, depth)) = queue.pop_front() {
            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => {
                    info!("Scraping page: {}", url);
                    html
                }
                Err(e) => {
                    warn!("Could not scrape page {}: {}", url, e);
                    continue;
                }
            };

            let text = plain_text(&html);
            // Facts from spidered pages carry the originating result's title
            // but their own URL as the source link.
            let found_email = self.harvest(&result.title, &url, &text).await;

            if found_email && (self.spider_max_depth == 0 || depth < self.spider_max_depth) {
                for target in spider_targets(&html, &url, &origin) {
                    if self.store.mark_visited(&target) {
                        queue.push_back((target, depth + 1));
                    }
                }
            }

            if self.indefinite {
                if let Err(e) = self.reporter.append_snapshot(&self.store.by_link()) {
                    warn!("Could not append report snapshot: {}", e);
                }
            }
        }
    }

    /// Extraction for one page of text. Returns whether any email was newly
    /// accepted, which is what arms the spider.
    async fn harvest(&self, title: &str, link: &str, text: &str) -> bool {
        let mut found_email = false;

        for email in self.extractor.extract_emails(text, &self.store) {
            if self.store.accept_email(&email, title, link) {
                info!("Found email: {}", email);
                found_email = true;
            }
        }

        for phone in self.extractor.extract_phones(text) {
            if self.store.accept_phone(&phone, title, link) {
                info!("Found phone: {}", phone);
            }
        }

        if self.extractor.options().entities {
            if let Some(recognizer) = &self.recognizer {
                if text.len() > self.max_text_len {
                    info!(
                        "Text too long for entity recognition ({} chars), skipping: {}",
                        text.len(),
                        link
                    );
                } else {
                    match recognizer.recognize(text).await {
                        Ok(raw) => {
                            for hit in self.extractor.filter_entities(&raw) {
                                if self.store.accept_entity(&hit.text, &hit.label, title, link) {
                                    info!("Found entity: {} ({})", hit.text, hit.label);
                                }
                            }
                        }
                        Err(e) => warn!("Entity recognition failed for {}: {}", link, e),
                    }
                }
            }
        }

        found_email
    }

    /// Best-effort drain: called after a normal finish or an interrupt. In
    /// indefinite mode every page already flushed a snapshot, so only batch
    /// runs write here.
    pub fn flush(&self) -> Result<()> {
        if !self.indefinite {
            self.reporter.write_batch(&self.store.by_link())?;
        }
        let (emails, phones, entities) = self.store.counts();
        info!(
            "Report at {}: {} emails, {} phones, {} entities",
            self.reporter.path().display(),
            emails,
            phones,
            entities
        );
        Ok(())
    }
}
