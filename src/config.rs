use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    pub ner: NerConfig,
    pub lookups: LookupsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub results_per_page: usize,
    /// Location hint resolved once for the glocation engine.
    pub location: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Longest local part accepted when not in email-only mode.
    pub max_local_part: usize,
    /// 0 means unbounded, matching the historical spider.
    pub spider_max_depth: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NerConfig {
    /// HTTP entity-recognition service; entity extraction is skipped when unset.
    pub endpoint: Option<String>,
    /// Pages with more text than this skip entity extraction entirely.
    pub max_text_len: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupsConfig {
    pub tld_file: String,
    pub area_codes_file: String,
    pub first_names_file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                endpoint: "https://serpapi.com/search.json".to_string(),
                results_per_page: 100,
                location: "Rockville, MD".to_string(),
            },
            fetch: FetchConfig {
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                             (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3"
                    .to_string(),
                timeout_seconds: 30,
            },
            extract: ExtractConfig {
                max_local_part: 15,
                spider_max_depth: 0,
            },
            ner: NerConfig {
                endpoint: None,
                max_text_len: 100_000,
            },
            lookups: LookupsConfig {
                tld_file: "data/tld.txt".to_string(),
                area_codes_file: "data/area_codes.txt".to_string(),
                first_names_file: "data/first_names.txt".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
