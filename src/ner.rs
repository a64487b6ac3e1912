use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::models::Result;

/// Black-box entity classifier. Implementations map plain text to
/// `entity text -> label` (spaCy-style labels: PERSON, ORG, DATE, ...).
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<HashMap<String, String>>;
}

#[derive(Debug, Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: HashMap<String, String>,
}

/// Talks to an external NER service: POST `{"text": ...}`, receive
/// `{"entities": {"Bob Smith": "PERSON", ...}}`.
pub struct HttpRecognizer {
    client: Client,
    endpoint: String,
}

impl HttpRecognizer {
    pub fn new(endpoint: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl EntityRecognizer for HttpRecognizer {
    async fn recognize(&self, text: &str) -> Result<HashMap<String, String>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("NER service error: {}", response.status()).into());
        }

        let data: NerResponse = response.json().await?;
        Ok(data.entities)
    }
}
