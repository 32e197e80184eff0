/*!
 * Client for the public Google web-translate endpoint.
 *
 * Uses the `translate_a/single?client=gtx` API that the translate web
 * widget speaks: plain GET, no API key, JSON-array response. The service
 * host and user agent are rotated on demand so a failing or rate-limited
 * endpoint can be swapped out between retry attempts.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use rand::Rng;
use serde_json::Value;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{LanguageDetection, TranslationBackend};

/// Hosts known to serve the gtx endpoint
const SERVICE_HOSTS: &[&str] = &[
    "translate.googleapis.com",
    "translate.google.com",
    "translate.google.de",
    "translate.google.fr",
    "translate.google.es",
    "translate.google.co.kr",
];

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Google web-translate backend with rotating host and identity
#[derive(Debug)]
pub struct GoogleTranslate {
    client: reqwest::Client,
    host_index: AtomicUsize,
    agent_index: AtomicUsize,
}

impl GoogleTranslate {
    /// Builds a client with the default host list and a random identity
    pub fn new() -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let agent_index = rand::rng().random_range(0..USER_AGENTS.len());

        Ok(GoogleTranslate {
            client,
            host_index: AtomicUsize::new(0),
            agent_index: AtomicUsize::new(agent_index),
        })
    }

    fn host(&self) -> &'static str {
        SERVICE_HOSTS[self.host_index.load(Ordering::Relaxed) % SERVICE_HOSTS.len()]
    }

    fn user_agent(&self) -> &'static str {
        USER_AGENTS[self.agent_index.load(Ordering::Relaxed) % USER_AGENTS.len()]
    }

    fn endpoint(&self, text: &str, source: &str, destination: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("https://{}/translate_a/single", self.host()))
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("dt", "t")
            .append_pair("sl", source)
            .append_pair("tl", destination)
            .append_pair("q", text);
        Ok(url)
    }

    async fn call(&self, url: Url) -> Result<Value, ProviderError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent())
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Concatenates the translated segments of a gtx response
    fn extract_translation(data: &Value) -> Result<String, ProviderError> {
        let segments = data
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| ProviderError::ParseError("missing translation segments".to_string()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(text) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(text);
            }
        }
        Ok(translated)
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        destination: &str,
    ) -> Result<String, ProviderError> {
        let url = self.endpoint(text, source, destination)?;
        let data = self.call(url).await?;
        Self::extract_translation(&data)
    }

    async fn detect_language(
        &self,
        sample: &str,
        hint: &str,
    ) -> Result<LanguageDetection, ProviderError> {
        let url = self.endpoint(sample, hint, "en")?;
        let data = self.call(url).await?;

        let language = data
            .get(2)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ProviderError::ParseError("missing detected language".to_string()))?
            .to_string();
        // the endpoint omits the confidence field for unambiguous inputs
        let confidence = data.get(6).and_then(|v| v.as_f64()).unwrap_or(1.0);

        Ok(LanguageDetection { language, confidence })
    }

    fn rotate(&self) {
        let host = self.host_index.fetch_add(1, Ordering::Relaxed) + 1;
        let next_agent = rand::rng().random_range(0..USER_AGENTS.len());
        self.agent_index.store(next_agent, Ordering::Relaxed);
        debug!(
            "rotated translation service to {}",
            SERVICE_HOSTS[host % SERVICE_HOSTS.len()]
        );
    }
}
