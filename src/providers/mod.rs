/*!
 * Translation backend implementations.
 *
 * This module defines the capability the core needs from a translation
 * service and the clients that provide it:
 * - `google`: the public Google web-translate endpoint
 * - `mock`: scripted backends for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Result of a language detection call
#[derive(Debug, Clone)]
pub struct LanguageDetection {
    /// Detected ISO 639-1 language code
    pub language: String,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
}

/// Capability the dispatcher needs from a translation service.
///
/// Both calls are treated as slow, fallible and retryable; `rotate`
/// switches the client to an alternate service endpoint and identity
/// between retry attempts.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate `text` from `source` (or "auto") into `destination`
    async fn translate(
        &self,
        text: &str,
        source: &str,
        destination: &str,
    ) -> Result<String, ProviderError>;

    /// Detect the language of `sample`, with `hint` as a starting guess
    async fn detect_language(
        &self,
        sample: &str,
        hint: &str,
    ) -> Result<LanguageDetection, ProviderError>;

    /// Swap to an alternate service endpoint / user agent. Backends with a
    /// single identity may ignore this.
    fn rotate(&self) {}
}

pub mod google;
pub mod mock;
