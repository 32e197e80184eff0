/*!
 * Mock backend implementations for testing.
 *
 * The mock preserves the `id;text` tag structure of batches the way the
 * real endpoint is assumed to, so reassembly tests exercise the genuine
 * wire protocol:
 * - `MockBackend::uppercasing()` - succeeds, uppercases every batch
 * - `MockBackend::failing()` - every attempt errors
 * - `MockBackend::flaky(n)` - first n attempts error, then succeeds
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{LanguageDetection, TranslationBackend};

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, uppercasing the batch text
    Uppercasing,
    /// Always fails with an API error
    Failing,
    /// Fails the first `failures` attempts, then behaves like Uppercasing
    Flaky { failures: usize },
}

/// Scripted translation backend for tests
#[derive(Debug)]
pub struct MockBackend {
    behavior: MockBehavior,
    detected_language: String,
    detection_confidence: f64,
    request_count: Arc<AtomicUsize>,
    rotation_count: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a mock with the given behavior; detection reports "en" at
    /// full confidence unless overridden
    pub fn new(behavior: MockBehavior) -> Self {
        MockBackend {
            behavior,
            detected_language: "en".to_string(),
            detection_confidence: 1.0,
            request_count: Arc::new(AtomicUsize::new(0)),
            rotation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock that uppercases whole batches (tags are digits and survive)
    pub fn uppercasing() -> Self {
        Self::new(MockBehavior::Uppercasing)
    }

    /// Mock whose every translation attempt fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Mock that fails `failures` times before succeeding
    pub fn flaky(failures: usize) -> Self {
        Self::new(MockBehavior::Flaky { failures })
    }

    /// Override the scripted detection result
    pub fn with_detection(mut self, language: &str, confidence: f64) -> Self {
        self.detected_language = language.to_string();
        self.detection_confidence = confidence;
        self
    }

    /// Number of translation attempts made against this mock
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of rotate() calls observed
    pub fn rotation_count(&self) -> usize {
        self.rotation_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        _destination: &str,
    ) -> Result<String, ProviderError> {
        let attempt = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Uppercasing => Ok(text.to_uppercase()),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "simulated backend failure".to_string(),
            }),
            MockBehavior::Flaky { failures } => {
                if attempt < failures {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("simulated flaky failure (attempt #{})", attempt + 1),
                    })
                } else {
                    Ok(text.to_uppercase())
                }
            }
        }
    }

    async fn detect_language(
        &self,
        _sample: &str,
        _hint: &str,
    ) -> Result<LanguageDetection, ProviderError> {
        Ok(LanguageDetection {
            language: self.detected_language.clone(),
            confidence: self.detection_confidence,
        })
    }

    fn rotate(&self) {
        self.rotation_count.fetch_add(1, Ordering::SeqCst);
    }
}
