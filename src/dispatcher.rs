/*!
 * Concurrent batch dispatch with retry/fallback.
 *
 * One task is spawned per batch; completions carry no ordering guarantee
 * and none is needed, since reassembly is driven entirely by the positional
 * tags inside each batch. A batch whose every retry fails yields its
 * original untranslated text — degraded output, never an aborted run.
 */

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};

use crate::errors::SubtitleError;
use crate::providers::TranslationBackend;

/// Ceiling applied to the configured retry count
pub const MAX_RETRIES: u32 = 10;

/// Characters sampled from the first batch for language detection
const DETECTION_SAMPLE_CHARS: usize = 80;

/// Detections below this confidence fall back to "auto"
const MIN_DETECTION_CONFIDENCE: f64 = 0.3;

/// Drives translation calls for the batches of one file
pub struct Dispatcher {
    backend: Arc<dyn TranslationBackend>,
    retries: u32,
}

impl Dispatcher {
    /// Creates a dispatcher; retry counts above [`MAX_RETRIES`] are clamped
    pub fn new(backend: Arc<dyn TranslationBackend>, retries: u32) -> Self {
        let clamped = if retries > MAX_RETRIES {
            warn!("limited to {} retries, {} were requested", MAX_RETRIES, retries);
            MAX_RETRIES
        } else {
            retries
        };
        Dispatcher { backend, retries: clamped }
    }

    /// Resolves the source language before dispatch.
    ///
    /// Samples the first non-empty batch, detects its language and refuses
    /// to proceed when the file is already written in the destination
    /// language. Detection failures keep the configured source; low
    /// confidence falls back to "auto".
    pub async fn resolve_source_language(
        &self,
        batches: &[String],
        configured: &str,
        destination: &str,
    ) -> Result<String, SubtitleError> {
        let Some(first) = batches.iter().find(|b| !b.is_empty()) else {
            return Ok(configured.to_string());
        };

        let sample = detection_sample(first);
        let detected = match self.backend.detect_language(sample, "auto").await {
            Ok(detection) if detection.confidence < MIN_DETECTION_CONFIDENCE => {
                debug!(
                    "low detection confidence {:.2} for '{}', falling back to auto",
                    detection.confidence, detection.language
                );
                "auto".to_string()
            }
            Ok(detection) => detection.language,
            Err(e) => {
                warn!("language detection failed ({}), keeping '{}'", e, configured);
                configured.to_string()
            }
        };

        if detected == destination {
            return Err(SubtitleError::SameLanguage(detected));
        }

        if configured != "auto" && detected != configured {
            warn!("using '{}' as source language instead of '{}'", detected, configured);
        }

        Ok(detected)
    }

    /// Translates every batch concurrently and gathers the results.
    ///
    /// Results are collected keyed by batch identity, not arrival order;
    /// the returned list order is irrelevant to reassembly.
    pub async fn translate_all(
        &self,
        batches: Vec<String>,
        source: &str,
        destination: &str,
    ) -> Vec<String> {
        let mut tasks = Vec::with_capacity(batches.len());

        for (batch_idx, batch) in batches.into_iter().enumerate() {
            if batch.is_empty() {
                continue;
            }
            let backend = Arc::clone(&self.backend);
            let source = source.to_string();
            let destination = destination.to_string();
            let retries = self.retries;

            tasks.push(tokio::spawn(async move {
                let translated =
                    translate_with_fallback(backend, &batch, &source, &destination, retries).await;
                (batch_idx, translated)
            }));
        }

        let mut keyed: Vec<(usize, String)> = Vec::with_capacity(tasks.len());
        for joined in join_all(tasks).await {
            match joined {
                Ok(pair) => keyed.push(pair),
                Err(e) => warn!("translation task panicked: {}", e),
            }
        }
        keyed.sort_by_key(|(batch_idx, _)| *batch_idx);
        keyed.into_iter().map(|(_, text)| text).collect()
    }
}

/// Translates one batch, rotating the backend configuration between
/// attempts. Exhausted retries return the original text verbatim.
async fn translate_with_fallback(
    backend: Arc<dyn TranslationBackend>,
    batch: &str,
    source: &str,
    destination: &str,
    retries: u32,
) -> String {
    let mut attempts_left = retries;
    loop {
        match backend.translate(batch, source, destination).await {
            Ok(text) => return text,
            Err(e) if attempts_left > 0 => {
                warn!(
                    "translation failed ({}); retrying with a different service endpoint, attempts left [{}]",
                    e, attempts_left
                );
                backend.rotate();
                attempts_left -= 1;
            }
            Err(e) => {
                warn!("translation failed ({}); no retry attempts left, returning original text", e);
                return batch.to_string();
            }
        }
    }
}

/// Truncates a detection sample to at most [`DETECTION_SAMPLE_CHARS`]
/// bytes, cutting at the last whitespace so no word is split. Falls back
/// to the nearest char boundary when the window holds a single word.
fn detection_sample(text: &str) -> &str {
    if text.len() <= DETECTION_SAMPLE_CHARS {
        return text;
    }
    let mut cut = 0;
    let mut boundary = 0;
    for (idx, ch) in text.char_indices() {
        if idx + ch.len_utf8() > DETECTION_SAMPLE_CHARS {
            break;
        }
        boundary = idx + ch.len_utf8();
        if ch.is_whitespace() {
            cut = idx;
        }
    }
    &text[..if cut > 0 { cut } else { boundary }]
}
