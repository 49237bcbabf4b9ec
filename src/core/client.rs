//! Async client for the remote batch-translation endpoint

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{TranslateBatchRequest, TranslateBatchResponse};

/// Async client for the batch-translation endpoint with bounded concurrency
#[derive(Debug, Clone)]
pub struct BatchClient {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
    semaphore: Arc<Semaphore>,
}

impl BatchClient {
    /// Create a new client
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        let semaphore = Arc::new(Semaphore::new(config.concurrent_batches));

        Ok(Self {
            client,
            config: Arc::new(config),
            semaphore,
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::load()?;
        Self::new(config)
    }

    /// Current configuration
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate one ordered list of texts in a single request.
    ///
    /// The result carries one entry per input text, in input order. A
    /// non-success status fails with `Service`, an unparseable success body
    /// with `Protocol`. No retries; the caller decides how to recover.
    pub async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>> {
        let _permit = self.semaphore.acquire().await.unwrap();

        debug!("Submitting batch of {} texts", texts.len());

        let body = TranslateBatchRequest {
            texts,
            target_lang: &self.config.target_lang,
            source_lang: &self.config.source_lang,
        };

        let response = self
            .client
            .post(&self.config.api_endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TranslateBatchResponse =
            response
                .json()
                .await
                .map_err(|e| TranslationError::Protocol {
                    message: e.to_string(),
                })?;

        Ok(parsed.translated_texts)
    }

    /// Translate a flat list of texts in size-bounded, concurrency-bounded
    /// batches, preserving the flat ordering.
    ///
    /// The list is partitioned into contiguous chunks of at most
    /// `batch_size` texts. Results arrive in completion order and are
    /// restored to submission order by batch index before concatenation, so
    /// the output lines up 1:1 with the input. An empty input issues no
    /// requests; a single failed batch fails the whole call.
    pub async fn translate_texts(&self, texts: &[String]) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batches: Vec<&[String]> = texts.chunks(self.config.batch_size).collect();
        let total_batches = batches.len();
        debug!(
            "Translating {} texts in {} batches of up to {}",
            texts.len(),
            total_batches,
            self.config.batch_size
        );

        let batch_futures: Vec<_> = batches
            .into_iter()
            .enumerate()
            .map(|(batch_index, batch)| self.translate_indexed_batch(batch_index, batch))
            .collect();

        let mut results: Vec<(usize, Result<Vec<String>>)> = stream::iter(batch_futures)
            .buffer_unordered(self.config.concurrent_batches)
            .collect()
            .await;

        results.sort_by_key(|(batch_index, _)| *batch_index);

        let mut translated = Vec::with_capacity(texts.len());
        for (batch_index, result) in results {
            match result {
                Ok(mut batch_result) => translated.append(&mut batch_result),
                Err(e) => {
                    warn!("Batch {} of {} failed: {}", batch_index + 1, total_batches, e);
                    return Err(e);
                }
            }
        }

        Ok(translated)
    }

    /// Translate one batch, tagging the result with its submission index so
    /// completion-ordered results can be restored to input order.
    async fn translate_indexed_batch(
        &self,
        batch_index: usize,
        batch: &[String],
    ) -> (usize, Result<Vec<String>>) {
        (batch_index, self.translate_batch(batch).await)
    }
}
