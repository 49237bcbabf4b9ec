//! Translation pipeline orchestration

use tracing::{info, warn};

use crate::core::client::BatchClient;
use crate::core::config::TranslatorConfig;
use crate::core::errors::Result;
use crate::core::models::Record;
use crate::processors::markup::{extract_text_nodes, reinsert_text_nodes, MarkupDocument};

/// Linear pipeline translating record lists while preserving markup
/// structure.
///
/// Stateless across invocations: every call parses, translates and
/// serializes from scratch.
#[derive(Debug, Clone)]
pub struct TranslationPipeline {
    client: BatchClient,
}

/// Parse every record's content, keeping list positions for absent content
fn parse_documents(records: &[Record]) -> Vec<Option<MarkupDocument>> {
    records
        .iter()
        .map(|record| record.content.as_deref().map(MarkupDocument::parse))
        .collect()
}

impl TranslationPipeline {
    /// Create a pipeline around an existing client
    pub fn new(client: BatchClient) -> Self {
        Self { client }
    }

    /// Create from environment configuration
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(BatchClient::from_env()?))
    }

    /// Current configuration
    pub fn config(&self) -> &TranslatorConfig {
        self.client.config()
    }

    /// Translate a list of records: titles in one batch call, content text
    /// nodes in size- and concurrency-bounded batches, markup structure
    /// untouched.
    ///
    /// A failed batch call aborts the whole invocation with no partial
    /// results; a missing or empty translation for an individual title
    /// falls back to the original title.
    pub async fn translate(&self, mut records: Vec<Record>) -> Result<Vec<Record>> {
        if records.is_empty() {
            return Ok(records);
        }

        // Titles go through one unchunked batch call
        let titles: Vec<String> = records.iter().map(|record| record.title.clone()).collect();
        let translated_titles = self.client.translate_batch(&titles).await?;
        for (record, translated) in records.iter_mut().zip(&translated_titles) {
            if !translated.is_empty() {
                record.title = translated.clone();
            }
        }

        // The documents are dropped before the translation requests go out
        // and re-parsed for reinsertion; parsing is deterministic, so the
        // second tree visits text leaves in exactly the order the index was
        // built against.
        let (flat_texts, index) = {
            let documents = parse_documents(&records);
            extract_text_nodes(&documents)
        };

        let translated_texts = if flat_texts.is_empty() {
            Vec::new()
        } else {
            self.client.translate_texts(&flat_texts).await?
        };

        if !flat_texts.is_empty() && translated_texts.len() != flat_texts.len() {
            warn!(
                "Translated list length {} does not match extracted list length {}",
                translated_texts.len(),
                flat_texts.len()
            );
        }

        let documents = parse_documents(&records);
        let untranslated = reinsert_text_nodes(&documents, &index, &translated_texts);
        if untranslated > 0 {
            warn!("{} text leaves kept their original text", untranslated);
        }

        for (record, document) in records.iter_mut().zip(&documents) {
            if let Some(document) = document {
                record.content = Some(document.render()?);
            }
        }

        info!(
            "Translated {} records ({} text leaves)",
            records.len(),
            flat_texts.len()
        );

        Ok(records)
    }
}
