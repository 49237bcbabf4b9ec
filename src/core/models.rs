//! Core data models for translation

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One unit of translatable work: a title plus optional markup content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Record {
    /// Plain-text title, always translated
    pub title: String,
    /// Serialized markup content, translated text-node by text-node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Record {
    /// Create a record with content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Some(content.into()),
        }
    }

    /// Create a record without content
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
        }
    }
}

/// Position of one collected text leaf, in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLocation {
    /// Index of the document the leaf belongs to
    pub document_index: usize,
    /// Zero-based leaf counter local to that document
    pub position_in_document: usize,
}

/// Request body for the remote batch endpoint
#[derive(Debug, Serialize)]
pub struct TranslateBatchRequest<'a> {
    /// Texts to translate, order is preserved by the endpoint
    pub texts: &'a [String],
    /// Target language code
    pub target_lang: &'a str,
    /// Source language code, "auto" for detection
    pub source_lang: &'a str,
}

/// Success response body of the remote batch endpoint
#[derive(Debug, Deserialize)]
pub struct TranslateBatchResponse {
    /// Translations, one per input text, in input order
    pub translated_texts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_content_is_optional_in_json() {
        let record: Record = serde_json::from_str(r#"{"title": "Hello"}"#).unwrap();
        assert_eq!(record.title, "Hello");
        assert!(record.content.is_none());

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("content"));
    }

    #[test]
    fn test_batch_request_wire_shape() {
        let texts = vec!["a".to_string(), "b".to_string()];
        let request = TranslateBatchRequest {
            texts: &texts,
            target_lang: "vi",
            source_lang: "auto",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["texts"], serde_json::json!(["a", "b"]));
        assert_eq!(json["target_lang"], "vi");
        assert_eq!(json["source_lang"], "auto");
    }
}
