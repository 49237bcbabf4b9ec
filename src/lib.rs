//! Markup Translator - batch translation for HTML-bearing records
//!
//! This library translates record collections (title + markup content)
//! through a remote batch endpoint while preserving the exact DOM structure
//! of each content field: text nodes are extracted in document order,
//! translated in size- and concurrency-bounded batches, and written back
//! into the tree they came from.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod processors;
pub mod server;
pub mod utils;

// Re-export key types for convenience
pub use crate::core::{
    client::BatchClient,
    config::TranslatorConfig,
    errors::{Result, TranslationError},
    models::{Record, TextLocation},
    pipeline::TranslationPipeline,
};

pub use crate::processors::markup::MarkupDocument;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
