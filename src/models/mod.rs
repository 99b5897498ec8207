// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod passage;
pub mod search_result;

pub use document::{Document, DocumentMetadata};
pub use passage::Passage;
pub use search_result::SearchResult;
