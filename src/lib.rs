// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use config::{Config, CorpusConfig, IndexConfig, QueryConfig};
pub use corpus::{DocumentLoader, FileScanner, LoadedCorpus, ScannedFile};
pub use engine::{
    Chunker, IndexBuilder, IndexSnapshot, IndexStats, IndexedPassage, KnowledgeBase,
    ScoredPassage, SnapshotStore, WeightVector, tokenize,
};
pub use error::{Result, RetrievalError};
pub use exporter::{ExportManifest, ExportedResults, JsonExporter};
pub use models::{Document, DocumentMetadata, Passage, SearchResult};
pub use parser::{Frontmatter, FrontmatterParser, MarkdownParser, ParsedMarkdown};
pub use pipeline::{LoadStats, ProgressTracker};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};
