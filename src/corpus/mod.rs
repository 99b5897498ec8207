// file: src/corpus/mod.rs
// description: document acquisition module exports
// reference: internal module structure

pub mod loader;
pub mod scanner;

pub use loader::{DocumentLoader, LoadedCorpus};
pub use scanner::{FileScanner, ScannedFile};
