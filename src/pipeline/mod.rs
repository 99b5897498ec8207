// file: src/pipeline/mod.rs
// description: corpus loading progress module exports
// reference: pipeline orchestration

mod progress;

pub use progress::{LoadStats, ProgressTracker};
