// file: src/engine/chunker.rs
// description: fixed-length overlapping passage windows over raw document text
// reference: sliding window chunking

use crate::config::IndexConfig;
use crate::error::Result;

pub const DEFAULT_CHUNK_SIZE: usize = 600;
pub const DEFAULT_OVERLAP_SIZE: usize = 80;

/// Splits text into windows of `chunk_size` characters that share
/// `overlap_size` characters with their neighbour.
///
/// Sizes count Unicode scalar values, so multi-byte text is never cut inside a
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: usize,
    overlap_size: usize,
}

impl Chunker {
    pub fn new(chunk_size: usize, overlap_size: usize) -> Result<Self> {
        IndexConfig {
            chunk_size,
            overlap_size,
        }
        .validate()?;

        Ok(Self {
            chunk_size,
            overlap_size,
        })
    }

    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.overlap_size)
    }

    /// Returns the trimmed, non-empty windows of `text` in order.
    ///
    /// A text no longer than `chunk_size` yields at most one window; the
    /// cursor stops as soon as a window reaches the end of the text.
    pub fn chunk<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        let char_len = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut cursor = 0usize;

        while cursor < char_len {
            let end = char_len.min(cursor + self.chunk_size);
            let window = text[boundaries[cursor]..boundaries[end]].trim();
            if !window.is_empty() {
                chunks.push(window);
            }

            if end == char_len {
                break;
            }
            cursor = end.saturating_sub(self.overlap_size);
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
        }
    }
}
