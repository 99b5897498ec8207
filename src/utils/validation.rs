// file: src/utils/validation.rs
// description: input validation and text helpers for corpus loading and display
// reference: input validation patterns

use crate::error::{Result, RetrievalError};
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            RetrievalError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(RetrievalError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(RetrievalError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(RetrievalError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Case-insensitive match of the file extension against `allowed`.
    pub fn validate_extension(path: &Path, allowed: &[String]) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension {
            Some(ext) if allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)) => Ok(()),
            _ => Err(RetrievalError::Validation(format!(
                "Unsupported document type: {}",
                path.display()
            ))),
        }
    }

    pub fn is_markdown(path: &Path) -> bool {
        matches!(
            path.extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase)
                .as_deref(),
            Some("md") | Some("markdown")
        )
    }

    pub fn validate_top_k(k: usize) -> Result<()> {
        if k == 0 {
            return Err(RetrievalError::Validation(
                "Result limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sanitize_file_path(path: &str) -> String {
        let mut sanitized = path.replace('\\', "/").trim().to_string();
        while sanitized.contains("//") {
            sanitized = sanitized.replace("//", "/");
        }
        sanitized
    }

    /// Cuts after `max_chars` characters, never inside a multi-byte character.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        }
    }
}
