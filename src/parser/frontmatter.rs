// file: src/parser/frontmatter.rs
// description: YAML frontmatter extraction from markdown documents
// reference: https://docs.rs/yaml-rust

use crate::error::{Result, RetrievalError};
use std::collections::HashMap;
use yaml_rust::{Yaml, YamlLoader};

pub struct FrontmatterParser;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub fields: HashMap<String, String>,
    pub tags: Vec<String>,
}

impl Frontmatter {
    pub fn title(&self) -> Option<&str> {
        self.fields
            .get("title")
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }
}

impl FrontmatterParser {
    pub fn new() -> Self {
        Self
    }

    /// Splits a leading `---` block off `content`. Returns `None` when the
    /// document has no frontmatter.
    pub fn extract(&self, file: &str, content: &str) -> Result<Option<(Frontmatter, String)>> {
        let trimmed = content.trim_start_matches('\u{feff}');
        let Some((yaml_content, remaining_content)) = Self::split_fences(trimmed) else {
            return Ok(None);
        };

        let docs =
            YamlLoader::load_from_str(yaml_content).map_err(|e| RetrievalError::DocumentParse {
                file: file.to_string(),
                message: format!("YAML frontmatter error: {}", e),
            })?;

        let mut frontmatter = Frontmatter::default();

        if let Some(Yaml::Hash(hash)) = docs.first() {
            for (key, value) in hash {
                let Yaml::String(key) = key else {
                    continue;
                };

                if key == "tags" {
                    frontmatter.tags = Self::tag_list(value);
                } else if let Some(text) = Self::scalar_text(value) {
                    frontmatter.fields.insert(key.clone(), text);
                }
            }
        }

        Ok(Some((frontmatter, remaining_content.to_string())))
    }

    /// Fences are lines consisting of exactly `---`; dashes inside a value
    /// do not close the block.
    fn split_fences(content: &str) -> Option<(&str, &str)> {
        let first_line_end = content.find('\n')?;
        if content[..first_line_end].trim_end() != "---" {
            return None;
        }

        let rest = &content[first_line_end + 1..];
        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let yaml = rest[..offset].trim();
                let body = rest[offset + line.len()..].trim();
                return Some((yaml, body));
            }
            offset += line.len();
        }
        None
    }

    fn scalar_text(value: &Yaml) -> Option<String> {
        match value {
            Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
            Yaml::Integer(i) => Some(i.to_string()),
            Yaml::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Accepts `tags: [a, b]` or `tags: "a, b"`.
    fn tag_list(value: &Yaml) -> Vec<String> {
        match value {
            Yaml::Array(items) => items.iter().filter_map(Self::scalar_text).collect(),
            Yaml::String(s) => s
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}
