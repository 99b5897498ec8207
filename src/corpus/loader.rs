// file: src/corpus/loader.rs
// description: turns scanned files or a json export into documents for indexing
// reference: frontmatter + markdown parsing, lossy utf-8 fallback

use crate::config::CorpusConfig;
use crate::corpus::scanner::{FileScanner, ScannedFile};
use crate::error::{Result, RetrievalError};
use crate::models::{Document, DocumentMetadata};
use crate::parser::{FrontmatterParser, MarkdownParser};
use crate::pipeline::{LoadStats, ProgressTracker};
use crate::utils::{OperationTimer, Validator};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

pub struct DocumentLoader {
    config: CorpusConfig,
    frontmatter: FrontmatterParser,
    markdown: MarkdownParser,
}

/// Documents in scan order plus loading counters.
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    pub documents: Vec<Document>,
    pub stats: LoadStats,
}

impl DocumentLoader {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            config,
            frontmatter: FrontmatterParser::new(),
            markdown: MarkdownParser::new(),
        }
    }

    /// Loads `path` as a json document array when it is a `.json` file,
    /// otherwise as a directory of document files.
    pub fn load(&self, path: &Path, show_progress: bool) -> Result<LoadedCorpus> {
        if path.is_file() && path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
            let documents = Self::load_json(path)?;
            let stats = LoadStats {
                files_loaded: 1,
                total_bytes: fs::metadata(path).map(|m| m.len()).unwrap_or(0),
                ..LoadStats::default()
            };
            return Ok(LoadedCorpus { documents, stats });
        }

        self.load_directory(path, show_progress)
    }

    pub fn load_json(path: &Path) -> Result<Vec<Document>> {
        Validator::validate_file_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| RetrievalError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        let documents: Vec<Document> = serde_json::from_str(&content)?;
        info!("Loaded {} documents from {}", documents.len(), path.display());
        Ok(documents)
    }

    /// Files that cannot be read or parsed are logged and counted as failed;
    /// they never reach the index.
    pub fn load_directory(&self, root: &Path, show_progress: bool) -> Result<LoadedCorpus> {
        let timer = OperationTimer::new("corpus load");
        let files = FileScanner::new(self.config.clone()).scan_directory(root)?;

        let tracker = if show_progress {
            ProgressTracker::new(files.len())
        } else {
            ProgressTracker::hidden(files.len())
        };

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            tracker.set_message(file.relative_path.clone());
            match self.load_file(file) {
                Ok(document) => {
                    tracker.inc_files_loaded(file.size);
                    documents.push(document);
                }
                Err(e) => {
                    tracker.inc_files_failed();
                    error!("Failed to load {}: {}", file.relative_path, e);
                }
            }
        }

        tracker.finish();
        timer.warn_if_slow(Duration::from_secs(5));
        timer.finish_with_count(documents.len(), "documents");

        Ok(LoadedCorpus {
            documents,
            stats: tracker.get_stats(),
        })
    }

    pub fn load_file(&self, file: &ScannedFile) -> Result<Document> {
        let bytes = fs::read(&file.path).map_err(|source| RetrievalError::FileOperation {
            path: file.path.clone(),
            source,
        })?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                debug!("Invalid UTF-8 in {}, decoding lossily", file.relative_path);
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let fallback_title = file
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.relative_path.clone());

        let mut metadata = DocumentMetadata {
            source_path: Some(file.path.display().to_string()),
            content_hash: Some(Document::compute_hash(&content)),
            tags: Vec::new(),
        };

        let (title, text) = if self.config.parse_markdown && Validator::is_markdown(&file.path) {
            let (frontmatter, body) = match self.frontmatter.extract(&file.relative_path, &content)? {
                Some((frontmatter, body)) => (Some(frontmatter), body),
                None => (None, content),
            };
            let parsed = self.markdown.parse(&body);

            let title = frontmatter
                .as_ref()
                .and_then(|f| f.title())
                .or_else(|| parsed.title())
                .map(str::to_string)
                .unwrap_or(fallback_title);

            if let Some(frontmatter) = frontmatter {
                metadata.tags = frontmatter.tags;
            }
            (title, parsed.plain_text)
        } else {
            (fallback_title, content)
        };

        Ok(Document::new(file.relative_path.clone(), title, text).with_metadata(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn scanned(temp: &TempDir, name: &str, content: &[u8]) -> ScannedFile {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        ScannedFile {
            path,
            relative_path: name.to_string(),
            size: content.len() as u64,
        }
    }

    #[test]
    fn test_markdown_with_frontmatter() {
        let temp = TempDir::new().unwrap();
        let file = scanned(
            &temp,
            "week3.md",
            b"---\ntitle: CPU Scheduling\ntags: [os]\n---\n# Heading\n\nRound **robin** slices.",
        );

        let document = DocumentLoader::new(CorpusConfig::default()).load_file(&file).unwrap();

        assert_eq!(document.id, "week3.md");
        assert_eq!(document.title, "CPU Scheduling");
        assert_eq!(document.text, "Heading\nRound robin slices.");
        assert_eq!(document.tags(), &["os".to_string()]);
        assert!(document.metadata.unwrap().content_hash.is_some());
    }

    #[test]
    fn test_markdown_title_from_heading_then_stem() {
        let temp = TempDir::new().unwrap();
        let loader = DocumentLoader::new(CorpusConfig::default());

        let headed = scanned(&temp, "paging.md", b"# Virtual Memory\n\nPages and frames.");
        assert_eq!(loader.load_file(&headed).unwrap().title, "Virtual Memory");

        let bare = scanned(&temp, "threads.md", b"Just text.");
        assert_eq!(loader.load_file(&bare).unwrap().title, "threads");
    }

    #[test]
    fn test_plain_text_is_kept_verbatim() {
        let temp = TempDir::new().unwrap();
        let file = scanned(&temp, "raw.txt", b"# not a heading\nline two");

        let document = DocumentLoader::new(CorpusConfig::default()).load_file(&file).unwrap();
        assert_eq!(document.title, "raw");
        assert_eq!(document.text, "# not a heading\nline two");
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let temp = TempDir::new().unwrap();
        let file = scanned(&temp, "bad.txt", &[b'o', b'k', 0xff, b' ', b'x']);

        let document = DocumentLoader::new(CorpusConfig::default()).load_file(&file).unwrap();
        assert!(document.text.starts_with("ok"));
        assert!(document.text.ends_with(" x"));
    }

    #[test]
    fn test_load_directory_counts_failures() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.md"), "# A\n\nalpha").unwrap();
        fs::write(temp.path().join("b.md"), "---\ntitle: [broken\n---\nbeta").unwrap();
        fs::write(temp.path().join("c.txt"), "gamma").unwrap();

        let loaded = DocumentLoader::new(CorpusConfig::default())
            .load(temp.path(), false)
            .unwrap();

        let ids: Vec<&str> = loaded.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a.md", "c.txt"]);
        assert_eq!(loaded.stats.files_loaded, 2);
        assert_eq!(loaded.stats.files_failed, 1);
    }

    #[test]
    fn test_load_json_documents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("documents.json");
        fs::write(
            &path,
            r#"[{"id":"d1","title":"One","text":"alpha beta alpha"},{"id":"d2"}]"#,
        )
        .unwrap();

        let loaded = DocumentLoader::new(CorpusConfig::default())
            .load(&path, false)
            .unwrap();
        assert_eq!(loaded.documents.len(), 2);
        assert_eq!(loaded.documents[0], Document::new("d1", "One", "alpha beta alpha"));
        assert_eq!(loaded.documents[1].text, "");
    }

    #[test]
    fn test_load_json_rejects_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("documents.json");
        fs::write(&path, "{not json").unwrap();

        let result = DocumentLoader::load_json(&path);
        assert!(matches!(result, Err(RetrievalError::Serialization(_))));
    }
}
