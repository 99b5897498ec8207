// file: src/exporter/json.rs
// description: json export of ranked query results and index statistics

use crate::engine::IndexStats;
use crate::error::Result;
use crate::models::SearchResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedResults {
    pub query: String,
    pub generation: u64,
    pub exported_at: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_results: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the results file plus a `manifest.json` describing it.
    pub fn export_results(
        &self,
        query: &str,
        generation: u64,
        results: &[SearchResult],
        pretty: bool,
    ) -> Result<ExportManifest> {
        let now = Utc::now();
        let file_name = format!("results-{}.json", now.format("%Y%m%dT%H%M%S%.3fZ"));

        let exported = ExportedResults {
            query: query.to_string(),
            generation,
            exported_at: now.to_rfc3339(),
            results: results.to_vec(),
        };
        self.write_json(&file_name, &exported, pretty)?;

        let manifest = ExportManifest {
            exported_at: exported.exported_at.clone(),
            total_results: results.len(),
            files: vec![file_name],
        };
        self.write_json("manifest.json", &manifest, pretty)?;

        info!(
            "Export complete: {} results written to {}",
            manifest.total_results,
            self.output_dir.display()
        );
        Ok(manifest)
    }

    pub fn export_stats(&self, stats: &IndexStats, pretty: bool) -> Result<PathBuf> {
        self.write_json("index-stats.json", stats, pretty)
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T, pretty: bool) -> Result<PathBuf> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(file_name);
        fs::write(&path, json)?;
        Ok(path)
    }
}
