use super::{Catalog, CatalogError, Result};
use crate::config::CatalogConfig;
use crate::models::{BookRecord, PopularRecord};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// File names of the four datasets inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFiles {
    pub popular: String,
    pub titles: String,
    pub books: String,
    pub similarity: String,
}

impl Default for CatalogFiles {
    fn default() -> Self {
        Self {
            popular: "popular.json".to_string(),
            titles: "titles.json".to_string(),
            books: "books.json".to_string(),
            similarity: "similarity_scores.json".to_string(),
        }
    }
}

/// Loads the offline-produced datasets from a local directory.
///
/// Expected layout (JSON):
/// - `popular.json`: `[{"title", "author", "cover_url", "avg_rating", "num_ratings"}, ...]`
/// - `titles.json`: `["title", ...]` in similarity-matrix order
/// - `books.json`: `[{"title", "author", "cover_url", ...}, ...]`
/// - `similarity_scores.json`: `[[f64; n]; n]`
pub struct CatalogLoader {
    data_dir: PathBuf,
    files: CatalogFiles,
}

impl CatalogLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            files: CatalogFiles::default(),
        }
    }

    pub fn with_files(mut self, files: CatalogFiles) -> Self {
        self.files = files;
        self
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.data_dir).with_files(config.files.clone())
    }

    pub fn load(&self) -> Result<Catalog> {
        let started = Instant::now();

        let popular: Vec<PopularRecord> = self.read_json(&self.files.popular)?;
        let titles: Vec<String> = self.read_json(&self.files.titles)?;
        let books: Vec<BookRecord> = self.read_json(&self.files.books)?;
        let rows: Vec<Vec<f64>> = self.read_json(&self.files.similarity)?;

        let catalog = Catalog::from_rows(titles, rows, books, popular)?;

        info!(
            titles = catalog.len(),
            books = catalog.book_count(),
            popular = catalog.popular().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog loaded from {}",
            self.data_dir.display()
        );

        Ok(catalog)
    }

    fn read_json<T: DeserializeOwned>(&self, file_name: &str) -> Result<T> {
        let path = self.data_dir.join(file_name);
        debug!("Reading {}", path.display());

        let bytes = std::fs::read(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse { path, source })
    }
}
