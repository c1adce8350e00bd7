//! Catalog Store
//!
//! Read-only data context holding everything the recommendation engine and the
//! popularity view read from:
//! - **Title Index**: distinct titles labelling the similarity matrix rows/columns
//! - **Similarity Matrix**: dense `n x n` score matrix aligned with the Title Index
//! - **Book metadata**: raw edition rows, duplicates per title allowed
//! - **Popularity table**: pre-sorted popular books
//!
//! Built once at startup (see [`loader::CatalogLoader`]) and shared behind an
//! `Arc`; nothing mutates it afterwards, so readers need no locking.

pub mod loader;

pub use loader::{CatalogFiles, CatalogLoader};

use crate::models::{BookRecord, PopularRecord};
use chrono::{DateTime, Utc};
use ndarray::{Array2, ArrayView1};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Similarity matrix row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Similarity matrix is {rows}x{cols}, expected a square matrix")]
    NotSquare { rows: usize, cols: usize },

    #[error("Title index has {titles} entries but similarity matrix dimension is {matrix}")]
    DimensionMismatch { titles: usize, matrix: usize },

    #[error("Duplicate title in title index: {0}")]
    DuplicateTitle(String),

    #[error("Non-finite similarity score at ({row}, {col})")]
    NonFiniteScore { row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

pub struct Catalog {
    titles: Vec<String>,
    title_positions: HashMap<String, usize>,
    similarity: Array2<f64>,
    books: Vec<BookRecord>,
    /// title -> index of the first matching row in `books`
    first_book_by_title: HashMap<String, usize>,
    popular: Vec<PopularRecord>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Build a catalog, validating that the title index and the similarity
    /// matrix agree on shape and that every score is finite.
    pub fn new(
        titles: Vec<String>,
        similarity: Array2<f64>,
        books: Vec<BookRecord>,
        popular: Vec<PopularRecord>,
    ) -> Result<Self> {
        let (rows, cols) = similarity.dim();
        if rows != cols {
            return Err(CatalogError::NotSquare { rows, cols });
        }
        if titles.len() != rows {
            return Err(CatalogError::DimensionMismatch {
                titles: titles.len(),
                matrix: rows,
            });
        }

        if let Some(((row, col), _)) = similarity.indexed_iter().find(|(_, s)| !s.is_finite()) {
            return Err(CatalogError::NonFiniteScore { row, col });
        }

        let mut title_positions = HashMap::with_capacity(titles.len());
        for (idx, title) in titles.iter().enumerate() {
            if title_positions.insert(title.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateTitle(title.clone()));
            }
        }

        let mut first_book_by_title = HashMap::new();
        for (idx, book) in books.iter().enumerate() {
            first_book_by_title.entry(book.title.clone()).or_insert(idx);
        }

        Ok(Self {
            titles,
            title_positions,
            similarity,
            books,
            first_book_by_title,
            popular,
            loaded_at: Utc::now(),
        })
    }

    /// Build a catalog from nested score rows as they come off disk.
    pub fn from_rows(
        titles: Vec<String>,
        rows: Vec<Vec<f64>>,
        books: Vec<BookRecord>,
        popular: Vec<PopularRecord>,
    ) -> Result<Self> {
        let n = rows.len();
        if let Some((row_idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(CatalogError::RaggedRow {
                row: row_idx,
                expected: n,
                found: row.len(),
            });
        }

        // Every row has exactly `n` entries from here on
        let similarity = Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]);
        Self::new(titles, similarity, books, popular)
    }

    /// Exact, case-sensitive title lookup.
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.title_positions.get(title).copied()
    }

    pub fn title_at(&self, idx: usize) -> Option<&str> {
        self.titles.get(idx).map(String::as_str)
    }

    /// Similarity of title `idx` to every title, indexed like the title index.
    ///
    /// Panics if `idx` is out of bounds; callers resolve `idx` through
    /// [`Catalog::position_of`].
    pub fn similarity_row(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.similarity.row(idx)
    }

    /// First metadata record (table order) carrying this title.
    pub fn book_for_title(&self, title: &str) -> Option<&BookRecord> {
        self.first_book_by_title
            .get(title)
            .and_then(|&idx| self.books.get(idx))
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn popular(&self) -> &[PopularRecord] {
        &self.popular
    }

    /// Number of titles in the title index.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("titles", &self.titles.len())
            .field("books", &self.books.len())
            .field("popular", &self.popular.len())
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_position_lookup_is_exact() {
        let catalog = abcd_catalog(abcd_books());

        assert_eq!(catalog.position_of("C"), Some(2));
        assert_eq!(catalog.position_of("c"), None);
        assert_eq!(catalog.position_of(" C"), None);
        assert_eq!(catalog.title_at(3), Some("D"));
        assert_eq!(catalog.title_at(4), None);
    }

    #[test]
    fn test_similarity_row_alignment() {
        let catalog = abcd_catalog(abcd_books());
        let row = catalog.similarity_row(0);

        assert_eq!(row.to_vec(), vec![1.0, 0.9, 0.2, 0.5]);
    }

    #[test]
    fn test_book_for_title_keeps_first_edition() {
        let mut books = abcd_books();
        books.push(book("B", "Reprint Author"));
        books.insert(0, book("D", "First D Author"));
        let catalog = abcd_catalog(books);

        assert_eq!(catalog.book_for_title("B").unwrap().author, "Author B");
        assert_eq!(catalog.book_for_title("D").unwrap().author, "First D Author");
        assert!(catalog.book_for_title("Z").is_none());
        assert_eq!(catalog.book_count(), 6);
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let err = Catalog::from_rows(
            titles(&["A", "B", "C"]),
            vec![vec![1.0, 0.5], vec![0.5, 1.0]],
            vec![],
            vec![],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::DimensionMismatch { titles: 3, matrix: 2 }
        ));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Catalog::from_rows(
            titles(&["A", "B"]),
            vec![vec![1.0, 0.5], vec![0.5]],
            vec![],
            vec![],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::RaggedRow { row: 1, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_rejects_non_square_matrix() {
        let matrix = Array2::<f64>::zeros((2, 3));
        let err = Catalog::new(titles(&["A", "B"]), matrix, vec![], vec![]).unwrap_err();

        assert!(matches!(err, CatalogError::NotSquare { rows: 2, cols: 3 }));
    }

    #[test]
    fn test_rejects_duplicate_titles() {
        let err = Catalog::from_rows(
            titles(&["A", "A"]),
            vec![vec![1.0, 0.5], vec![0.5, 1.0]],
            vec![],
            vec![],
        )
        .unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateTitle(t) if t == "A"));
    }

    #[test]
    fn test_rejects_nan_scores() {
        let err = Catalog::from_rows(
            titles(&["A", "B"]),
            vec![vec![1.0, f64::NAN], vec![0.5, 1.0]],
            vec![],
            vec![],
        )
        .unwrap_err();

        assert!(matches!(err, CatalogError::NonFiniteScore { row: 0, col: 1 }));
    }

    #[test]
    fn test_from_rows_keeps_full_precision() {
        let catalog = Catalog::from_rows(
            titles(&["A", "B"]),
            vec![vec![1.0, 0.900000001], vec![0.900000001, 1.0]],
            vec![],
            vec![],
        )
        .unwrap();

        assert_eq!(catalog.similarity_row(0)[1], 0.900000001);
        assert_eq!(catalog.similarity_row(1).to_vec(), vec![0.900000001, 1.0]);
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_rows(vec![], vec![], vec![], vec![]).unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
