use crate::catalog::Catalog;
use crate::metrics;
use crate::models::Recommendation;
use ndarray::ArrayView1;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// Number of recommendations returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("top_k must be a positive integer")]
    InvalidTopK,
}

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Item-item recommendation lookup over the precomputed similarity matrix.
///
/// Algorithm:
/// 1. Resolve the selected title to its row in the similarity matrix (exact match)
/// 2. Rank every other title by similarity, highest first; equal scores keep
///    title-index order
/// 3. Take the first `top_k` ranked titles
/// 4. Resolve each to its first metadata record; titles without metadata are
///    dropped from the result rather than failing the request
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Titles that can be passed to [`RecommendationEngine::recommend`], in index order.
    pub fn titles(&self) -> &[String] {
        self.catalog.titles()
    }

    pub fn recommend(&self, title: &str, top_k: usize) -> Result<Vec<Recommendation>> {
        let started = Instant::now();

        if top_k == 0 {
            metrics::record_recommendation("invalid", started.elapsed());
            return Err(RecommendError::InvalidTopK);
        }

        let Some(idx) = self.catalog.position_of(title) else {
            debug!("Recommendation lookup: '{}' not in title index", title);
            metrics::record_recommendation("not_found", started.elapsed());
            return Err(RecommendError::NotFound(title.to_string()));
        };

        let ranked = rank_similar(self.catalog.similarity_row(idx), idx);

        let mut recommendations = Vec::with_capacity(top_k.min(ranked.len()));
        for (candidate_idx, score) in ranked.into_iter().take(top_k) {
            let Some(candidate) = self.catalog.title_at(candidate_idx) else {
                continue;
            };

            match self.catalog.book_for_title(candidate) {
                Some(book) => recommendations.push(Recommendation {
                    title: book.title.clone(),
                    author: book.author.clone(),
                    cover_url: book.cover_url.clone(),
                    score,
                }),
                None => {
                    warn!(
                        selected = title,
                        candidate = candidate,
                        score = score,
                        "No metadata record for recommended title, skipping"
                    );
                    metrics::record_metadata_missing();
                }
            }
        }

        debug!(
            "Recommendation lookup: '{}' -> {} results (top_k={})",
            title,
            recommendations.len(),
            top_k
        );
        metrics::record_recommendation("ok", started.elapsed());

        Ok(recommendations)
    }
}

/// Rank all titles except `self_idx` by descending similarity.
///
/// The sort is stable, so equal scores keep ascending index order. The
/// selected title is excluded by index rather than by dropping the top
/// position, which keeps it out even when another title ties or beats its
/// self-similarity.
pub fn rank_similar(row: ArrayView1<'_, f64>, self_idx: usize) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(idx, _)| idx != self_idx)
        .collect();

    // Scores are finite (checked at catalog load)
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
}
