/// Book API Handlers
///
/// HTTP endpoints for popular books, the selectable title list and
/// item-item recommendations
use actix_web::{get, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::RecommendationConfig;
use crate::error::{AppError, Result};
use crate::models::{PopularRecord, Recommendation};
use crate::services::{PopularityView, RecommendationEngine};

/// Shared, read-only state for the book endpoints
pub struct BookHandlerState {
    pub catalog: Arc<Catalog>,
    pub engine: RecommendationEngine,
    pub popularity: PopularityView,
    pub config: RecommendationConfig,
}

impl BookHandlerState {
    pub fn new(catalog: Arc<Catalog>, config: RecommendationConfig) -> Self {
        Self {
            engine: RecommendationEngine::new(catalog.clone()),
            popularity: PopularityView::new(catalog.clone()),
            catalog,
            config,
        }
    }
}

/// Query parameters for GET /api/v1/books/popular
#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    /// Defaults to the whole popularity table
    pub limit: Option<usize>,
}

/// Query parameters for GET /api/v1/books/titles
#[derive(Debug, Deserialize)]
pub struct TitlesQuery {
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

/// Query parameters for GET /api/v1/books/recommendations
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Exact, case-sensitive title from the title list
    pub title: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PopularBooksResponse {
    pub books: Vec<PopularRecord>,
    pub count: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
    pub offset: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub title: String,
    pub recommendations: Vec<Recommendation>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogInfoResponse {
    pub titles: usize,
    pub books: usize,
    pub popular: usize,
    pub loaded_at: DateTime<Utc>,
}

fn validate_limit(limit: Option<usize>) -> Result<Option<usize>> {
    match limit {
        Some(0) => Err(AppError::ValidationError(
            "limit must be a positive integer".to_string(),
        )),
        other => Ok(other),
    }
}

/// GET /api/v1/books/popular
#[get("/api/v1/books/popular")]
pub async fn get_popular_books(
    query: web::Query<PopularQuery>,
    state: web::Data<BookHandlerState>,
) -> Result<HttpResponse> {
    let total = state.popularity.total();
    let limit = validate_limit(query.limit)?.unwrap_or(total);

    let books = state.popularity.list_popular(limit).to_vec();
    debug!("Popular books request: limit={} returned={}", limit, books.len());

    Ok(HttpResponse::Ok().json(PopularBooksResponse {
        count: books.len(),
        books,
        total,
    }))
}

/// GET /api/v1/books/titles
///
/// Titles accepted by the recommendation endpoint, in index order
#[get("/api/v1/books/titles")]
pub async fn get_titles(
    query: web::Query<TitlesQuery>,
    state: web::Data<BookHandlerState>,
) -> Result<HttpResponse> {
    let all = state.engine.titles();
    let limit = validate_limit(query.limit)?.unwrap_or(all.len());

    let titles: Vec<String> = all.iter().skip(query.offset).take(limit).cloned().collect();

    Ok(HttpResponse::Ok().json(TitlesResponse {
        titles,
        offset: query.offset,
        total: all.len(),
    }))
}

/// GET /api/v1/books/recommendations?title=...&top_k=...
#[get("/api/v1/books/recommendations")]
pub async fn get_recommendations(
    query: web::Query<RecommendationQuery>,
    state: web::Data<BookHandlerState>,
) -> Result<HttpResponse> {
    let top_k = query
        .top_k
        .unwrap_or(state.config.default_top_k)
        .min(state.config.max_top_k);

    debug!(
        "Recommendation request: title='{}' top_k={}",
        query.title, top_k
    );

    let recommendations = state.engine.recommend(&query.title, top_k)?;

    Ok(HttpResponse::Ok().json(RecommendationsResponse {
        title: query.title.clone(),
        count: recommendations.len(),
        recommendations,
    }))
}

/// GET /api/v1/catalog
#[get("/api/v1/catalog")]
pub async fn get_catalog_info(state: web::Data<BookHandlerState>) -> HttpResponse {
    HttpResponse::Ok().json(CatalogInfoResponse {
        titles: state.catalog.len(),
        books: state.catalog.book_count(),
        popular: state.popularity.total(),
        loaded_at: state.catalog.loaded_at(),
    })
}
