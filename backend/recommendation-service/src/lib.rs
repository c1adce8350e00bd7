pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;

pub use catalog::{Catalog, CatalogError, CatalogLoader};
pub use config::Config;
pub use error::{AppError, Result};
pub use services::{PopularityView, RecommendError, RecommendationEngine};

use actix_web::web;

/// Register every HTTP route served by this crate.
///
/// Expects `web::Data<handlers::BookHandlerState>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed or missing query parameters get the same JSON body as other errors
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(query_config)
        .route("/health", web::get().to(|| async { "OK" }))
        .service(handlers::get_popular_books)
        .service(handlers::get_titles)
        .service(handlers::get_recommendations)
        .service(handlers::get_catalog_info)
        .service(metrics::metrics_handler);
}
