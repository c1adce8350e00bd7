pub mod books;

// Re-export handlers for convenience
pub use books::{
    get_catalog_info, get_popular_books, get_recommendations, get_titles, BookHandlerState,
    CatalogInfoResponse, PopularBooksResponse, PopularQuery, RecommendationQuery,
    RecommendationsResponse, TitlesQuery, TitlesResponse,
};
