//! Catalog read services
//!
//! Both services borrow the shared, immutable [`Catalog`](crate::catalog::Catalog)
//! and never mutate it, so they can be cloned into every HTTP worker.

pub mod popularity;
pub mod recommendation;

pub use popularity::PopularityView;
pub use recommendation::{RecommendError, RecommendationEngine, DEFAULT_TOP_K};
