use crate::catalog::Catalog;
use crate::metrics;
use crate::models::PopularRecord;
use std::sync::Arc;

/// Popular books view.
///
/// The popularity table is ranked offline; this view only slices it and never
/// re-sorts.
#[derive(Clone)]
pub struct PopularityView {
    catalog: Arc<Catalog>,
}

impl PopularityView {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// First `limit` popular books in table order. A `limit` beyond the table
    /// length returns the whole table.
    pub fn list_popular(&self, limit: usize) -> &[PopularRecord] {
        metrics::record_popular_request();

        let popular = self.catalog.popular();
        &popular[..limit.min(popular.len())]
    }

    pub fn total(&self) -> usize {
        self.catalog.popular().len()
    }
}
