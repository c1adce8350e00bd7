//! Recommendation Metrics
//!
//! Prometheus metrics for catalog lookups, exposed on `/metrics`

use actix_web::{get, HttpResponse};
use error_types::{error_codes, error_types as kinds, ErrorResponse};
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Encoder, Histogram, IntCounter, IntCounterVec, IntGauge, TextEncoder,
};
use std::time::Duration;

static RECOMMENDATION_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "book_recommendation_requests_total",
        "Recommendation lookups by outcome (ok/not_found/invalid)",
        &["status"]
    )
    .expect("Failed to register recommendation requests metric")
});

static RECOMMENDATION_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "book_recommendation_duration_seconds",
        "Duration of a single recommendation lookup",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]
    )
    .expect("Failed to register recommendation duration metric")
});

static METADATA_MISSING_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "book_recommendation_metadata_missing_total",
        "Ranked titles dropped because no metadata record matched"
    )
    .expect("Failed to register metadata missing metric")
});

static POPULAR_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "book_popular_requests_total",
        "Popular book list requests"
    )
    .expect("Failed to register popular requests metric")
});

static CATALOG_TITLES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "book_catalog_titles",
        "Number of titles in the loaded similarity index"
    )
    .expect("Failed to register catalog titles metric")
});

/// Record a recommendation lookup outcome
pub fn record_recommendation(status: &str, duration: Duration) {
    RECOMMENDATION_REQUESTS_TOTAL
        .with_label_values(&[status])
        .inc();
    RECOMMENDATION_DURATION_SECONDS.observe(duration.as_secs_f64());
}

pub fn record_metadata_missing() {
    METADATA_MISSING_TOTAL.inc();
}

pub fn record_popular_request() {
    POPULAR_REQUESTS_TOTAL.inc();
}

pub fn set_catalog_titles(count: usize) {
    CATALOG_TITLES.set(count as i64);
}

/// GET /metrics
#[get("/metrics")]
pub async fn metrics_handler() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", err);
        return HttpResponse::InternalServerError().json(ErrorResponse::new(
            "Internal Server Error",
            "Failed to encode metrics",
            500,
            kinds::SERVER_ERROR,
            error_codes::INTERNAL_SERVER_ERROR,
        ));
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
