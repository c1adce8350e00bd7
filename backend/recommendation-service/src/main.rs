use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_recommendation_service::config::Config;
use book_recommendation_service::handlers::BookHandlerState;
use book_recommendation_service::{configure, metrics, CatalogLoader};

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{},actix_web=info", config.app.log_level).into());

    if config.app.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_thread_ids(true)
                    .with_target(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    tracing::info!(
        "Starting book-recommendation-service v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Environment: {}", config.app.env);

    // Catalog is loaded once and shared read-only across workers
    let catalog = CatalogLoader::from_config(&config.catalog)
        .load()
        .map_err(|e| {
            tracing::error!("Catalog loading failed: {}", e);
            e
        })
        .with_context(|| {
            format!(
                "failed to load catalog from {}",
                config.catalog.data_dir.display()
            )
        })?;
    metrics::set_catalog_titles(catalog.len());

    let state = web::Data::new(BookHandlerState::new(
        Arc::new(catalog),
        config.recommendation.clone(),
    ));

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("HTTP server listening on {}", bind_addr);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(&bind_addr)
        .with_context(|| format!("failed to bind {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

    Ok(())
}
