use crate::catalog::CatalogFiles;
use crate::services::DEFAULT_TOP_K;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub catalog: CatalogConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        matches!(
            self.env.to_ascii_lowercase().as_str(),
            "production" | "staging"
        )
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub files: CatalogFiles,
}

#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// Used when a request omits `top_k`
    pub default_top_k: usize,
    /// Upper bound applied to requested `top_k`
    pub max_top_k: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = CatalogFiles::default();
        let recommendation = RecommendationConfig {
            default_top_k: parse_var("DEFAULT_TOP_K", &DEFAULT_TOP_K.to_string())?,
            max_top_k: parse_var("MAX_TOP_K", "50")?,
        };

        if recommendation.default_top_k == 0 {
            anyhow::bail!("DEFAULT_TOP_K must be positive");
        }
        if recommendation.max_top_k < recommendation.default_top_k {
            anyhow::bail!(
                "MAX_TOP_K ({}) must be >= DEFAULT_TOP_K ({})",
                recommendation.max_top_k,
                recommendation.default_top_k
            );
        }

        Ok(Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                host: env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("APP_PORT", "8080")?,
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            catalog: CatalogConfig {
                data_dir: env::var("CATALOG_DATA_DIR")
                    .unwrap_or_else(|_| "./data".to_string())
                    .into(),
                files: CatalogFiles {
                    popular: env::var("CATALOG_POPULAR_FILE").unwrap_or(defaults.popular),
                    titles: env::var("CATALOG_TITLES_FILE").unwrap_or(defaults.titles),
                    books: env::var("CATALOG_BOOKS_FILE").unwrap_or(defaults.books),
                    similarity: env::var("CATALOG_SIMILARITY_FILE")
                        .unwrap_or(defaults.similarity),
                },
            },
            recommendation,
        })
    }
}

fn parse_var<T>(key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{} must be a valid {}", key, std::any::type_name::<T>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "LOG_LEVEL",
        "CATALOG_DATA_DIR",
        "CATALOG_POPULAR_FILE",
        "CATALOG_TITLES_FILE",
        "CATALOG_BOOKS_FILE",
        "CATALOG_SIMILARITY_FILE",
        "DEFAULT_TOP_K",
        "MAX_TOP_K",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.app.port, 8080);
        assert_eq!(config.app.env, "development");
        assert!(!config.app.is_production());
        assert_eq!(config.catalog.data_dir, PathBuf::from("./data"));
        assert_eq!(config.catalog.files, CatalogFiles::default());
        assert_eq!(config.recommendation.default_top_k, 4);
        assert_eq!(config.recommendation.max_top_k, 50);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        env::set_var("APP_ENV", "Production");
        env::set_var("APP_PORT", "9000");
        env::set_var("CATALOG_DATA_DIR", "/srv/books");
        env::set_var("CATALOG_SIMILARITY_FILE", "scores.json");
        env::set_var("DEFAULT_TOP_K", "8");

        let config = Config::from_env().unwrap();
        clear_env();

        assert!(config.app.is_production());
        assert_eq!(config.app.port, 9000);
        assert_eq!(config.catalog.data_dir, PathBuf::from("/srv/books"));
        assert_eq!(config.catalog.files.similarity, "scores.json");
        assert_eq!(config.catalog.files.books, "books.json");
        assert_eq!(config.recommendation.default_top_k, 8);
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_error() {
        clear_env();
        env::set_var("APP_PORT", "not-a-port");

        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("APP_PORT"));
    }

    #[test]
    #[serial]
    fn test_zero_default_top_k_is_error() {
        clear_env();
        env::set_var("DEFAULT_TOP_K", "0");

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_max_below_default_is_error() {
        clear_env();
        env::set_var("DEFAULT_TOP_K", "10");
        env::set_var("MAX_TOP_K", "5");

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
    }
}
