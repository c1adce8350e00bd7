use serde::{Deserialize, Serialize};

/// Unified API error body returned by every service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short HTTP reason phrase, e.g. "Not Found"
    pub error: String,

    /// User-facing explanation
    pub message: String,

    /// HTTP status code
    pub status: u16,

    /// Error category used by clients for routing:
    /// - "validation_error" - input validation failed
    /// - "not_found_error" - resource does not exist
    /// - "server_error" - internal failure
    pub error_type: String,

    /// Stable machine-readable code, e.g. "BOOK_NOT_FOUND"
    pub code: String,

    /// Extra context about the failing input, e.g. the requested title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, status: u16, error_type: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            error_type: error_type.to_string(),
            code: code.to_string(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

/// Standard error codes
pub mod error_codes {
    // Catalog
    pub const BOOK_NOT_FOUND: &str = "BOOK_NOT_FOUND";

    // Request validation
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INVALID_TOP_K: &str = "INVALID_TOP_K";

    // System
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// Standard error categories
pub mod error_types {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const NOT_FOUND_ERROR: &str = "not_found_error";
    pub const SERVER_ERROR: &str = "server_error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_creation() {
        let error = ErrorResponse::new(
            "Not Found",
            "Book not found in the database. Please select another book.",
            404,
            error_types::NOT_FOUND_ERROR,
            error_codes::BOOK_NOT_FOUND,
        );

        assert_eq!(error.status, 404);
        assert_eq!(error.error_type, error_types::NOT_FOUND_ERROR);
        assert_eq!(error.code, error_codes::BOOK_NOT_FOUND);
        assert!(error.details.is_none());
    }

    #[test]
    fn test_optional_fields_skipped_when_empty() {
        let error = ErrorResponse::new(
            "Bad Request",
            "top_k must be positive",
            400,
            error_types::VALIDATION_ERROR,
            error_codes::INVALID_TOP_K,
        );

        let json = serde_json::to_value(&error).unwrap();
        assert!(json.get("details").is_none());

        let json = serde_json::to_value(error.with_details("got 0".to_string())).unwrap();
        assert_eq!(json["details"], "got 0");
    }
}
