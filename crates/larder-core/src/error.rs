// ── Core error types ──
//
// User-facing errors from larder-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<larder_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

use crate::model::CategoryId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Network / transport ──────────────────────────────────────────
    #[error("Network failure: {message}")]
    Network { message: String },

    #[error("Backend rejected the request: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("No suggestions available for category {category}")]
    SuggestionUnavailable { category: CategoryId },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<larder_api::Error> for CoreError {
    fn from(err: larder_api::Error) -> Self {
        match err {
            larder_api::Error::Transport(ref e) => {
                if e.is_timeout() || e.is_connect() {
                    CoreError::Network {
                        message: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            larder_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            larder_api::Error::Api { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
            larder_api::Error::Deserialization { message, body: _ } => CoreError::Network {
                message: format!("Response decoding failed: {message}"),
            },
        }
    }
}
