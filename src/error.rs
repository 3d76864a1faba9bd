use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("invalid {what} json: {source}")]
    InvalidInput {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl BindingError {
    pub fn input(what: &'static str, source: serde_json::Error) -> Self {
        BindingError::InvalidInput { what, source }
    }
}

#[derive(Serialize)]
struct ErrorView {
    error: String,
}

/// Renders an error as `{"error": "..."}` for the JS side.
pub fn error_json(err: &BindingError) -> String {
    let view = ErrorView {
        error: err.to_string(),
    };
    serde_json::to_string(&view).unwrap_or_else(|_| "{}".to_string())
}
