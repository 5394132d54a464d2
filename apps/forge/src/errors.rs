use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::forge::options::UnknownOption;

/// Everything that can go wrong on a forge submit.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    #[error("Please paste your OpenAI API key to continue.")]
    MissingCredential,

    #[error("Please paste at least one existing bullet point.")]
    MissingInput,

    #[error("{0}")]
    CapabilityUnavailable(String),

    #[error("Something went wrong while calling OpenAI: {0}")]
    RemoteCallFailure(String),
}

impl ForgeError {
    /// Stable machine-readable code used in JSON error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            ForgeError::MissingCredential => "MISSING_CREDENTIAL",
            ForgeError::MissingInput => "MISSING_INPUT",
            ForgeError::CapabilityUnavailable(_) => "CAPABILITY_UNAVAILABLE",
            ForgeError::RemoteCallFailure(_) => "LLM_ERROR",
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Forge(#[from] ForgeError),
}

impl From<UnknownOption> for AppError {
    fn from(err: UnknownOption) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Forge(err) => {
                let status = match err {
                    ForgeError::MissingCredential | ForgeError::MissingInput => {
                        StatusCode::BAD_REQUEST
                    }
                    ForgeError::CapabilityUnavailable(msg) => {
                        tracing::error!("Generation capability unavailable: {msg}");
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                    ForgeError::RemoteCallFailure(msg) => {
                        tracing::error!("LLM error: {msg}");
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, err.code(), err.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
