//! HTTP request and response payloads

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::plan::{DocumentFormat, PatientInput, ReviewDraft};
use crate::CarePlanError;

/// Body of `POST /api/check-password`
#[derive(Debug, Deserialize)]
pub struct CheckPasswordRequest {
    #[serde(alias = "password")]
    pub secret: String,
}

/// Body of `POST /api/render-plan`
#[derive(Debug, Deserialize)]
pub struct RenderPlanRequest {
    pub patient: PatientInput,
    pub plan: ReviewDraft,
    #[serde(default)]
    pub format: DocumentFormat,
}

/// Error payload returned on every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl CarePlanError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Json(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Parse(_) | Self::Io(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Validation(_) | Self::Json(_) | Self::Unauthorized | Self::Config(_) => {
                self.to_string()
            }
            other => format!("Failed to process request: {}", other),
        }
    }
}

impl IntoResponse for CarePlanError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
