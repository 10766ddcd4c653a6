//! HTTP routes

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Request, State},
    http::header,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::{AccessCheck, PASSWORD_HEADER};
use crate::plan::{self, CarePlanDocument, GeneratedPlan, PatientInput};
use crate::server::api::{CheckPasswordRequest, RenderPlanRequest};
use crate::server::state::AppState;
use crate::{CarePlanError, Result};

/// Build the application router.
///
/// Everything under `/api` except the password check requires the
/// `X-App-Password` header.
pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.settings.server.max_body_bytes;

    let gated = Router::new()
        .route("/generate-plan", post(generate_plan))
        .route("/render-plan", post(render_plan))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access,
        ));

    let api = Router::new()
        .route("/check-password", post(check_password))
        .merge(gated);

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn require_access(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let supplied = request
        .headers()
        .get(PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.gate.authorize(supplied) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Always answers 200 with `{ success, message }`, even for bad bodies.
async fn check_password(State(state): State<AppState>, body: Bytes) -> Json<AccessCheck> {
    let check = match serde_json::from_slice::<CheckPasswordRequest>(&body) {
        Ok(request) => state.gate.check(&request.secret),
        Err(e) => {
            warn!("Malformed password check request: {}", e);
            AccessCheck {
                success: false,
                message: format!("Server error: {}", e),
            }
        }
    };

    Json(check)
}

async fn generate_plan(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PatientInput>, JsonRejection>,
) -> Result<Json<GeneratedPlan>> {
    let request_id = Uuid::new_v4();
    let Json(patient) =
        payload.map_err(|rejection| CarePlanError::Validation(rejection.body_text()))?;

    info!(%request_id, "Received generate-plan request");

    patient.validate()?;
    let provider = state.provider()?;
    let generated = plan::generate_plan(provider, &patient).await?;

    info!(%request_id, "Returning generated plan");
    Ok(Json(generated))
}

async fn render_plan(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RenderPlanRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) =
        payload.map_err(|rejection| CarePlanError::Validation(rejection.body_text()))?;

    let approved = request.plan.approve();
    let document = CarePlanDocument::new(&request.patient, &approved, &state.settings.clinic);
    let body = document.render(request.format)?;
    let file_name = document.file_name(request.format);

    info!(
        format = ?request.format,
        plan_items = approved.plan().len(),
        solution_items = approved.healthy_solutions().len(),
        "Rendered care plan document"
    );

    let headers = [
        (header::CONTENT_TYPE, request.format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
    ];
    Ok((headers, body).into_response())
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "healthy": true,
        "version": crate::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
