//! Axum route handlers for the session workflow. One handler per user action.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::{self, ContactCard, ProceedOutcome};
use crate::dashboard::DashboardView;
use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::payment::Navigation;
use crate::profile::{FieldUpdate, FormView};
use crate::session::orchestrator::{self, view};
use crate::session::state::SessionView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EditFormRequest {
    pub updates: Vec<FieldUpdate>,
}

/// Optional body for submission. Without a body (no JSON content type) the
/// session's form is submitted as-is; a body that fails to parse is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct StartPaymentResponse {
    pub navigation: Navigation,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct ProceedResponse {
    pub outcome: ProceedOutcome,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let session = state.sessions.create().await;
    tracing::info!("Session {} created", session.id);
    (
        StatusCode::CREATED,
        Json(session.view(&state.config.roadmap_price)),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(view(&state, id).await?))
}

/// GET /api/v1/sessions/:id/form
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormView>, AppError> {
    let form = view(&state, id).await?.form.ok_or_else(|| {
        AppError::Conflict("The profile form is closed until the session is reset".to_string())
    })?;
    Ok(Json(form))
}

/// PATCH /api/v1/sessions/:id/form
pub async fn handle_edit_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EditFormRequest>,
) -> Result<Json<FormView>, AppError> {
    if req.updates.is_empty() {
        return Err(AppError::Validation("updates cannot be empty".to_string()));
    }
    state
        .sessions
        .with(id, |s| s.edit_form(req.updates))
        .await??;
    handle_get_form(State(state), Path(id)).await
}

/// POST /api/v1/sessions/:id/assessment
///
/// Blocks until the assessment resolves or fails.
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let replacement = match body {
        Ok(Json(req)) => req.profile,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            return Err(AppError::Validation(format!(
                "Invalid profile: {}",
                rejection.body_text()
            )))
        }
    };
    let session = orchestrator::submit_assessment(&state, id, replacement).await?;
    Ok(Json(session))
}

/// DELETE /api/v1/sessions/:id/assessment — "re-assess".
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.with(id, |s| s.reset()).await??;
    Ok(Json(view(&state, id).await?))
}

/// GET /api/v1/sessions/:id/dashboard
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, AppError> {
    let dashboard = view(&state, id)
        .await?
        .dashboard
        .ok_or_else(|| AppError::NotFound(format!("No assessment for session {id}")))?;
    Ok(Json(dashboard))
}

/// POST /api/v1/sessions/:id/payment — the upsell's upgrade action.
pub async fn handle_open_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let price = state.config.roadmap_price.clone();
    let link = state.config.payment_link().to_string();
    state
        .sessions
        .with(id, |s| s.open_payment(&price, &link))
        .await??;
    Ok(Json(view(&state, id).await?))
}

/// DELETE /api/v1/sessions/:id/payment
pub async fn handle_cancel_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.with(id, |s| s.cancel_payment()).await??;
    Ok(Json(view(&state, id).await?))
}

/// POST /api/v1/sessions/:id/payment/start
pub async fn handle_start_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StartPaymentResponse>, AppError> {
    let navigation = orchestrator::start_payment(&state, id).await?;
    Ok(Json(StartPaymentResponse {
        navigation,
        session: view(&state, id).await?,
    }))
}

/// POST /api/v1/sessions/:id/payment/retry
pub async fn handle_retry_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.with(id, |s| s.retry_payment()).await??;
    Ok(Json(view(&state, id).await?))
}

/// POST /api/v1/sessions/:id/booking
pub async fn handle_open_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.with(id, |s| s.open_booking()).await?;
    Ok(Json(view(&state, id).await?))
}

/// DELETE /api/v1/sessions/:id/booking
pub async fn handle_close_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.with(id, |s| s.close_booking()).await?;
    Ok(Json(view(&state, id).await?))
}

/// POST /api/v1/sessions/:id/booking/proceed
pub async fn handle_booking_proceed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProceedResponse>, AppError> {
    let outcome = state.sessions.with(id, |s| s.booking_proceed()).await??;
    Ok(Json(ProceedResponse {
        outcome,
        session: view(&state, id).await?,
    }))
}

/// POST /api/v1/sessions/:id/booking/back
pub async fn handle_booking_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.with(id, |s| s.booking_back()).await??;
    Ok(Json(view(&state, id).await?))
}

/// GET /api/v1/sessions/:id/booking/contact
pub async fn handle_booking_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactCard>, AppError> {
    state.sessions.with(id, |_| ()).await?;
    Ok(Json(booking::contact()))
}

/// DELETE /api/v1/sessions/:id/notification
pub async fn handle_dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.with(id, |s| s.dismiss_notification()).await?;
    Ok(StatusCode::NO_CONTENT)
}
