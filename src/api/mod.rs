use axum::Json;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::fetch::FetchResult;
use crate::form::{EditOutcome, Field, FormEvent, FormState};
use crate::models::ScheduleHandoff;
use crate::state::AppState;

#[derive(Deserialize)]
struct ReduceRequest {
    state: FormState,
    event: FormEvent,
}

#[derive(Serialize)]
struct ReduceResponse {
    state: FormState,
    outcome: EditOutcome,
    submit_enabled: bool,
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    secret: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/form/reduce", post(reduce_form))
        .route("/login", post(login))
        .route("/schedules", get(list_schedules))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn reduce_form(Json(req): Json<ReduceRequest>) -> Result<Json<ReduceResponse>, AppError> {
    if !req.state.is_well_formed() {
        return Err(AppError::BadRequest(
            "numeric field contains non-digit characters".to_string(),
        ));
    }

    let (state, outcome) = req.state.reduce(req.event);
    let submit_enabled = state.submit_enabled();
    Ok(Json(ReduceResponse {
        state,
        outcome,
        submit_enabled,
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ScheduleHandoff>, AppError> {
    // Submitted values pass through the same edit filter as typed input.
    let edits = [
        FormEvent::Edit {
            field: Field::Identifier,
            value: req.identifier,
        },
        FormEvent::Edit {
            field: Field::Secret,
            value: req.secret,
        },
    ];
    let form = edits
        .into_iter()
        .fold(FormState::new(state.form_kind), |form, event| form.reduce(event).0);

    let handoff = state.gate.sign_in(&form).await.into_handoff()?;
    Ok(Json(handoff))
}

async fn list_schedules(State(state): State<AppState>) -> Response {
    let result = state.records.fetch_all(&state.schedule_path).await;
    let status = match result {
        FetchResult::Failure { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Json(result.view())).into_response()
}
