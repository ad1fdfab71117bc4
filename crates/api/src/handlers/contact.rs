//! Handler for `POST /contact`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use folio_core::contact::{ContactRequest, ContactResponse, MSG_INVALID_BODY, MSG_SUBMITTED};
use folio_core::submission::NewSubmission;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /contact
///
/// Checks that all four fields are present and pass the field rules, stamps
/// and stores the submission, then starts the owner notification without
/// waiting for it. The response reflects the store outcome only.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> AppResult<Json<ContactResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected contact payload");
        AppError::BadRequest(MSG_INVALID_BODY.to_string())
    })?;

    let fields = request.require_fields()?;
    fields.check_rules()?;

    let submission = state.store.insert(NewSubmission::stamp(fields)).await?;
    tracing::info!(submission_id = submission.id, "Contact submission saved");

    // Detached: the handle is dropped and the task outlives this request.
    state.notifications.dispatch(submission);

    Ok(Json(ContactResponse::accepted(MSG_SUBMITTED)))
}
