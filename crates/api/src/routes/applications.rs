//! Job application workflow.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use chrono::Utc;
use domain::models::career::{ApplicationDetail, StatusChangeRequest};
use domain::models::JobApplication;
use domain::{Record, Resource};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionContext;
use crate::middleware::record_mutation;
use crate::routes::records::{find_visible, render_context, require_manager};

/// POST /api/v1/applications/:id/status
///
/// Moves an application along its pipeline. Moves the transition table
/// does not allow answer 409 and leave the record untouched.
pub async fn change_status(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<StatusChangeRequest>, JsonRejection>,
) -> Result<Json<ApplicationDetail>, ApiError> {
    require_manager(&session, JobApplication::KIND)?;
    let Path(id) = id?;
    let Json(request) = payload?;

    let mut application: JobApplication = find_visible(&state, &session, id).await?;
    let from = application.status;
    application.change_status(request.status, Utc::now())?;

    let application = state.store::<JobApplication>().update(application).await?;

    info!(
        id = %id,
        from = from.as_str(),
        to = application.status.as_str(),
        "Application status changed"
    );
    record_mutation(JobApplication::KIND, "status");

    Ok(Json(application.detail(&render_context(&session, None))))
}
