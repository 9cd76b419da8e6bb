//! Course viewer projections.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use domain::models::course::{CourseView, CourseViewMode};
use domain::models::{Course, Locale};
use domain::services::listing::empty_as_none;
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionContext;
use crate::routes::records::{find_visible, render_context};

#[derive(Debug, Deserialize)]
pub struct CourseViewQuery {
    #[serde(default)]
    pub mode: CourseViewMode,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub locale: Option<Locale>,
}

/// GET /api/v1/courses/:id/view?mode=overview|learning
pub async fn view_course(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<CourseViewQuery>, QueryRejection>,
) -> Result<Json<CourseView>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let course: Course = find_visible(&state, &session, id).await?;
    let ctx = render_context(&session, query.locale);
    Ok(Json(CourseView::build(&course, query.mode, &ctx)))
}
