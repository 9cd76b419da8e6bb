//! Aggregate endpoints: grade and attendance summaries and the dashboard.
//!
//! Every aggregate is computed over the records the session may see, so a
//! student's summary only covers their own grades and attendance.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use domain::models::dashboard::{AttendanceSummary, DashboardMetrics, GradeSummary};
use domain::models::{Attendance, Grade};
use domain::services::statistics::{self, DashboardInput};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionContext;

/// GET /api/v1/grades/summary
pub async fn grade_summary(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
) -> Result<Json<GradeSummary>, ApiError> {
    let grades = session.scope(state.store::<Grade>().list().await?);
    Ok(Json(statistics::grade_summary(&grades)))
}

#[derive(Debug, Deserialize)]
pub struct AttendanceSummaryQuery {
    pub student_id: Option<Uuid>,
}

/// GET /api/v1/attendance/summary?student_id=
pub async fn attendance_summary(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    query: Result<Query<AttendanceSummaryQuery>, QueryRejection>,
) -> Result<Json<AttendanceSummary>, ApiError> {
    let Query(query) = query?;
    let records = session.scope(state.store::<Attendance>().list().await?);
    Ok(Json(statistics::attendance_summary(&records, query.student_id)))
}

/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
) -> Result<Json<DashboardMetrics>, ApiError> {
    let stores = &state.stores;
    let users = session.scope(stores.users.list().await?);
    let courses = session.scope(stores.courses.list().await?);
    let grades = session.scope(stores.grades.list().await?);
    let attendance = session.scope(stores.attendance.list().await?);
    let vacancies = session.scope(stores.vacancies.list().await?);
    let applications = session.scope(stores.applications.list().await?);
    let payments = session.scope(stores.payments.list().await?);

    let metrics = statistics::dashboard(
        DashboardInput {
            users: &users,
            courses: &courses,
            grades: &grades,
            attendance: &attendance,
            vacancies: &vacancies,
            applications: &applications,
            payments: &payments,
        },
        Utc::now(),
    );

    Ok(Json(metrics))
}
