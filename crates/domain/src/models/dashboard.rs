//! Aggregate views over grade, attendance and platform records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::grading::GradeLetter;

/// Mean score for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubjectAverage {
    pub subject: String,
    pub average_score: f64,
    pub letter: GradeLetter,
    pub count: usize,
}

/// Number of grades carrying a letter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LetterCount {
    pub letter: GradeLetter,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GradeSummary {
    pub total: usize,
    pub average_score: f64,
    /// Sorted by subject name.
    pub by_subject: Vec<SubjectAverage>,
    /// One entry per letter, A first.
    pub distribution: Vec<LetterCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<Uuid>,
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    /// `(present + late) / total * 100`, 0 when there are no records.
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardMetrics {
    pub students: usize,
    pub teachers: usize,
    pub active_courses: usize,
    pub open_vacancies: usize,
    pub pending_applications: usize,
    pub average_grade: f64,
    pub attendance_rate: f64,
    /// Sum of final prices of payments not yet paid.
    pub outstanding_payments: f64,
    pub generated_at: Option<DateTime<Utc>>,
}
