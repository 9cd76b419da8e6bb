//! Aggregations behind the summary and dashboard endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::attendance::{Attendance, AttendanceStatus};
use crate::models::career::{ApplicationStatus, JobApplication, JobVacancy, VacancyStatus};
use crate::models::course::{Course, CourseStatus};
use crate::models::dashboard::{
    AttendanceSummary, DashboardMetrics, GradeSummary, LetterCount, SubjectAverage,
};
use crate::models::grade::Grade;
use crate::models::payment::{Payment, PaymentStatus};
use crate::models::user::{Role, UserRecord};
use crate::services::grading::{self, GradeLetter};

pub fn grade_summary(grades: &[Grade]) -> GradeSummary {
    let averages: Vec<f64> = grades.iter().map(Grade::average_score).collect();

    let mut by_subject: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (grade, avg) in grades.iter().zip(&averages) {
        by_subject.entry(grade.subject.as_str()).or_default().push(*avg);
    }

    let by_subject = by_subject
        .into_iter()
        .map(|(subject, scores)| {
            let avg = grading::average(&scores).unwrap_or(0.0);
            SubjectAverage {
                subject: subject.to_string(),
                average_score: grading::round2(avg),
                letter: GradeLetter::from_score(avg),
                count: scores.len(),
            }
        })
        .collect();

    let distribution = GradeLetter::ALL
        .into_iter()
        .map(|letter| LetterCount {
            letter,
            count: averages
                .iter()
                .filter(|avg| GradeLetter::from_score(**avg) == letter)
                .count(),
        })
        .collect();

    GradeSummary {
        total: grades.len(),
        average_score: grading::round2(grading::average(&averages).unwrap_or(0.0)),
        by_subject,
        distribution,
    }
}

/// Attendance counts, optionally restricted to one student.
pub fn attendance_summary(records: &[Attendance], student_id: Option<Uuid>) -> AttendanceSummary {
    let mut summary = AttendanceSummary {
        student_id,
        ..AttendanceSummary::default()
    };
    let mut attended = 0;

    for record in records
        .iter()
        .filter(|r| student_id.map_or(true, |id| r.student_id == id))
    {
        summary.total += 1;
        if record.status.counts_as_attended() {
            attended += 1;
        }
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Late => summary.late += 1,
            AttendanceStatus::Excused => summary.excused += 1,
        }
    }

    summary.attendance_rate = grading::percentage(attended, summary.total);
    summary
}

/// Snapshot of every collection the dashboard reads.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInput<'a> {
    pub users: &'a [UserRecord],
    pub courses: &'a [Course],
    pub grades: &'a [Grade],
    pub attendance: &'a [Attendance],
    pub vacancies: &'a [JobVacancy],
    pub applications: &'a [JobApplication],
    pub payments: &'a [Payment],
}

pub fn dashboard(input: DashboardInput<'_>, now: DateTime<Utc>) -> DashboardMetrics {
    let active_users = || input.users.iter().filter(|u| u.is_active());

    DashboardMetrics {
        students: active_users().filter(|u| u.role == Role::Student).count(),
        teachers: active_users().filter(|u| u.role == Role::Teacher).count(),
        active_courses: input
            .courses
            .iter()
            .filter(|c| c.status == CourseStatus::Active)
            .count(),
        open_vacancies: input
            .vacancies
            .iter()
            .filter(|v| v.status == VacancyStatus::Open)
            .count(),
        pending_applications: input
            .applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Pending)
            .count(),
        average_grade: grade_summary(input.grades).average_score,
        attendance_rate: attendance_summary(input.attendance, None).attendance_rate,
        outstanding_payments: input
            .payments
            .iter()
            .filter(|p| matches!(p.status, PaymentStatus::Pending | PaymentStatus::Failed))
            .map(Payment::final_price)
            .sum(),
        generated_at: Some(now),
    }
}
