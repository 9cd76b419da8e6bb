//! Daily attendance records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::render::{format_date, Render, RenderContext, RowField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    /// Present and late both count as attended.
    pub fn counts_as_attended(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

impl BadgeValue for AttendanceStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            AttendanceStatus::Present => Facet::new("present", "Present", "Hadir"),
            AttendanceStatus::Absent => Facet::new("absent", "Absent", "Alpa"),
            AttendanceStatus::Late => Facet::new("late", "Late", "Terlambat"),
            AttendanceStatus::Excused => Facet::new("excused", "Excused", "Izin"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            AttendanceStatus::Present => BadgeColor::Green,
            AttendanceStatus::Absent => BadgeColor::Red,
            AttendanceStatus::Late => BadgeColor::Yellow,
            AttendanceStatus::Excused => BadgeColor::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Attendance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub class_name: String,
    pub subject: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceForm {
    pub student_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Student name is required"))]
    pub student_name: String,

    #[validate(length(min = 1, max = 50, message = "Class is required"))]
    pub class_name: String,

    #[validate(length(min = 1, max = 100, message = "Subject is required"))]
    pub subject: String,

    pub date: NaiveDate,

    #[serde(default)]
    pub status: AttendanceStatus,

    #[validate(length(max = 500, message = "Note is too long"))]
    #[serde(default)]
    pub note: Option<String>,
}

impl Record for Attendance {
    const KIND: EntityKind = EntityKind::Attendance;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.student_name.as_str(),
            self.class_name.as_str(),
            self.subject.as_str(),
        ];
        if let Some(note) = &self.note {
            fields.push(note.as_str());
        }
        fields
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(Facet::plain(&self.subject))
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }

    fn level(&self) -> Option<Facet<'_>> {
        Some(Facet::plain(&self.class_name))
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.student_id)
    }
}

impl Render for Attendance {
    fn title(&self) -> String {
        self.student_name.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(format!("{} - {}", self.class_name, self.subject))
    }

    fn fields(&self, _ctx: &RenderContext) -> Vec<RowField> {
        vec![
            RowField::new("date", format_date(self.date)),
            RowField::new("note", self.note.clone().unwrap_or_else(|| "-".to_string())),
        ]
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.status.badge(ctx.locale))
    }
}

impl Resource for Attendance {
    type Form = AttendanceForm;
    type Detail = Attendance;

    fn create(form: AttendanceForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            student_id: form.student_id,
            student_name: form.student_name.trim().to_string(),
            class_name: form.class_name.trim().to_string(),
            subject: form.subject.trim().to_string(),
            date: form.date,
            status: form.status,
            note: form.note,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, form: AttendanceForm, now: DateTime<Utc>) {
        self.student_id = form.student_id;
        self.student_name = form.student_name.trim().to_string();
        self.class_name = form.class_name.trim().to_string();
        self.subject = form.subject.trim().to_string();
        self.date = form.date;
        self.status = form.status;
        self.note = form.note;
        self.updated_at = now;
    }

    fn to_form(&self) -> AttendanceForm {
        AttendanceForm {
            student_id: self.student_id,
            student_name: self.student_name.clone(),
            class_name: self.class_name.clone(),
            subject: self.subject.clone(),
            date: self.date,
            status: self.status,
            note: self.note.clone(),
        }
    }

    fn detail(&self, _ctx: &RenderContext) -> Attendance {
        self.clone()
    }
}
