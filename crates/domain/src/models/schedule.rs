//! Academic calendar entries: regular classes, exams, events and holidays.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::render::{format_date, Render, RenderContext, RowField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleType {
    #[default]
    Regular,
    Exam,
    Event,
    Holiday,
}

impl BadgeValue for ScheduleType {
    fn facet(&self) -> Facet<'static> {
        match self {
            ScheduleType::Regular => Facet::new("REGULAR", "Regular", "Reguler"),
            ScheduleType::Exam => Facet::new("EXAM", "Exam", "Ujian"),
            ScheduleType::Event => Facet::new("EVENT", "Event", "Acara"),
            ScheduleType::Holiday => Facet::new("HOLIDAY", "Holiday", "Libur"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            ScheduleType::Regular => BadgeColor::Blue,
            ScheduleType::Exam => BadgeColor::Red,
            ScheduleType::Event => BadgeColor::Purple,
            ScheduleType::Holiday => BadgeColor::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl BadgeValue for ScheduleStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            ScheduleStatus::Scheduled => Facet::new("scheduled", "Scheduled", "Terjadwal"),
            ScheduleStatus::Ongoing => Facet::new("ongoing", "Ongoing", "Berlangsung"),
            ScheduleStatus::Completed => Facet::new("completed", "Completed", "Selesai"),
            ScheduleStatus::Cancelled => Facet::new("cancelled", "Cancelled", "Dibatalkan"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            ScheduleStatus::Scheduled => BadgeColor::Blue,
            ScheduleStatus::Ongoing => BadgeColor::Yellow,
            ScheduleStatus::Completed => BadgeColor::Green,
            ScheduleStatus::Cancelled => BadgeColor::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleTeacher {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Teacher name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleClass {
    #[validate(length(min = 1, max = 50, message = "Class name is required"))]
    pub name: String,

    #[serde(default)]
    pub room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Schedule {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub teachers: Vec<ScheduleTeacher>,
    pub classes: Vec<ScheduleClass>,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// Number of calendar days covered, both ends included.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_schedule_range"))]
pub struct ScheduleForm {
    #[validate(
        length(min = 3, max = 150, message = "Title must be 3-150 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 2000, message = "Description is too long"))]
    #[serde(default)]
    pub description: String,

    #[serde(rename = "type", default)]
    pub schedule_type: ScheduleType,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,

    #[validate(nested)]
    #[serde(default)]
    pub teachers: Vec<ScheduleTeacher>,

    #[validate(nested)]
    #[serde(default)]
    pub classes: Vec<ScheduleClass>,

    #[serde(default)]
    pub status: ScheduleStatus,
}

fn validate_schedule_range(form: &ScheduleForm) -> Result<(), ValidationError> {
    shared::validation::validate_date_order(form.start_date, form.end_date)?;

    // Times only order against each other within a single day.
    if let (Some(start), Some(end)) = (form.start_time, form.end_time) {
        if form.start_date == form.end_date && end <= start {
            let mut err = ValidationError::new("time_order");
            err.message = Some("End time must be after start time".into());
            return Err(err);
        }
    }
    Ok(())
}

impl Record for Schedule {
    const KIND: EntityKind = EntityKind::Schedules;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        fields.extend(self.teachers.iter().map(|t| t.name.as_str()));
        fields.extend(self.classes.iter().map(|c| c.name.as_str()));
        fields
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(self.schedule_type.facet())
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }
}

impl Render for Schedule {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn subtitle(&self) -> Option<String> {
        if self.start_date == self.end_date {
            Some(format_date(self.start_date))
        } else {
            Some(format!(
                "{} - {}",
                format_date(self.start_date),
                format_date(self.end_date)
            ))
        }
    }

    fn fields(&self, ctx: &RenderContext) -> Vec<RowField> {
        let mut fields = vec![RowField::new(
            "type",
            self.schedule_type.facet().label(ctx.locale),
        )];
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            fields.push(RowField::new(
                "time",
                format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")),
            ));
        }
        fields.push(RowField::new(
            "teachers",
            self.teachers
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ));
        fields.push(RowField::new(
            "classes",
            self.classes
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ));
        fields
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.schedule_type.badge(ctx.locale))
    }
}

impl Resource for Schedule {
    type Form = ScheduleForm;
    type Detail = ScheduleDetail;

    fn create(form: ScheduleForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: form.title.trim().to_string(),
            description: form.description,
            schedule_type: form.schedule_type,
            start_date: form.start_date,
            end_date: form.end_date,
            start_time: form.start_time,
            end_time: form.end_time,
            teachers: form.teachers,
            classes: form.classes,
            status: form.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, form: ScheduleForm, now: DateTime<Utc>) {
        self.title = form.title.trim().to_string();
        self.description = form.description;
        self.schedule_type = form.schedule_type;
        self.start_date = form.start_date;
        self.end_date = form.end_date;
        self.start_time = form.start_time;
        self.end_time = form.end_time;
        self.teachers = form.teachers;
        self.classes = form.classes;
        self.status = form.status;
        self.updated_at = now;
    }

    fn to_form(&self) -> ScheduleForm {
        ScheduleForm {
            title: self.title.clone(),
            description: self.description.clone(),
            schedule_type: self.schedule_type,
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            teachers: self.teachers.clone(),
            classes: self.classes.clone(),
            status: self.status,
        }
    }

    fn detail(&self, ctx: &RenderContext) -> ScheduleDetail {
        ScheduleDetail {
            duration_days: self.duration_days(),
            teacher_count: self.teachers.len(),
            class_count: self.classes.len(),
            is_today: self.covers(ctx.today),
            schedule: self.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleDetail {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub duration_days: i64,
    pub teacher_count: usize,
    pub class_count: usize,
    pub is_today: bool,
}
