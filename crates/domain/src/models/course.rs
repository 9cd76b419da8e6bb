//! Course catalogue records and the overview/learning view toggle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::render::{format_rupiah, Render, RenderContext, RowField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl BadgeValue for CourseLevel {
    fn facet(&self) -> Facet<'static> {
        match self {
            CourseLevel::Beginner => Facet::new("beginner", "Beginner", "Pemula"),
            CourseLevel::Intermediate => Facet::new("intermediate", "Intermediate", "Menengah"),
            CourseLevel::Advanced => Facet::new("advanced", "Advanced", "Lanjutan"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            CourseLevel::Beginner => BadgeColor::Green,
            CourseLevel::Intermediate => BadgeColor::Yellow,
            CourseLevel::Advanced => BadgeColor::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Active,
    Inactive,
    #[default]
    Draft,
}

impl BadgeValue for CourseStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            CourseStatus::Active => Facet::new("active", "Active", "Aktif"),
            CourseStatus::Inactive => Facet::new("inactive", "Inactive", "Nonaktif"),
            CourseStatus::Draft => Facet::new("draft", "Draft", "Draf"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            CourseStatus::Active => BadgeColor::Green,
            CourseStatus::Inactive => BadgeColor::Red,
            CourseStatus::Draft => BadgeColor::Gray,
        }
    }
}

/// One module of a course syllabus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CourseModule {
    #[validate(length(min = 1, max = 200, message = "Module title is required"))]
    pub title: String,

    #[validate(range(min = 1, max = 10000, message = "Duration must be 1-10000 minutes"))]
    pub duration_minutes: u32,

    #[serde(default)]
    pub lessons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Free-text subject area, e.g. `Programming`.
    pub category: String,
    pub level: CourseLevel,
    pub duration_weeks: u32,
    pub price: f64,
    pub capacity: u32,
    pub status: CourseStatus,
    pub modules: Vec<CourseModule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn total_minutes(&self) -> u32 {
        self.modules.iter().map(|m| m.duration_minutes).sum()
    }

    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CourseForm {
    #[validate(
        length(min = 3, max = 150, message = "Course name must be 3-150 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 2000, message = "Description is too long"))]
    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub category: String,

    #[serde(default)]
    pub level: CourseLevel,

    #[validate(range(min = 1, max = 104, message = "Duration must be 1-104 weeks"))]
    pub duration_weeks: u32,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[validate(range(min = 1, max = 1000, message = "Capacity must be 1-1000"))]
    pub capacity: u32,

    #[serde(default)]
    pub status: CourseStatus,

    #[validate(nested)]
    #[serde(default)]
    pub modules: Vec<CourseModule>,
}

impl Record for Course {
    const KIND: EntityKind = EntityKind::Courses;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(Facet::plain(&self.category))
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }

    fn level(&self) -> Option<Facet<'_>> {
        Some(self.level.facet())
    }
}

impl Render for Course {
    fn title(&self) -> String {
        self.name.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(self.category.clone())
    }

    fn fields(&self, ctx: &RenderContext) -> Vec<RowField> {
        vec![
            RowField::new("level", self.level.facet().label(ctx.locale)),
            RowField::new("duration", format!("{} weeks", self.duration_weeks)),
            RowField::new("price", format_rupiah(self.price)),
            RowField::new("capacity", self.capacity.to_string()),
        ]
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.status.badge(ctx.locale))
    }
}

impl Resource for Course {
    type Form = CourseForm;
    type Detail = CourseDetail;

    fn create(form: CourseForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: form.name.trim().to_string(),
            description: form.description,
            category: form.category.trim().to_string(),
            level: form.level,
            duration_weeks: form.duration_weeks,
            price: form.price,
            capacity: form.capacity,
            status: form.status,
            modules: form.modules,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, form: CourseForm, now: DateTime<Utc>) {
        self.name = form.name.trim().to_string();
        self.description = form.description;
        self.category = form.category.trim().to_string();
        self.level = form.level;
        self.duration_weeks = form.duration_weeks;
        self.price = form.price;
        self.capacity = form.capacity;
        self.status = form.status;
        self.modules = form.modules;
        self.updated_at = now;
    }

    fn to_form(&self) -> CourseForm {
        CourseForm {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            level: self.level,
            duration_weeks: self.duration_weeks,
            price: self.price,
            capacity: self.capacity,
            status: self.status,
            modules: self.modules.clone(),
        }
    }

    fn detail(&self, _ctx: &RenderContext) -> CourseDetail {
        CourseDetail {
            total_minutes: self.total_minutes(),
            lesson_count: self.lesson_count(),
            course: self.clone(),
        }
    }
}

/// Course with its derived syllabus totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub total_minutes: u32,
    pub lesson_count: usize,
}

/// Which face of the course detail screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseViewMode {
    #[default]
    Overview,
    Learning,
}

impl CourseViewMode {
    pub fn toggle(self) -> Self {
        match self {
            CourseViewMode::Overview => CourseViewMode::Learning,
            CourseViewMode::Learning => CourseViewMode::Overview,
        }
    }
}

/// Marketing summary of a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseOverview {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub level: Badge,
    pub status: Badge,
    pub duration_weeks: u32,
    pub price: String,
    pub capacity: u32,
    pub module_count: usize,
    /// Mode the viewer's toggle switches to.
    pub switch_to: CourseViewMode,
}

/// One syllabus entry as shown while learning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningModule {
    pub position: usize,
    pub title: String,
    pub duration_minutes: u32,
    pub lessons: Vec<String>,
}

/// Syllabus-first view of a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseLearning {
    pub id: Uuid,
    pub name: String,
    pub modules: Vec<LearningModule>,
    pub total_minutes: u32,
    pub lesson_count: usize,
    pub switch_to: CourseViewMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CourseView {
    Overview(CourseOverview),
    Learning(CourseLearning),
}

impl CourseView {
    pub fn build(course: &Course, mode: CourseViewMode, ctx: &RenderContext) -> Self {
        match mode {
            CourseViewMode::Overview => CourseView::Overview(CourseOverview {
                id: course.id,
                name: course.name.clone(),
                description: course.description.clone(),
                category: course.category.clone(),
                level: course.level.badge(ctx.locale),
                status: course.status.badge(ctx.locale),
                duration_weeks: course.duration_weeks,
                price: format_rupiah(course.price),
                capacity: course.capacity,
                module_count: course.modules.len(),
                switch_to: mode.toggle(),
            }),
            CourseViewMode::Learning => CourseView::Learning(CourseLearning {
                id: course.id,
                name: course.name.clone(),
                modules: course
                    .modules
                    .iter()
                    .enumerate()
                    .map(|(i, m)| LearningModule {
                        position: i + 1,
                        title: m.title.clone(),
                        duration_minutes: m.duration_minutes,
                        lessons: m.lessons.clone(),
                    })
                    .collect(),
                total_minutes: course.total_minutes(),
                lesson_count: course.lesson_count(),
                switch_to: mode.toggle(),
            }),
        }
    }

    pub fn mode(&self) -> CourseViewMode {
        match self {
            CourseView::Overview(_) => CourseViewMode::Overview,
            CourseView::Learning(_) => CourseViewMode::Learning,
        }
    }
}
