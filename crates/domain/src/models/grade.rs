//! Student grade records.
//!
//! A grade stores its component scores only. The average and the letter are
//! derived when read so they can never disagree with the components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::grading::{self, GradeLetter};
use crate::services::render::{Render, RenderContext, RowField};

/// A named assessment score, e.g. `Midterm: 88`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_component_score"))]
pub struct ScoreComponent {
    #[validate(length(min = 1, max = 100, message = "Component name is required"))]
    pub name: String,

    pub score: f64,
}

fn validate_component_score(component: &ScoreComponent) -> Result<(), ValidationError> {
    shared::validation::validate_score(component.score)
}

impl ScoreComponent {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    #[default]
    Draft,
    Published,
}

impl BadgeValue for GradeStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            GradeStatus::Draft => Facet::new("draft", "Draft", "Draf"),
            GradeStatus::Published => Facet::new("published", "Published", "Dipublikasikan"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            GradeStatus::Draft => BadgeColor::Gray,
            GradeStatus::Published => BadgeColor::Green,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Grade {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub subject: String,
    /// Class level, e.g. `Grade 10`.
    pub level: String,
    pub components: Vec<ScoreComponent>,
    pub status: GradeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    /// Mean of the component scores, 0 when there are none.
    pub fn average_score(&self) -> f64 {
        let scores: Vec<f64> = self.components.iter().map(|c| c.score).collect();
        grading::average(&scores).unwrap_or(0.0)
    }

    pub fn letter(&self) -> GradeLetter {
        GradeLetter::from_score(self.average_score())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct GradeForm {
    pub student_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Student name is required"))]
    pub student_name: String,

    #[validate(
        length(min = 1, max = 100, message = "Subject is required"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub subject: String,

    #[validate(length(min = 1, max = 50, message = "Level is required"))]
    pub level: String,

    #[validate(
        length(min = 1, message = "At least one score component is required"),
        nested
    )]
    pub components: Vec<ScoreComponent>,

    #[serde(default)]
    pub status: GradeStatus,
}

impl Record for Grade {
    const KIND: EntityKind = EntityKind::Grades;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.student_name.as_str(), self.subject.as_str()]
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(Facet::plain(&self.subject))
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }

    fn level(&self) -> Option<Facet<'_>> {
        Some(Facet::plain(&self.level))
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.student_id)
    }
}

impl Render for Grade {
    fn title(&self) -> String {
        self.student_name.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(format!("{} - {}", self.subject, self.level))
    }

    fn fields(&self, _ctx: &RenderContext) -> Vec<RowField> {
        let mut fields: Vec<RowField> = self
            .components
            .iter()
            .map(|c| RowField::new(c.name.clone(), format!("{}", c.score)))
            .collect();
        fields.push(RowField::new(
            "average",
            format!("{:.2}", self.average_score()),
        ));
        fields.push(RowField::new("letter", self.letter().as_str()));
        fields
    }

    /// The letter grade, not the publication status, is what the list shows.
    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.letter().badge(ctx.locale))
    }
}

impl Resource for Grade {
    type Form = GradeForm;
    type Detail = GradeDetail;

    fn create(form: GradeForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            student_id: form.student_id,
            student_name: form.student_name.trim().to_string(),
            subject: form.subject.trim().to_string(),
            level: form.level.trim().to_string(),
            components: form.components,
            status: form.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, form: GradeForm, now: DateTime<Utc>) {
        self.student_id = form.student_id;
        self.student_name = form.student_name.trim().to_string();
        self.subject = form.subject.trim().to_string();
        self.level = form.level.trim().to_string();
        self.components = form.components;
        self.status = form.status;
        self.updated_at = now;
    }

    fn to_form(&self) -> GradeForm {
        GradeForm {
            student_id: self.student_id,
            student_name: self.student_name.clone(),
            subject: self.subject.clone(),
            level: self.level.clone(),
            components: self.components.clone(),
            status: self.status,
        }
    }

    fn detail(&self, ctx: &RenderContext) -> GradeDetail {
        let letter = self.letter();
        GradeDetail {
            grade: self.clone(),
            average_score: grading::round2(self.average_score()),
            letter,
            letter_badge: letter.badge(ctx.locale),
        }
    }
}

/// Grade with its derived average and letter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeDetail {
    #[serde(flatten)]
    pub grade: Grade,
    pub average_score: f64,
    pub letter: GradeLetter,
    pub letter_badge: Badge,
}
