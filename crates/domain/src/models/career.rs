//! Job vacancies and the applications submitted against them.
//!
//! Applications move through a fixed pipeline. Any status may be left for
//! `rejected` or `withdrawn` until the candidate is hired; every other move
//! must follow the table in [`ApplicationStatus::can_transition_to`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::render::{format_date, format_rupiah, Render, RenderContext, RowField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl BadgeValue for EmploymentType {
    fn facet(&self) -> Facet<'static> {
        match self {
            EmploymentType::FullTime => Facet::new("full_time", "Full-time", "Penuh waktu"),
            EmploymentType::PartTime => Facet::new("part_time", "Part-time", "Paruh waktu"),
            EmploymentType::Contract => Facet::new("contract", "Contract", "Kontrak"),
            EmploymentType::Internship => Facet::new("internship", "Internship", "Magang"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            EmploymentType::FullTime => BadgeColor::Blue,
            EmploymentType::PartTime => BadgeColor::Purple,
            EmploymentType::Contract => BadgeColor::Orange,
            EmploymentType::Internship => BadgeColor::Gray,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacancyStatus {
    Open,
    Closed,
    #[default]
    Draft,
}

impl BadgeValue for VacancyStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            VacancyStatus::Open => Facet::new("open", "Open", "Dibuka"),
            VacancyStatus::Closed => Facet::new("closed", "Closed", "Ditutup"),
            VacancyStatus::Draft => Facet::new("draft", "Draft", "Draf"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            VacancyStatus::Open => BadgeColor::Green,
            VacancyStatus::Closed => BadgeColor::Red,
            VacancyStatus::Draft => BadgeColor::Gray,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JobVacancy {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary_min: f64,
    pub salary_max: f64,
    pub deadline: Option<NaiveDate>,
    pub status: VacancyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobVacancy {
    /// Open and not past its deadline.
    pub fn accepts_applications(&self, today: NaiveDate) -> bool {
        self.status == VacancyStatus::Open && self.deadline.map_or(true, |d| d >= today)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_salary_range"))]
pub struct VacancyForm {
    #[validate(
        length(min = 3, max = 150, message = "Title must be 3-150 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "Department is required"))]
    pub department: String,

    #[validate(length(min = 1, max = 100, message = "Location is required"))]
    pub location: String,

    #[serde(default)]
    pub employment_type: EmploymentType,

    #[validate(length(max = 5000, message = "Description is too long"))]
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub requirements: Vec<String>,

    pub salary_min: f64,
    pub salary_max: f64,

    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    #[serde(default)]
    pub status: VacancyStatus,
}

fn validate_salary_range(form: &VacancyForm) -> Result<(), ValidationError> {
    shared::validation::validate_amount(form.salary_min)?;
    shared::validation::validate_amount(form.salary_max)?;
    if form.salary_min > form.salary_max {
        let mut err = ValidationError::new("salary_range");
        err.message = Some("Minimum salary must not exceed maximum salary".into());
        return Err(err);
    }
    Ok(())
}

impl Record for JobVacancy {
    const KIND: EntityKind = EntityKind::Vacancies;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.department.as_str(),
            self.location.as_str(),
        ]
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(Facet::plain(&self.department))
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }

    fn level(&self) -> Option<Facet<'_>> {
        Some(self.employment_type.facet())
    }
}

impl Render for JobVacancy {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(format!("{} - {}", self.department, self.location))
    }

    fn fields(&self, ctx: &RenderContext) -> Vec<RowField> {
        vec![
            RowField::new("type", self.employment_type.facet().label(ctx.locale)),
            RowField::new(
                "salary",
                format!(
                    "{} - {}",
                    format_rupiah(self.salary_min),
                    format_rupiah(self.salary_max)
                ),
            ),
            RowField::new(
                "deadline",
                self.deadline.map(format_date).unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.status.badge(ctx.locale))
    }
}

impl Resource for JobVacancy {
    type Form = VacancyForm;
    type Detail = VacancyDetail;

    fn create(form: VacancyForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: form.title.trim().to_string(),
            department: form.department.trim().to_string(),
            location: form.location.trim().to_string(),
            employment_type: form.employment_type,
            description: form.description,
            requirements: form.requirements,
            salary_min: form.salary_min,
            salary_max: form.salary_max,
            deadline: form.deadline,
            status: form.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, form: VacancyForm, now: DateTime<Utc>) {
        self.title = form.title.trim().to_string();
        self.department = form.department.trim().to_string();
        self.location = form.location.trim().to_string();
        self.employment_type = form.employment_type;
        self.description = form.description;
        self.requirements = form.requirements;
        self.salary_min = form.salary_min;
        self.salary_max = form.salary_max;
        self.deadline = form.deadline;
        self.status = form.status;
        self.updated_at = now;
    }

    fn to_form(&self) -> VacancyForm {
        VacancyForm {
            title: self.title.clone(),
            department: self.department.clone(),
            location: self.location.clone(),
            employment_type: self.employment_type,
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            deadline: self.deadline,
            status: self.status,
        }
    }

    fn detail(&self, ctx: &RenderContext) -> VacancyDetail {
        VacancyDetail {
            accepts_applications: self.accepts_applications(ctx.today),
            vacancy: self.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacancyDetail {
    #[serde(flatten)]
    pub vacancy: JobVacancy,
    pub accepts_applications: bool,
}

/// Hiring pipeline stage of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    UnderReview,
    Shortlisted,
    Interview,
    Offered,
    Hired,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        self.facet().key
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Hired | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }

    /// The next stage in the pipeline, if any.
    pub fn next_stage(&self) -> Option<ApplicationStatus> {
        match self {
            ApplicationStatus::Pending => Some(ApplicationStatus::UnderReview),
            ApplicationStatus::UnderReview => Some(ApplicationStatus::Shortlisted),
            ApplicationStatus::Shortlisted => Some(ApplicationStatus::Interview),
            ApplicationStatus::Interview => Some(ApplicationStatus::Offered),
            ApplicationStatus::Offered => Some(ApplicationStatus::Hired),
            ApplicationStatus::Hired
            | ApplicationStatus::Rejected
            | ApplicationStatus::Withdrawn => None,
        }
    }

    pub fn can_transition_to(&self, target: ApplicationStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match target {
            ApplicationStatus::Rejected | ApplicationStatus::Withdrawn => true,
            _ => self.next_stage() == Some(target),
        }
    }

    /// Every status reachable in one move.
    pub fn allowed_transitions(&self) -> Vec<ApplicationStatus> {
        ApplicationStatus::ALL
            .into_iter()
            .filter(|target| self.can_transition_to(*target))
            .collect()
    }

    pub fn transition(self, target: ApplicationStatus) -> Result<ApplicationStatus, TransitionError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: self,
                to: target,
            })
        }
    }

    pub const ALL: [ApplicationStatus; 8] = [
        ApplicationStatus::Pending,
        ApplicationStatus::UnderReview,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interview,
        ApplicationStatus::Offered,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];
}

impl BadgeValue for ApplicationStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            ApplicationStatus::Pending => Facet::new("pending", "Pending", "Menunggu"),
            ApplicationStatus::UnderReview => {
                Facet::new("under_review", "Under review", "Sedang ditinjau")
            }
            ApplicationStatus::Shortlisted => Facet::new("shortlisted", "Shortlisted", "Terpilih"),
            ApplicationStatus::Interview => Facet::new("interview", "Interview", "Wawancara"),
            ApplicationStatus::Offered => Facet::new("offered", "Offered", "Ditawarkan"),
            ApplicationStatus::Hired => Facet::new("hired", "Hired", "Diterima"),
            ApplicationStatus::Rejected => Facet::new("rejected", "Rejected", "Ditolak"),
            ApplicationStatus::Withdrawn => Facet::new("withdrawn", "Withdrawn", "Dibatalkan"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            ApplicationStatus::Pending => BadgeColor::Gray,
            ApplicationStatus::UnderReview => BadgeColor::Yellow,
            ApplicationStatus::Shortlisted => BadgeColor::Blue,
            ApplicationStatus::Interview => BadgeColor::Purple,
            ApplicationStatus::Offered => BadgeColor::Orange,
            ApplicationStatus::Hired => BadgeColor::Green,
            ApplicationStatus::Rejected | ApplicationStatus::Withdrawn => BadgeColor::Red,
        }
    }
}

/// A status move the pipeline does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot move application from {} to {}", .from.as_str(), .to.as_str())]
pub struct TransitionError {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct Applicant {
    #[validate(
        length(min = 3, max = 100, message = "Name must be 3-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(email(message = "Email address is not valid"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JobApplication {
    pub id: Uuid,
    pub vacancy_id: Uuid,
    pub position: String,
    pub applicant: Applicant,
    pub cover_letter: String,
    pub resume_url: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobApplication {
    /// Moves the application along the pipeline.
    pub fn change_status(
        &mut self,
        target: ApplicationStatus,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.status = self.status.transition(target)?;
        self.updated_at = now;
        Ok(())
    }
}

/// Create/edit form for applications. Status only changes through
/// [`JobApplication::change_status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ApplicationForm {
    pub vacancy_id: Uuid,

    #[validate(length(min = 1, max = 150, message = "Position is required"))]
    pub position: String,

    #[validate(nested)]
    pub applicant: Applicant,

    #[validate(length(max = 5000, message = "Cover letter is too long"))]
    #[serde(default)]
    pub cover_letter: String,

    #[validate(url(message = "Resume link must be a URL"))]
    #[serde(default)]
    pub resume_url: Option<String>,
}

/// Body of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: ApplicationStatus,
}

impl Record for JobApplication {
    const KIND: EntityKind = EntityKind::Applications;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.applicant.name.as_str(),
            self.applicant.email.as_str(),
            self.position.as_str(),
        ]
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(Facet::plain(&self.position))
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }
}

impl Render for JobApplication {
    fn title(&self) -> String {
        self.applicant.name.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(self.position.clone())
    }

    fn fields(&self, _ctx: &RenderContext) -> Vec<RowField> {
        vec![
            RowField::new("email", &self.applicant.email),
            RowField::new("phone", &self.applicant.phone),
            RowField::new("applied", format_date(self.applied_at.date_naive())),
        ]
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.status.badge(ctx.locale))
    }
}

impl Resource for JobApplication {
    type Form = ApplicationForm;
    type Detail = ApplicationDetail;

    fn create(form: ApplicationForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            vacancy_id: form.vacancy_id,
            position: form.position.trim().to_string(),
            applicant: Applicant {
                name: form.applicant.name.trim().to_string(),
                email: form.applicant.email.trim().to_lowercase(),
                phone: form.applicant.phone.trim().to_string(),
            },
            cover_letter: form.cover_letter,
            resume_url: form.resume_url,
            status: ApplicationStatus::Pending,
            applied_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, form: ApplicationForm, now: DateTime<Utc>) {
        self.vacancy_id = form.vacancy_id;
        self.position = form.position.trim().to_string();
        self.applicant = Applicant {
            name: form.applicant.name.trim().to_string(),
            email: form.applicant.email.trim().to_lowercase(),
            phone: form.applicant.phone.trim().to_string(),
        };
        self.cover_letter = form.cover_letter;
        self.resume_url = form.resume_url;
        self.updated_at = now;
    }

    fn to_form(&self) -> ApplicationForm {
        ApplicationForm {
            vacancy_id: self.vacancy_id,
            position: self.position.clone(),
            applicant: self.applicant.clone(),
            cover_letter: self.cover_letter.clone(),
            resume_url: self.resume_url.clone(),
        }
    }

    fn detail(&self, _ctx: &RenderContext) -> ApplicationDetail {
        ApplicationDetail {
            allowed_transitions: self.status.allowed_transitions(),
            application: self.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: JobApplication,
    pub allowed_transitions: Vec<ApplicationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    fn vacancy_form() -> VacancyForm {
        VacancyForm {
            title: "Mathematics Teacher".to_string(),
            department: "Academic".to_string(),
            location: "Jakarta".to_string(),
            employment_type: EmploymentType::FullTime,
            description: "Teach grades 10-12".to_string(),
            requirements: vec!["S1 Mathematics".to_string()],
            salary_min: 6_000_000.0,
            salary_max: 9_000_000.0,
            deadline: NaiveDate::from_ymd_opt(2024, 12, 31),
            status: VacancyStatus::Open,
        }
    }

    fn application_form() -> ApplicationForm {
        ApplicationForm {
            vacancy_id: Uuid::new_v4(),
            position: "Mathematics Teacher".to_string(),
            applicant: Applicant {
                name: "Agus Pratama".to_string(),
                email: "agus@example.com".to_string(),
                phone: "081234567890".to_string(),
            },
            cover_letter: "I would like to apply".to_string(),
            resume_url: Some("https://example.com/cv.pdf".to_string()),
        }
    }

    #[test]
    fn test_forward_pipeline() {
        let path = [Pending, UnderReview, Shortlisted, Interview, Offered, Hired];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?}", pair);
        }
    }

    #[test]
    fn test_reject_and_withdraw_from_any_open_stage() {
        for status in [Pending, UnderReview, Shortlisted, Interview, Offered] {
            assert!(status.can_transition_to(Rejected));
            assert!(status.can_transition_to(Withdrawn));
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        for status in [Hired, Rejected, Withdrawn] {
            assert!(status.is_terminal());
            assert!(status.allowed_transitions().is_empty());
        }
    }

    #[test]
    fn test_skipping_stages_is_rejected() {
        assert!(!Pending.can_transition_to(Interview));
        assert!(!Shortlisted.can_transition_to(Hired));
        assert!(!Interview.can_transition_to(UnderReview));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_transition_error_message() {
        let err = Hired.transition(Pending).unwrap_err();
        assert_eq!(err.to_string(), "Cannot move application from hired to pending");
    }

    #[test]
    fn test_change_status_updates_record() {
        let mut app = JobApplication::create(application_form(), Uuid::new_v4(), Utc::now());
        assert_eq!(app.status, Pending);
        app.change_status(UnderReview, Utc::now()).unwrap();
        assert_eq!(app.status, UnderReview);
        assert!(app.change_status(Hired, Utc::now()).is_err());
        assert_eq!(app.status, UnderReview);
    }

    #[test]
    fn test_edit_does_not_touch_status() {
        let mut app = JobApplication::create(application_form(), Uuid::new_v4(), Utc::now());
        app.change_status(Rejected, Utc::now()).unwrap();
        let form = app.to_form();
        app.apply(form, Utc::now());
        assert_eq!(app.status, Rejected);
    }

    #[test]
    fn test_application_form_nested_errors() {
        let mut bad = application_form();
        bad.applicant.email = "nope".to_string();
        let errors = bad.validate().unwrap_err();
        assert!(errors.errors().contains_key("applicant"));
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_value(UnderReview).unwrap(), "under_review");
        let req: StatusChangeRequest = serde_json::from_str(r#"{"status":"shortlisted"}"#).unwrap();
        assert_eq!(req.status, Shortlisted);
    }

    #[test]
    fn test_vacancy_salary_range() {
        assert!(vacancy_form().validate().is_ok());
        let bad = VacancyForm {
            salary_min: 10_000_000.0,
            ..vacancy_form()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_vacancy_accepts_applications() {
        let vacancy = JobVacancy::create(vacancy_form(), Uuid::new_v4(), Utc::now());
        assert!(vacancy.accepts_applications(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!vacancy.accepts_applications(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    }
}
