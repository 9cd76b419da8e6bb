//! Issued certificates.
//!
//! Validity is not stored: it is computed from `valid_until` against the
//! date of the read.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::render::{format_date, Render, RenderContext, RowField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateType {
    #[default]
    Completion,
    Achievement,
    Participation,
}

impl BadgeValue for CertificateType {
    fn facet(&self) -> Facet<'static> {
        match self {
            CertificateType::Completion => Facet::new("completion", "Completion", "Kelulusan"),
            CertificateType::Achievement => Facet::new("achievement", "Achievement", "Prestasi"),
            CertificateType::Participation => {
                Facet::new("participation", "Participation", "Partisipasi")
            }
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            CertificateType::Completion => BadgeColor::Blue,
            CertificateType::Achievement => BadgeColor::Purple,
            CertificateType::Participation => BadgeColor::Gray,
        }
    }
}

/// Read-time validity of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateValidity {
    Valid,
    Expired,
    /// No expiry date.
    Permanent,
}

impl BadgeValue for CertificateValidity {
    fn facet(&self) -> Facet<'static> {
        match self {
            CertificateValidity::Valid => Facet::new("valid", "Valid", "Berlaku"),
            CertificateValidity::Expired => Facet::new("expired", "Expired", "Kedaluwarsa"),
            CertificateValidity::Permanent => Facet::new("permanent", "Permanent", "Permanen"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            CertificateValidity::Valid => BadgeColor::Green,
            CertificateValidity::Expired => BadgeColor::Red,
            CertificateValidity::Permanent => BadgeColor::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Certificate {
    pub id: Uuid,
    pub certificate_number: String,
    pub student_id: Uuid,
    pub student_name: String,
    pub course_name: String,
    pub certificate_type: CertificateType,
    pub issue_date: NaiveDate,
    pub valid_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Certificate {
    /// Validity as of `today`; a certificate is still valid on its last day.
    pub fn validity(&self, today: NaiveDate) -> CertificateValidity {
        match self.valid_until {
            None => CertificateValidity::Permanent,
            Some(until) if until >= today => CertificateValidity::Valid,
            Some(_) => CertificateValidity::Expired,
        }
    }

    /// Validity as of the current UTC date.
    pub fn current_validity(&self) -> CertificateValidity {
        self.validity(Utc::now().date_naive())
    }
}

/// Number printed on a certificate, `CERT-<year>-<id prefix>`.
pub fn certificate_number(id: Uuid, issue_date: NaiveDate) -> String {
    let simple = id.simple().to_string().to_uppercase();
    format!("CERT-{}-{}", issue_date.year(), &simple[..8])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_certificate_dates"))]
pub struct CertificateForm {
    pub student_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Student name is required"))]
    pub student_name: String,

    #[validate(
        length(min = 1, max = 150, message = "Course name is required"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub course_name: String,

    #[serde(default)]
    pub certificate_type: CertificateType,

    pub issue_date: NaiveDate,

    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
}

fn validate_certificate_dates(form: &CertificateForm) -> Result<(), ValidationError> {
    match form.valid_until {
        Some(until) => shared::validation::validate_date_order(form.issue_date, until),
        None => Ok(()),
    }
}

impl Record for Certificate {
    const KIND: EntityKind = EntityKind::Certificates;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.certificate_number.as_str(),
            self.student_name.as_str(),
            self.course_name.as_str(),
        ]
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(self.certificate_type.facet())
    }

    /// Filters on validity as of today, the same value the badge shows.
    fn status(&self) -> Option<Facet<'_>> {
        Some(self.current_validity().facet())
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.student_id)
    }
}

impl Render for Certificate {
    fn title(&self) -> String {
        self.course_name.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(self.student_name.clone())
    }

    fn fields(&self, ctx: &RenderContext) -> Vec<RowField> {
        vec![
            RowField::new("number", &self.certificate_number),
            RowField::new("type", self.certificate_type.facet().label(ctx.locale)),
            RowField::new("issued", format_date(self.issue_date)),
            RowField::new(
                "valid_until",
                self.valid_until.map(format_date).unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.validity(ctx.today).badge(ctx.locale))
    }
}

impl Resource for Certificate {
    type Form = CertificateForm;
    type Detail = CertificateDetail;

    fn create(form: CertificateForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            certificate_number: certificate_number(id, form.issue_date),
            student_id: form.student_id,
            student_name: form.student_name.trim().to_string(),
            course_name: form.course_name.trim().to_string(),
            certificate_type: form.certificate_type,
            issue_date: form.issue_date,
            valid_until: form.valid_until,
            created_at: now,
            updated_at: now,
        }
    }

    /// The certificate number is fixed at issue and survives edits.
    fn apply(&mut self, form: CertificateForm, now: DateTime<Utc>) {
        self.student_id = form.student_id;
        self.student_name = form.student_name.trim().to_string();
        self.course_name = form.course_name.trim().to_string();
        self.certificate_type = form.certificate_type;
        self.issue_date = form.issue_date;
        self.valid_until = form.valid_until;
        self.updated_at = now;
    }

    fn to_form(&self) -> CertificateForm {
        CertificateForm {
            student_id: self.student_id,
            student_name: self.student_name.clone(),
            course_name: self.course_name.clone(),
            certificate_type: self.certificate_type,
            issue_date: self.issue_date,
            valid_until: self.valid_until,
        }
    }

    fn detail(&self, ctx: &RenderContext) -> CertificateDetail {
        let validity = self.validity(ctx.today);
        CertificateDetail {
            certificate: self.clone(),
            validity,
            validity_badge: validity.badge(ctx.locale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateDetail {
    #[serde(flatten)]
    pub certificate: Certificate,
    pub validity: CertificateValidity,
    pub validity_badge: Badge,
}
