//! Monthly payroll for staff.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::render::{format_rupiah, Render, RenderContext, RowField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    #[default]
    Draft,
    Approved,
    Paid,
}

impl BadgeValue for PayrollStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            PayrollStatus::Draft => Facet::new("draft", "Draft", "Draf"),
            PayrollStatus::Approved => Facet::new("approved", "Approved", "Disetujui"),
            PayrollStatus::Paid => Facet::new("paid", "Paid", "Dibayar"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            PayrollStatus::Draft => BadgeColor::Gray,
            PayrollStatus::Approved => BadgeColor::Blue,
            PayrollStatus::Paid => BadgeColor::Green,
        }
    }
}

/// A named allowance or deduction line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_component_amount"))]
pub struct SalaryComponent {
    #[validate(length(min = 1, max = 100, message = "Component name is required"))]
    pub name: String,

    pub amount: f64,
}

fn validate_component_amount(component: &SalaryComponent) -> Result<(), ValidationError> {
    shared::validation::validate_amount(component.amount)
}

impl SalaryComponent {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

fn total(components: &[SalaryComponent]) -> f64 {
    components.iter().map(|c| c.amount).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Payroll {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub teacher_name: String,
    pub position: String,
    /// Pay period, `YYYY-MM`.
    pub period: String,
    pub base_salary: f64,
    pub allowances: Vec<SalaryComponent>,
    pub deductions: Vec<SalaryComponent>,
    pub status: PayrollStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payroll {
    pub fn total_allowances(&self) -> f64 {
        total(&self.allowances)
    }

    pub fn total_deductions(&self) -> f64 {
        total(&self.deductions)
    }

    pub fn net_salary(&self) -> f64 {
        self.base_salary + self.total_allowances() - self.total_deductions()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_base_salary"))]
pub struct PayrollForm {
    pub teacher_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Teacher name is required"))]
    pub teacher_name: String,

    #[validate(length(min = 1, max = 100, message = "Position is required"))]
    pub position: String,

    #[validate(custom(function = "shared::validation::validate_period"))]
    pub period: String,

    pub base_salary: f64,

    #[validate(nested)]
    #[serde(default)]
    pub allowances: Vec<SalaryComponent>,

    #[validate(nested)]
    #[serde(default)]
    pub deductions: Vec<SalaryComponent>,

    #[serde(default)]
    pub status: PayrollStatus,
}

fn validate_base_salary(form: &PayrollForm) -> Result<(), ValidationError> {
    shared::validation::validate_amount(form.base_salary)
}

impl Record for Payroll {
    const KIND: EntityKind = EntityKind::Payroll;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.teacher_name.as_str(),
            self.position.as_str(),
            self.period.as_str(),
        ]
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(Facet::plain(&self.position))
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.teacher_id)
    }
}

impl Render for Payroll {
    fn title(&self) -> String {
        self.teacher_name.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(format!("{} - {}", self.position, self.period))
    }

    fn fields(&self, _ctx: &RenderContext) -> Vec<RowField> {
        vec![
            RowField::new("base_salary", format_rupiah(self.base_salary)),
            RowField::new("allowances", format_rupiah(self.total_allowances())),
            RowField::new("deductions", format_rupiah(self.total_deductions())),
            RowField::new("net_salary", format_rupiah(self.net_salary())),
        ]
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.status.badge(ctx.locale))
    }
}

impl Resource for Payroll {
    type Form = PayrollForm;
    type Detail = PayrollDetail;

    fn create(form: PayrollForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            teacher_id: form.teacher_id,
            teacher_name: form.teacher_name.trim().to_string(),
            position: form.position.trim().to_string(),
            period: form.period,
            base_salary: form.base_salary,
            allowances: form.allowances,
            deductions: form.deductions,
            status: form.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, form: PayrollForm, now: DateTime<Utc>) {
        self.teacher_id = form.teacher_id;
        self.teacher_name = form.teacher_name.trim().to_string();
        self.position = form.position.trim().to_string();
        self.period = form.period;
        self.base_salary = form.base_salary;
        self.allowances = form.allowances;
        self.deductions = form.deductions;
        self.status = form.status;
        self.updated_at = now;
    }

    fn to_form(&self) -> PayrollForm {
        PayrollForm {
            teacher_id: self.teacher_id,
            teacher_name: self.teacher_name.clone(),
            position: self.position.clone(),
            period: self.period.clone(),
            base_salary: self.base_salary,
            allowances: self.allowances.clone(),
            deductions: self.deductions.clone(),
            status: self.status,
        }
    }

    fn detail(&self, _ctx: &RenderContext) -> PayrollDetail {
        PayrollDetail {
            total_allowances: self.total_allowances(),
            total_deductions: self.total_deductions(),
            net_salary: self.net_salary(),
            payroll: self.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollDetail {
    #[serde(flatten)]
    pub payroll: Payroll,
    pub total_allowances: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Locale;

    fn form() -> PayrollForm {
        PayrollForm {
            teacher_id: Uuid::new_v4(),
            teacher_name: "Hendra Gunawan".to_string(),
            position: "Physics Teacher".to_string(),
            period: "2024-05".to_string(),
            base_salary: 7_000_000.0,
            allowances: vec![
                SalaryComponent::new("Transport", 500_000.0),
                SalaryComponent::new("Meal", 750_000.0),
            ],
            deductions: vec![SalaryComponent::new("BPJS", 280_000.0)],
            status: PayrollStatus::Approved,
        }
    }

    #[test]
    fn test_net_salary() {
        let payroll = Payroll::create(form(), Uuid::new_v4(), Utc::now());
        assert_eq!(payroll.total_allowances(), 1_250_000.0);
        assert_eq!(payroll.total_deductions(), 280_000.0);
        assert_eq!(payroll.net_salary(), 7_970_000.0);
    }

    #[test]
    fn test_net_salary_without_components() {
        let payroll = Payroll::create(
            PayrollForm {
                allowances: vec![],
                deductions: vec![],
                ..form()
            },
            Uuid::new_v4(),
            Utc::now(),
        );
        assert_eq!(payroll.net_salary(), 7_000_000.0);
    }

    fn edited(payroll: &mut Payroll, change: impl FnOnce(&mut PayrollForm)) -> PayrollDetail {
        let mut edit = payroll.to_form();
        change(&mut edit);
        payroll.apply(edit, Utc::now());
        payroll.detail(&RenderContext::current(Locale::En))
    }

    #[test]
    fn test_net_salary_follows_single_field_edits() {
        let mut payroll = Payroll::create(form(), Uuid::new_v4(), Utc::now());
        assert_eq!(payroll.net_salary(), 7_970_000.0);

        let detail = edited(&mut payroll, |f| f.base_salary = 8_000_000.0);
        assert_eq!(detail.net_salary, 8_970_000.0);
        assert_eq!(detail.total_allowances, 1_250_000.0);

        let detail = edited(&mut payroll, |f| f.allowances[1].amount = 1_000_000.0);
        assert_eq!(detail.total_allowances, 1_500_000.0);
        assert_eq!(detail.net_salary, 9_220_000.0);

        let detail = edited(&mut payroll, |f| f.deductions[0].amount = 400_000.0);
        assert_eq!(detail.total_deductions, 400_000.0);
        assert_eq!(detail.net_salary, 9_100_000.0);

        let detail = edited(&mut payroll, |f| {
            f.deductions.push(SalaryComponent::new("Loan", 100_000.0))
        });
        assert_eq!(detail.net_salary, 9_000_000.0);
        assert_eq!(
            payroll.net_salary(),
            payroll.base_salary + payroll.total_allowances() - payroll.total_deductions()
        );
    }

    #[test]
    fn test_period_validation() {
        assert!(form().validate().is_ok());
        let bad = PayrollForm {
            period: "May 2024".to_string(),
            ..form()
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("period"));
    }

    #[test]
    fn test_negative_component_rejected() {
        let mut bad = form();
        bad.deductions.push(SalaryComponent::new("Loan", -1.0));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_owner_is_teacher() {
        let f = form();
        let teacher = f.teacher_id;
        let payroll = Payroll::create(f, Uuid::new_v4(), Utc::now());
        assert_eq!(payroll.owner_id(), Some(teacher));
    }
}
