//! Course payments made by students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::render::{format_date, format_rupiah, Render, RenderContext, RowField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl BadgeValue for PaymentStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            PaymentStatus::Pending => Facet::new("pending", "Pending", "Menunggu"),
            PaymentStatus::Paid => Facet::new("paid", "Paid", "Lunas"),
            PaymentStatus::Failed => Facet::new("failed", "Failed", "Gagal"),
            PaymentStatus::Refunded => Facet::new("refunded", "Refunded", "Dikembalikan"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            PaymentStatus::Pending => BadgeColor::Yellow,
            PaymentStatus::Paid => BadgeColor::Green,
            PaymentStatus::Failed => BadgeColor::Red,
            PaymentStatus::Refunded => BadgeColor::Gray,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    BankTransfer,
    CreditCard,
    EWallet,
    Cash,
}

impl BadgeValue for PaymentMethod {
    fn facet(&self) -> Facet<'static> {
        match self {
            PaymentMethod::BankTransfer => Facet::new("bank_transfer", "Bank transfer", "Transfer bank"),
            PaymentMethod::CreditCard => Facet::new("credit_card", "Credit card", "Kartu kredit"),
            PaymentMethod::EWallet => Facet::new("e_wallet", "E-wallet", "Dompet digital"),
            PaymentMethod::Cash => Facet::new("cash", "Cash", "Tunai"),
        }
    }

    fn color(&self) -> BadgeColor {
        BadgeColor::Gray
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Payment {
    pub id: Uuid,
    pub invoice_number: String,
    pub student_id: Uuid,
    pub student_name: String,
    pub course_name: String,
    pub price: f64,
    pub discount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Amount charged after discount.
    pub fn final_price(&self) -> f64 {
        self.price - self.discount
    }

    fn stamp_paid(&mut self, now: DateTime<Utc>) {
        match self.status {
            PaymentStatus::Paid if self.paid_at.is_none() => self.paid_at = Some(now),
            PaymentStatus::Paid | PaymentStatus::Refunded => {}
            PaymentStatus::Pending | PaymentStatus::Failed => self.paid_at = None,
        }
    }
}

/// Invoice number, `INV-<yyyymmdd>-<id prefix>`.
pub fn invoice_number(id: Uuid, created_at: DateTime<Utc>) -> String {
    let simple = id.simple().to_string().to_uppercase();
    format!("INV-{}-{}", created_at.format("%Y%m%d"), &simple[..6])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_discount"))]
pub struct PaymentForm {
    pub student_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Student name is required"))]
    pub student_name: String,

    #[validate(length(min = 1, max = 150, message = "Course name is required"))]
    pub course_name: String,

    pub price: f64,

    #[serde(default)]
    pub discount: f64,

    #[serde(default)]
    pub method: PaymentMethod,

    #[serde(default)]
    pub status: PaymentStatus,
}

fn validate_discount(form: &PaymentForm) -> Result<(), ValidationError> {
    shared::validation::validate_amount(form.price)?;
    shared::validation::validate_amount(form.discount)?;
    if form.discount > form.price {
        let mut err = ValidationError::new("discount_range");
        err.message = Some("Discount cannot exceed the price".into());
        return Err(err);
    }
    Ok(())
}

impl Record for Payment {
    const KIND: EntityKind = EntityKind::Payments;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.invoice_number.as_str(),
            self.student_name.as_str(),
            self.course_name.as_str(),
        ]
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(self.method.facet())
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.student_id)
    }
}

impl Render for Payment {
    fn title(&self) -> String {
        self.student_name.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(self.course_name.clone())
    }

    fn fields(&self, ctx: &RenderContext) -> Vec<RowField> {
        vec![
            RowField::new("invoice", &self.invoice_number),
            RowField::new("price", format_rupiah(self.price)),
            RowField::new("discount", format_rupiah(self.discount)),
            RowField::new("final_price", format_rupiah(self.final_price())),
            RowField::new("method", self.method.facet().label(ctx.locale)),
            RowField::new(
                "paid_at",
                self.paid_at
                    .map(|at| format_date(at.date_naive()))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.status.badge(ctx.locale))
    }
}

impl Resource for Payment {
    type Form = PaymentForm;
    type Detail = PaymentDetail;

    fn create(form: PaymentForm, id: Uuid, now: DateTime<Utc>) -> Self {
        let mut payment = Self {
            id,
            invoice_number: invoice_number(id, now),
            student_id: form.student_id,
            student_name: form.student_name.trim().to_string(),
            course_name: form.course_name.trim().to_string(),
            price: form.price,
            discount: form.discount,
            method: form.method,
            status: form.status,
            paid_at: None,
            created_at: now,
            updated_at: now,
        };
        payment.stamp_paid(now);
        payment
    }

    fn apply(&mut self, form: PaymentForm, now: DateTime<Utc>) {
        self.student_id = form.student_id;
        self.student_name = form.student_name.trim().to_string();
        self.course_name = form.course_name.trim().to_string();
        self.price = form.price;
        self.discount = form.discount;
        self.method = form.method;
        self.status = form.status;
        self.stamp_paid(now);
        self.updated_at = now;
    }

    fn to_form(&self) -> PaymentForm {
        PaymentForm {
            student_id: self.student_id,
            student_name: self.student_name.clone(),
            course_name: self.course_name.clone(),
            price: self.price,
            discount: self.discount,
            method: self.method,
            status: self.status,
        }
    }

    fn detail(&self, _ctx: &RenderContext) -> PaymentDetail {
        PaymentDetail {
            final_price: self.final_price(),
            payment: self.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentDetail {
    #[serde(flatten)]
    pub payment: Payment,
    pub final_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Locale;

    fn form(price: f64, discount: f64, status: PaymentStatus) -> PaymentForm {
        PaymentForm {
            student_id: Uuid::new_v4(),
            student_name: "Dian Sastro".to_string(),
            course_name: "Data Science Fundamentals".to_string(),
            price,
            discount,
            method: PaymentMethod::BankTransfer,
            status,
        }
    }

    #[test]
    fn test_final_price() {
        let payment = Payment::create(
            form(2_000_000.0, 250_000.0, PaymentStatus::Pending),
            Uuid::new_v4(),
            Utc::now(),
        );
        assert_eq!(payment.final_price(), 1_750_000.0);
    }

    #[test]
    fn test_final_price_follows_discount_edit() {
        let mut payment = Payment::create(
            form(1_000_000.0, 0.0, PaymentStatus::Pending),
            Uuid::new_v4(),
            Utc::now(),
        );
        let mut edit = payment.to_form();
        edit.discount = 100_000.0;
        payment.apply(edit, Utc::now());
        assert_eq!(payment.final_price(), 900_000.0);
        assert_eq!(
            payment.detail(&RenderContext::current(Locale::En)).final_price,
            900_000.0
        );
    }

    #[test]
    fn test_final_price_follows_price_edit() {
        let mut payment = Payment::create(
            form(1_000_000.0, 150_000.0, PaymentStatus::Pending),
            Uuid::new_v4(),
            Utc::now(),
        );
        let mut edit = payment.to_form();
        edit.price = 1_200_000.0;
        payment.apply(edit, Utc::now());

        assert_eq!(payment.discount, 150_000.0);
        assert_eq!(payment.final_price(), 1_050_000.0);
        assert_eq!(
            payment.detail(&RenderContext::current(Locale::En)).final_price,
            1_050_000.0
        );
    }

    #[test]
    fn test_discount_cannot_exceed_price() {
        assert!(form(100.0, 100.0, PaymentStatus::Pending).validate().is_ok());
        assert!(form(100.0, 101.0, PaymentStatus::Pending).validate().is_err());
        assert!(form(-1.0, 0.0, PaymentStatus::Pending).validate().is_err());
    }

    #[test]
    fn test_paid_at_stamped_once() {
        let now = Utc::now();
        let mut payment = Payment::create(
            form(500_000.0, 0.0, PaymentStatus::Pending),
            Uuid::new_v4(),
            now,
        );
        assert!(payment.paid_at.is_none());

        let mut edit = payment.to_form();
        edit.status = PaymentStatus::Paid;
        payment.apply(edit.clone(), now);
        let stamped = payment.paid_at;
        assert_eq!(stamped, Some(now));

        payment.apply(edit, now + chrono::Duration::days(1));
        assert_eq!(payment.paid_at, stamped);
    }

    #[test]
    fn test_invoice_number_format() {
        let id = Uuid::parse_str("abcdef12-0000-4000-8000-000000000000").unwrap();
        let at = DateTime::parse_from_rfc3339("2024-03-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(invoice_number(id, at), "INV-20240305-ABCDEF");
    }

    #[test]
    fn test_status_facet_labels() {
        let payment = Payment::create(
            form(1.0, 0.0, PaymentStatus::Paid),
            Uuid::new_v4(),
            Utc::now(),
        );
        assert!(payment.status().unwrap().matches("lunas"));
        assert!(payment.paid_at.is_some());
    }
}
