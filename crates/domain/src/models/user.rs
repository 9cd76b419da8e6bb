//! Platform user records (admins, teachers and students).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet};
use crate::record::{Record, Resource};
use crate::services::render::{format_date, Render, RenderContext, RowField};

/// Platform role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl BadgeValue for Role {
    fn facet(&self) -> Facet<'static> {
        match self {
            Role::Admin => Facet::new("admin", "Admin", "Admin"),
            Role::Teacher => Facet::new("teacher", "Teacher", "Guru"),
            Role::Student => Facet::new("student", "Student", "Siswa"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            Role::Admin => BadgeColor::Purple,
            Role::Teacher => BadgeColor::Blue,
            Role::Student => BadgeColor::Green,
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" | "guru" => Ok(Role::Teacher),
            "student" | "siswa" => Ok(Role::Student),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account status. Users are never removed, only deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl BadgeValue for UserStatus {
    fn facet(&self) -> Facet<'static> {
        match self {
            UserStatus::Active => Facet::new("active", "Active", "Aktif"),
            UserStatus::Inactive => Facet::new("inactive", "Inactive", "Nonaktif"),
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            UserStatus::Active => BadgeColor::Green,
            UserStatus::Inactive => BadgeColor::Red,
        }
    }
}

/// A user of the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Create/edit form for users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UserForm {
    #[validate(
        length(min = 3, max = 100, message = "Name must be 3-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(email(message = "Email address is not valid"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: String,

    pub role: Role,

    #[serde(default)]
    pub status: UserStatus,
}

impl Record for UserRecord {
    const KIND: EntityKind = EntityKind::Users;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }

    fn category(&self) -> Option<Facet<'_>> {
        Some(self.role.facet())
    }

    fn status(&self) -> Option<Facet<'_>> {
        Some(self.status.facet())
    }

    fn retire(&mut self, now: DateTime<Utc>) -> bool {
        self.status = UserStatus::Inactive;
        self.updated_at = now;
        true
    }
}

impl Render for UserRecord {
    fn title(&self) -> String {
        self.name.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(self.email.clone())
    }

    fn fields(&self, ctx: &RenderContext) -> Vec<RowField> {
        vec![
            RowField::new("phone", &self.phone),
            RowField::new("role", self.role.facet().label(ctx.locale)),
            RowField::new("joined", format_date(self.created_at.date_naive())),
        ]
    }

    fn badge(&self, ctx: &RenderContext) -> Option<Badge> {
        Some(self.status.badge(ctx.locale))
    }
}

impl Resource for UserRecord {
    type Form = UserForm;
    type Detail = UserRecord;

    fn create(form: UserForm, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: form.name.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            phone: form.phone.trim().to_string(),
            role: form.role,
            status: form.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, form: UserForm, now: DateTime<Utc>) {
        self.name = form.name.trim().to_string();
        self.email = form.email.trim().to_lowercase();
        self.phone = form.phone.trim().to_string();
        self.role = form.role;
        self.status = form.status;
        self.updated_at = now;
    }

    fn to_form(&self) -> UserForm {
        UserForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
            status: self.status,
        }
    }

    fn detail(&self, _ctx: &RenderContext) -> UserRecord {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Locale;

    fn form() -> UserForm {
        UserForm {
            name: "Siti Rahma".to_string(),
            email: "Siti.Rahma@Example.com".to_string(),
            phone: "+62 812-3456-7890".to_string(),
            role: Role::Student,
            status: UserStatus::Active,
        }
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!("Siswa".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Teacher.to_string(), "teacher");
    }

    #[test]
    fn test_user_form_valid() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_user_form_reports_each_bad_field() {
        let bad = UserForm {
            name: "Al".to_string(),
            email: "not-an-email".to_string(),
            phone: "123".to_string(),
            ..form()
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn test_user_form_rejects_blank_name() {
        let bad = UserForm {
            name: "     ".to_string(),
            ..form()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_create_normalizes_email() {
        let user = UserRecord::create(form(), Uuid::new_v4(), Utc::now());
        assert_eq!(user.email, "siti.rahma@example.com");
        assert!(user.is_active());
    }

    #[test]
    fn test_retire_flips_status_and_keeps_record() {
        let mut user = UserRecord::create(form(), Uuid::new_v4(), Utc::now());
        assert!(user.retire(Utc::now()));
        assert_eq!(user.status, UserStatus::Inactive);
    }

    #[test]
    fn test_status_facet_matches_indonesian_label() {
        let user = UserRecord::create(form(), Uuid::new_v4(), Utc::now());
        assert!(user.status().unwrap().matches("Aktif"));
        assert!(user.category().unwrap().matches("siswa"));
    }

    #[test]
    fn test_render_badge() {
        let user = UserRecord::create(form(), Uuid::new_v4(), Utc::now());
        let ctx = RenderContext::current(Locale::Id);
        let badge = user.badge(&ctx).unwrap();
        assert_eq!(badge.label, "Aktif");
        assert_eq!(badge.color, BadgeColor::Green);
    }

    #[test]
    fn test_to_form_roundtrips_fields() {
        let user = UserRecord::create(form(), Uuid::new_v4(), Utc::now());
        let mut edited = user.clone();
        edited.apply(user.to_form(), Utc::now());
        assert_eq!(edited.name, user.name);
        assert_eq!(edited.email, user.email);
        assert_eq!(edited.role, user.role);
    }
}
