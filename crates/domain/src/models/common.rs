//! Shared vocabulary for record models: locales, facets, badges and entity kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::user::Role;

/// Display language for labels and empty-state messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }

    /// Picks a locale from an `Accept-Language` header value.
    ///
    /// The first language tag wins; anything that is not Indonesian falls
    /// back to English.
    pub fn from_accept_language(header: &str) -> Self {
        let first = header
            .split(',')
            .next()
            .and_then(|tag| tag.split(';').next())
            .map(|tag| tag.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if first == "id" || first.starts_with("id-") || first == "in" {
            Locale::Id
        } else {
            Locale::En
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "id" => Ok(Locale::Id),
            _ => Err(format!("Invalid locale: {}", s)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A filterable field value: a wire key plus its localized labels.
///
/// Closed enums expose their values as facets so filters can match either
/// the key (`active`) or a label (`Aktif`). Free-text fields such as a
/// course category use [`Facet::plain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facet<'a> {
    pub key: &'a str,
    pub label_en: &'a str,
    pub label_id: &'a str,
}

impl<'a> Facet<'a> {
    pub const fn new(key: &'a str, label_en: &'a str, label_id: &'a str) -> Self {
        Self {
            key,
            label_en,
            label_id,
        }
    }

    /// A facet whose key is also its label in every locale.
    pub const fn plain(value: &'a str) -> Self {
        Self::new(value, value, value)
    }

    pub fn label(&self, locale: Locale) -> &'a str {
        match locale {
            Locale::En => self.label_en,
            Locale::Id => self.label_id,
        }
    }

    /// Case-insensitive match against the key or any label.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        [self.key, self.label_en, self.label_id]
            .iter()
            .any(|candidate| candidate.trim().to_lowercase() == needle.to_lowercase())
    }
}

/// Fixed badge palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
    Purple,
    Gray,
}

impl BadgeColor {
    /// CSS classes the front end applies for this color.
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeColor::Green => "bg-green-100 text-green-800",
            BadgeColor::Blue => "bg-blue-100 text-blue-800",
            BadgeColor::Yellow => "bg-yellow-100 text-yellow-800",
            BadgeColor::Orange => "bg-orange-100 text-orange-800",
            BadgeColor::Red => "bg-red-100 text-red-800",
            BadgeColor::Purple => "bg-purple-100 text-purple-800",
            BadgeColor::Gray => "bg-gray-100 text-gray-800",
        }
    }
}

/// A rendered status/category badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Badge {
    pub key: String,
    pub label: String,
    pub color: BadgeColor,
    pub class_name: String,
}

impl Badge {
    pub fn new(facet: Facet<'_>, color: BadgeColor, locale: Locale) -> Self {
        Self {
            key: facet.key.to_string(),
            label: facet.label(locale).to_string(),
            color,
            class_name: color.css_class().to_string(),
        }
    }
}

/// Implemented by closed enums that render as a badge.
pub trait BadgeValue {
    fn facet(&self) -> Facet<'static>;
    fn color(&self) -> BadgeColor;

    fn badge(&self, locale: Locale) -> Badge {
        Badge::new(self.facet(), self.color(), locale)
    }
}

/// Every record collection the platform manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Users,
    Courses,
    Grades,
    Schedules,
    Certificates,
    Vacancies,
    Applications,
    Payments,
    Payroll,
    Attendance,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Users,
        EntityKind::Courses,
        EntityKind::Grades,
        EntityKind::Schedules,
        EntityKind::Certificates,
        EntityKind::Vacancies,
        EntityKind::Applications,
        EntityKind::Payments,
        EntityKind::Payroll,
        EntityKind::Attendance,
    ];

    /// Path segment and storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Courses => "courses",
            EntityKind::Grades => "grades",
            EntityKind::Schedules => "schedules",
            EntityKind::Certificates => "certificates",
            EntityKind::Vacancies => "vacancies",
            EntityKind::Applications => "applications",
            EntityKind::Payments => "payments",
            EntityKind::Payroll => "payroll",
            EntityKind::Attendance => "attendance",
        }
    }

    /// Plural, lower-case collection name for messages.
    pub fn plural(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (EntityKind::Users, Locale::En) => "users",
            (EntityKind::Users, Locale::Id) => "pengguna",
            (EntityKind::Courses, Locale::En) => "courses",
            (EntityKind::Courses, Locale::Id) => "kursus",
            (EntityKind::Grades, Locale::En) => "grades",
            (EntityKind::Grades, Locale::Id) => "nilai",
            (EntityKind::Schedules, Locale::En) => "schedules",
            (EntityKind::Schedules, Locale::Id) => "jadwal",
            (EntityKind::Certificates, Locale::En) => "certificates",
            (EntityKind::Certificates, Locale::Id) => "sertifikat",
            (EntityKind::Vacancies, Locale::En) => "job vacancies",
            (EntityKind::Vacancies, Locale::Id) => "lowongan kerja",
            (EntityKind::Applications, Locale::En) => "job applications",
            (EntityKind::Applications, Locale::Id) => "lamaran kerja",
            (EntityKind::Payments, Locale::En) => "payments",
            (EntityKind::Payments, Locale::Id) => "pembayaran",
            (EntityKind::Payroll, Locale::En) => "payroll records",
            (EntityKind::Payroll, Locale::Id) => "data penggajian",
            (EntityKind::Attendance, Locale::En) => "attendance records",
            (EntityKind::Attendance, Locale::Id) => "data absensi",
        }
    }

    /// Singular, capitalised English name for error messages.
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Users => "User",
            EntityKind::Courses => "Course",
            EntityKind::Grades => "Grade",
            EntityKind::Schedules => "Schedule",
            EntityKind::Certificates => "Certificate",
            EntityKind::Vacancies => "Job vacancy",
            EntityKind::Applications => "Job application",
            EntityKind::Payments => "Payment",
            EntityKind::Payroll => "Payroll record",
            EntityKind::Attendance => "Attendance record",
        }
    }

    /// Roles allowed to create, edit and delete records of this kind.
    pub fn managers(&self) -> &'static [Role] {
        match self {
            EntityKind::Grades | EntityKind::Attendance | EntityKind::Schedules => {
                &[Role::Admin, Role::Teacher]
            }
            _ => &[Role::Admin],
        }
    }

    /// Roles that only see the records they own.
    pub fn scoped_roles(&self) -> &'static [Role] {
        match self {
            EntityKind::Grades
            | EntityKind::Attendance
            | EntityKind::Certificates
            | EntityKind::Payments => &[Role::Student],
            EntityKind::Payroll => &[Role::Teacher, Role::Student],
            _ => &[],
        }
    }

    /// Whether deleting a record retires it in place instead of removing it.
    pub fn retires_on_delete(&self) -> bool {
        matches!(self, EntityKind::Users)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown record kind: {}", s))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
