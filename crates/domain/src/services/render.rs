//! Table/card rendering for list screens.
//!
//! Each visible record becomes a [`TableRow`]: identifying fields, an
//! optional badge and a view/edit/delete action menu. Rendering is
//! independent of filtering and pagination; it only ever sees one page.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::common::{Badge, EntityKind, Locale};
use crate::record::Record;

/// Base path of the record endpoints used in action links.
pub const API_BASE: &str = "/api/v1";

/// Locale and reference date for read-time projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub locale: Locale,
    pub today: NaiveDate,
}

impl RenderContext {
    pub fn new(locale: Locale, today: NaiveDate) -> Self {
        Self { locale, today }
    }

    /// Context dated today (UTC).
    pub fn current(locale: Locale) -> Self {
        Self::new(locale, Utc::now().date_naive())
    }
}

/// Per-record display hooks.
pub trait Render: Record {
    fn title(&self) -> String;

    fn subtitle(&self) -> Option<String> {
        None
    }

    fn fields(&self, ctx: &RenderContext) -> Vec<RowField>;

    fn badge(&self, ctx: &RenderContext) -> Option<Badge>;
}

/// A label/value pair shown in a row or card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowField {
    pub label: String,
    pub value: String,
}

impl RowField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Entries of the row-level action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    Deactivate,
}

impl ActionKind {
    pub fn method(&self) -> &'static str {
        match self {
            ActionKind::View => "GET",
            ActionKind::Edit => "PUT",
            ActionKind::Delete | ActionKind::Deactivate => "DELETE",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ActionKind::View, Locale::En) => "View",
            (ActionKind::View, Locale::Id) => "Lihat",
            (ActionKind::Edit, Locale::En) => "Edit",
            (ActionKind::Edit, Locale::Id) => "Ubah",
            (ActionKind::Delete, Locale::En) => "Delete",
            (ActionKind::Delete, Locale::Id) => "Hapus",
            (ActionKind::Deactivate, Locale::En) => "Deactivate",
            (ActionKind::Deactivate, Locale::Id) => "Nonaktifkan",
        }
    }
}

/// One action menu entry, expressed as the request that performs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub kind: ActionKind,
    pub label: String,
    pub method: String,
    pub href: String,
}

/// A rendered record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub fields: Vec<RowField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub actions: Vec<RowAction>,
}

/// Why a rendered page has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty.
    NoRecords,
    /// Records exist but none pass the active filters.
    NoMatches,
}

/// A rendered page: rows, or an empty-state message when there are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    pub rows: Vec<TableRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl RenderedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The action menu for a record.
pub fn row_actions(kind: EntityKind, id: Uuid, locale: Locale) -> Vec<RowAction> {
    let removal = if kind.retires_on_delete() {
        ActionKind::Deactivate
    } else {
        ActionKind::Delete
    };

    [ActionKind::View, ActionKind::Edit, removal]
        .into_iter()
        .map(|action| RowAction {
            kind: action,
            label: action.label(locale).to_string(),
            method: action.method().to_string(),
            href: format!("{}/{}/{}", API_BASE, kind.as_str(), id),
        })
        .collect()
}

pub fn render_row<R: Render>(record: &R, ctx: &RenderContext) -> TableRow {
    TableRow {
        id: record.id(),
        title: record.title(),
        subtitle: record.subtitle(),
        fields: record.fields(ctx),
        badge: record.badge(ctx),
        actions: row_actions(R::KIND, record.id(), ctx.locale),
    }
}

/// Localized empty-state message for a collection.
pub fn empty_message(kind: EntityKind, locale: Locale, state: EmptyState) -> String {
    let plural = kind.plural(locale);
    match (locale, state) {
        (Locale::En, EmptyState::NoRecords) => format!("No {} yet", plural),
        (Locale::En, EmptyState::NoMatches) => {
            format!("No {} match the current filters", plural)
        }
        (Locale::Id, EmptyState::NoRecords) => format!("Belum ada {}", plural),
        (Locale::Id, EmptyState::NoMatches) => {
            format!("Tidak ada {} yang sesuai dengan filter", plural)
        }
    }
}

/// Renders a page of records.
///
/// `empty` says which message to show if `records` is empty.
pub fn render_table<R: Render>(
    records: &[R],
    ctx: &RenderContext,
    empty: EmptyState,
) -> RenderedTable {
    if records.is_empty() {
        return RenderedTable {
            rows: Vec::new(),
            empty_message: Some(empty_message(R::KIND, ctx.locale, empty)),
        };
    }

    RenderedTable {
        rows: records.iter().map(|record| render_row(record, ctx)).collect(),
        empty_message: None,
    }
}

/// Formats an amount as Indonesian rupiah, e.g. `Rp 1.250.000`.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Formats a date for display, e.g. `05 Mar 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_actions_delete() {
        let id = Uuid::nil();
        let actions = row_actions(EntityKind::Courses, id, Locale::En);
        let kinds: Vec<_> = actions.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::View, ActionKind::Edit, ActionKind::Delete]
        );
        assert_eq!(actions[0].method, "GET");
        assert_eq!(actions[1].method, "PUT");
        assert_eq!(actions[2].method, "DELETE");
        assert_eq!(
            actions[0].href,
            format!("/api/v1/courses/{}", Uuid::nil())
        );
    }

    #[test]
    fn test_row_actions_users_deactivate() {
        let actions = row_actions(EntityKind::Users, Uuid::nil(), Locale::Id);
        assert_eq!(actions[2].kind, ActionKind::Deactivate);
        assert_eq!(actions[2].label, "Nonaktifkan");
        assert_eq!(actions[0].label, "Lihat");
    }

    #[test]
    fn test_empty_message_localized() {
        assert_eq!(
            empty_message(EntityKind::Courses, Locale::En, EmptyState::NoRecords),
            "No courses yet"
        );
        assert_eq!(
            empty_message(EntityKind::Grades, Locale::Id, EmptyState::NoMatches),
            "Tidak ada nilai yang sesuai dengan filter"
        );
        assert_eq!(
            empty_message(EntityKind::Schedules, Locale::Id, EmptyState::NoRecords),
            "Belum ada jadwal"
        );
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(950.0), "Rp 950");
        assert_eq!(format_rupiah(1_000.0), "Rp 1.000");
        assert_eq!(format_rupiah(1_250_000.0), "Rp 1.250.000");
        assert_eq!(format_rupiah(-75_500.0), "-Rp 75.500");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05 Mar 2024");
    }
}
