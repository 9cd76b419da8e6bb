//! Filter predicates for list screens.
//!
//! Every active filter is a predicate over a record; a record is visible
//! when it passes all of them. Filters whose value is empty or `all` are
//! inactive.

use serde::{Deserialize, Serialize};

use crate::models::common::Facet;
use crate::record::Record;

/// Value meaning "no filter" in select inputs.
pub const ALL: &str = "all";

/// Normalizes a raw filter value: blank and `all` become `None`.
pub fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
        .map(str::to_string)
}

/// Active filter values of a list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, value: &str) -> Self {
        self.search = normalize(Some(value));
        self
    }

    pub fn with_category(mut self, value: &str) -> Self {
        self.category = normalize(Some(value));
        self
    }

    pub fn with_status(mut self, value: &str) -> Self {
        self.status = normalize(Some(value));
        self
    }

    pub fn with_level(mut self, value: &str) -> Self {
        self.level = normalize(Some(value));
        self
    }

    /// Whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    pub fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates = Vec::with_capacity(4);
        if let Some(term) = self.search.as_deref() {
            predicates.push(Predicate::Search(term));
        }
        if let Some(value) = self.category.as_deref() {
            predicates.push(Predicate::Category(value));
        }
        if let Some(value) = self.status.as_deref() {
            predicates.push(Predicate::Status(value));
        }
        if let Some(value) = self.level.as_deref() {
            predicates.push(Predicate::Level(value));
        }
        predicates
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.predicates().iter().all(|p| p.test(record))
    }

    /// Keeps the matching records, preserving order.
    pub fn apply<R: Record>(&self, records: Vec<R>) -> Vec<R> {
        let predicates = self.predicates();
        if predicates.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|r| predicates.iter().all(|p| p.test(r)))
            .collect()
    }
}

/// A single named filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    /// Case-insensitive substring over the record's search fields.
    Search(&'a str),
    Category(&'a str),
    Status(&'a str),
    Level(&'a str),
}

impl Predicate<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Search(_) => "search",
            Predicate::Category(_) => "category",
            Predicate::Status(_) => "status",
            Predicate::Level(_) => "level",
        }
    }

    pub fn test<R: Record>(&self, record: &R) -> bool {
        match self {
            Predicate::Search(term) => {
                let needle = term.to_lowercase();
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            Predicate::Category(value) => facet_matches(record.category(), value),
            Predicate::Status(value) => facet_matches(record.status(), value),
            Predicate::Level(value) => facet_matches(record.level(), value),
        }
    }
}

/// A record without the facet never passes an active filter on it.
fn facet_matches(facet: Option<Facet<'_>>, value: &str) -> bool {
    facet.map_or(false, |f| f.matches(value))
}
