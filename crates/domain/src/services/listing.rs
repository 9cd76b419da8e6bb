//! The list pipeline: scope, filter, paginate, render.

use serde::{de, Deserialize, Deserializer, Serialize};
use shared::pagination::{Paginator, PaginationError, PaginationMeta};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::models::common::Locale;
use crate::record::Resource;
use crate::services::filter::{normalize, FilterSet};
use crate::services::render::{render_table, EmptyState, RenderContext, RenderedTable};
use crate::session::Session;

/// Query parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct ListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub level: Option<String>,

    /// 1-based; 0 is read as 1 and pages past the end show the last page.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u32>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: Option<u32>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub locale: Option<Locale>,
}

/// Reads a blank query value (`?page=`) as absent instead of failing to
/// parse it.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl ListQuery {
    pub fn filters(&self) -> FilterSet {
        FilterSet {
            search: normalize(self.search.as_deref()),
            category: normalize(self.category.as_deref()),
            status: normalize(self.status.as_deref()),
            level: normalize(self.level.as_deref()),
        }
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size_or(&self, default: u32) -> u32 {
        self.page_size.unwrap_or(default)
    }
}

/// A rendered page of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<D> {
    pub data: Vec<D>,
    pub table: RenderedTable,
    pub pagination: PaginationMeta,
    pub filters: FilterSet,
}

/// Runs the full list pipeline over a snapshot of a collection.
///
/// Records outside the session's scope are dropped before filtering, so
/// totals and page counts only ever reflect what the caller may see.
pub fn list_records<R: Resource>(
    records: Vec<R>,
    session: &Session,
    filters: &FilterSet,
    paginator: &mut Paginator,
    ctx: &RenderContext,
) -> Listing<R::Detail> {
    let visible = session.scope(records);
    let visible_total = visible.len();

    let page = paginator.paginate(filters.apply(visible));

    let empty = if visible_total == 0 {
        EmptyState::NoRecords
    } else {
        EmptyState::NoMatches
    };

    Listing {
        table: render_table(&page.data, ctx, empty),
        data: page.data.iter().map(|r| r.detail(ctx)).collect(),
        pagination: page.pagination,
        filters: filters.clone(),
    }
}

/// Stateful list screen: filter values plus a page cursor.
///
/// Every filter setter that changes a value sends the cursor back to the
/// first page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    filters: FilterSet,
    paginator: Paginator,
}

impl ListView {
    pub fn new(per_page: u32) -> Result<Self, PaginationError> {
        Ok(Self {
            filters: FilterSet::default(),
            paginator: Paginator::new(per_page)?,
        })
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.paginator.page()
    }

    pub fn go_to(&mut self, page: u32) {
        self.paginator.go_to(page);
    }

    pub fn next_page(&mut self) {
        self.paginator.next();
    }

    pub fn previous_page(&mut self) {
        self.paginator.previous();
    }

    pub fn set_search(&mut self, value: &str) {
        self.update(|f| f.search = normalize(Some(value)));
    }

    pub fn set_category(&mut self, value: &str) {
        self.update(|f| f.category = normalize(Some(value)));
    }

    pub fn set_status(&mut self, value: &str) {
        self.update(|f| f.status = normalize(Some(value)));
    }

    pub fn set_level(&mut self, value: &str) {
        self.update(|f| f.level = normalize(Some(value)));
    }

    pub fn clear_filters(&mut self) {
        self.update(|f| *f = FilterSet::default());
    }

    fn update(&mut self, change: impl FnOnce(&mut FilterSet)) {
        let before = self.filters.clone();
        change(&mut self.filters);
        if self.filters != before {
            self.paginator.reset();
        }
    }

    pub fn render<R: Resource>(
        &mut self,
        records: Vec<R>,
        session: &Session,
        ctx: &RenderContext,
    ) -> Listing<R::Detail> {
        list_records(records, session, &self.filters, &mut self.paginator, ctx)
    }
}
