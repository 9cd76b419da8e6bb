//! The record abstraction every managed collection implements.
//!
//! A [`Record`] knows its identity and the fields the filter predicates look
//! at. A [`Resource`] adds the form schema used to create and edit it and the
//! detail projection (canonical fields plus read-time derived fields).

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::common::{EntityKind, Facet};
use crate::services::render::{Render, RenderContext};

/// A stored domain record.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Collection this record belongs to.
    const KIND: EntityKind;

    fn id(&self) -> Uuid;

    /// Text fields searched by the free-text predicate.
    fn search_fields(&self) -> Vec<&str>;

    fn category(&self) -> Option<Facet<'_>> {
        None
    }

    fn status(&self) -> Option<Facet<'_>> {
        None
    }

    fn level(&self) -> Option<Facet<'_>> {
        None
    }

    /// User the record belongs to, for role-scoped visibility.
    fn owner_id(&self) -> Option<Uuid> {
        None
    }

    /// Retires the record in place.
    ///
    /// Returns `true` when the record must be kept (with its new state)
    /// rather than removed from the store.
    fn retire(&mut self, _now: DateTime<Utc>) -> bool {
        false
    }
}

/// A record managed through the generic list/form endpoints.
pub trait Resource: Record + Render {
    /// Create/edit form schema.
    type Form: Validate + Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Detail projection with derived fields.
    type Detail: Serialize + Send + 'static;

    fn create(form: Self::Form, id: Uuid, now: DateTime<Utc>) -> Self;

    fn apply(&mut self, form: Self::Form, now: DateTime<Utc>);

    /// Form pre-filled from the current record, for edit dialogs.
    fn to_form(&self) -> Self::Form;

    fn detail(&self, ctx: &RenderContext) -> Self::Detail;
}
