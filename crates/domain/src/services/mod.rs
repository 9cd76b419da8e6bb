//! Domain services.
//!
//! The list pipeline (filter, paginate, render), the form dialog and the
//! aggregations behind the summary endpoints.

pub mod filter;
pub mod form;
pub mod grading;
pub mod listing;
pub mod render;
pub mod statistics;

pub use filter::{FilterSet, Predicate};
pub use form::{validate_form, DialogMode, FieldErrors, FormDialog, SubmitError};
pub use grading::GradeLetter;
pub use listing::{list_records, ListQuery, ListView, Listing};
pub use render::{render_table, RenderContext, RenderedTable, TableRow};
