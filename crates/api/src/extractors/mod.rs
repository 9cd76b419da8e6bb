//! Custom Axum extractors.

pub mod session;

pub use session::{SessionContext, SESSION_ROLE_HEADER, SESSION_USER_HEADER};
