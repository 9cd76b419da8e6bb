//! HTTP route handlers.

pub mod applications;
pub mod courses;
pub mod health;
pub mod records;
pub mod summaries;
