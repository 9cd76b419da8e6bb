//! Domain layer for the education platform.
//!
//! This crate contains:
//! - Record models (users, courses, grades, schedules, certificates,
//!   career, payments, payroll, attendance)
//! - The generic record abstraction and the list/form services built on it
//! - The per-request session

pub mod models;
pub mod record;
pub mod services;
pub mod session;

pub use record::{Record, Resource};
pub use session::Session;
