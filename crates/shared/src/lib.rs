//! Shared utilities and common types for the education platform backend.
//!
//! This crate provides functionality used across all other crates:
//! - Page-based pagination
//! - Common validation logic for form schemas

pub mod pagination;
pub mod validation;
