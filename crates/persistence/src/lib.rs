//! Persistence layer for the education platform.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - The record store abstraction with in-memory and PostgreSQL backends
//! - Demo seed data

pub mod db;
pub mod metrics;
pub mod seed;
pub mod store;
