//! Shared infrastructure for the messaging backend
//!
//! This crate provides the pieces every service-side component leans on:
//! PostgreSQL connection pooling with environment-driven configuration,
//! connectivity health checks, and typed database errors.

pub mod database;
pub mod error;
