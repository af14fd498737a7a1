//! # Taskboard Shared Library
//!
//! This crate contains shared types, utilities, and business logic used across
//! the Taskboard API server and client.
//!
//! ## Module Organization
//!
//! - `models`: Database models, wire types and write validation
//! - `auth`: Password hashing, tokens and the authenticated request context
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
