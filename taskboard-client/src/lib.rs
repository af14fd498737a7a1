//! # Taskboard Client
//!
//! Client-side state and controllers for Taskboard: the session and its
//! persisted token, the task form, the task list with inline status changes
//! and deletes, and the per-status summary.
//!
//! ## Modules
//!
//! - `api`: `TaskApi` trait and its HTTP implementation
//! - `session`: Authenticated / unauthenticated session and the auth form
//! - `token_store`: Durable token storage
//! - `form`: Task creation form
//! - `list`: In-memory task list, entry rendering and delete confirmation
//! - `summary`: Per-status counts for the chart
//! - `dashboard`: Controller wiring everything to a `TaskApi`
//! - `config`: Environment configuration
//! - `error`: Client error type

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod list;
pub mod session;
pub mod summary;
pub mod token_store;
