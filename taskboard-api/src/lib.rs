//! # Taskboard API Server Library
//!
//! HTTP surface of Taskboard: account registration and login, plus
//! owner-scoped task CRUD over PostgreSQL.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Server-only tower layers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
