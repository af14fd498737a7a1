/// Middleware modules for the API server
///
/// Bearer authentication lives in `taskboard_shared::auth::middleware`; this
/// module holds the server-only layers.

pub mod security;
