//! Demo API hosting the interceptors
//!
//! Provides a small order API whose routes are tagged for HTTP logging.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod store;

pub use server::ApiServer;
