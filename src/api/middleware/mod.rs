//! API middleware

mod buffering;
mod logging;

pub use buffering::buffer_request_body;
pub use logging::{HttpLoggingLayer, HttpLoggingService};
