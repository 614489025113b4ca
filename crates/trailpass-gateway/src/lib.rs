//! # TrailPass Gateway
//!
//! The HTTP surface of the service: request decoding, validation, and the
//! JSON API over the event store and scheduler. Handlers compose the
//! validator pipeline and the store; they own no state of their own.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, build_router, start};
