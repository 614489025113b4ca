//! # TrailPass Core
//!
//! Shared foundation for the TrailPass workspace: the TOML configuration
//! layer and the common error type. Everything else (store, scheduler,
//! gateway) builds on these.

pub mod config;
pub mod error;

pub use config::{ChainConfig, GatewayConfig, JobsConfig, TrailPassConfig};
pub use error::{Result, TrailPassError};
