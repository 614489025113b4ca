//! # TrailPass Validate
//!
//! Ordered, short-circuiting field validation for decoded JSON request
//! bodies. Each endpoint declares its rules as an ordered list; evaluation
//! stops at the first failure and reports that rule's message.
//!
//! ```text
//! &[Rule] + &serde_json::Value
//!   ↓ evaluate in declaration order
//! first failing rule → Err(its message)
//! all rules pass     → Ok(())
//! ```
//!
//! Rules are immutable after construction and hold no shared mutable state,
//! so a rule set can be evaluated from any number of in-flight requests.

pub mod pipeline;
pub mod rules;

pub use pipeline::validate;
pub use rules::{Check, Rule};
