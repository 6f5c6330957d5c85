//! Error handling
//!
//! Defines error types and reporting for fxf.

pub mod handlers;
pub mod types;

pub use types::*;
