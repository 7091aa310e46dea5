//! # BoardKit Core
//!
//! Core types and utilities for BoardKit.
//! Provides measurement parsing/formatting, shared drafting constants,
//! and the error types used by the drafting engine.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{DesignError, Result};
pub use units::{format_inches, parse_measurement};
