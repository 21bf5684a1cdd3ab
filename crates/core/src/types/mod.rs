//! Core types for EstatePulse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod rate;
pub mod status;

pub use id::*;
pub use rate::{Rate, RateError};
pub use status::*;
