//! EstatePulse Core - Shared types and pure portfolio logic.
//!
//! This crate provides the data model and the side-effect free operations
//! used by every EstatePulse component:
//! - `server` - State container, persistence port and JSON views
//! - `cli` - Command-line front end (`ep-cli`)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. Timestamps are passed in by callers so everything
//! here is deterministic under test.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, rates, and status/role enums
//! - [`models`] - Projects, instruments (units), interactions (enquiries), users
//! - [`search`] - Case-insensitive substring search across the portfolio
//! - [`report`] - Flat CSV report export
//! - [`stats`] - Per-project aggregate statistics
//! - [`insight`] - AI insight prompt and request status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod insight;
pub mod models;
pub mod report;
pub mod search;
pub mod stats;
pub mod types;

pub use models::*;
pub use types::*;
