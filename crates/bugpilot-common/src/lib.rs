//! Shared domain types for the BugPilot client.
//!
//! Everything here is plain data: the records the REST API exchanges
//! (`WorkItem`, `Project`, `Comment`, ...), the fixed lane ordering, and the
//! ephemeral `MoveIntent` produced by a finished drag gesture. No I/O lives
//! in this crate.

pub mod lanes;
pub mod models;

pub use lanes::{DashboardStats, Lanes};
pub use models::*;
