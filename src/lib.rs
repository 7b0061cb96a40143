//! BugPilot client: REST API access, the optimistic kanban board store and
//! its drag-interaction layer, and terminal rendering.

pub mod api;
pub mod board;
pub mod config;
pub mod errors;
pub mod session;
pub mod ui;

pub use bugpilot_common as common;
