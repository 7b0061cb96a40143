//! Kanban board: optimistic ticket moves and drag interaction.
//!
//! ## Overview
//!
//! ```text
//! ┌──────────────┐ pick-up / hover / drop ┌────────────────┐  MoveIntent  ┌──────────────┐
//! │ sensor       │ ─────────────────────> │ DragController │ ───────────> │ BoardStore   │
//! │ (keyboard,   │                        │  (drag.rs)     │   channel    │ (store.rs)   │
//! │  pointer...) │                        └────────────────┘              │  move_item() │
//! └──────────────┘                                                        └──────┬───────┘
//!                                                                                │ BoardRemote
//!                                                                                v
//!                                                                          REST API (PUT /tickets/:id)
//! ```
//!
//! | Module   | Responsibility                                                   |
//! |----------|------------------------------------------------------------------|
//! | `store`  | `BoardStore`: the work item collection, `move_item`, `refresh`   |
//! | `drag`   | `DragController` state machine, `GestureHandler`, `KeyboardSensor` |
//! | `remote` | `BoardRemote` trait and its `ApiClient` implementation           |
//!
//! ## Move protocol
//!
//! 1. The optimistic status change is written synchronously and is visible
//!    to every subscriber before the network call starts.
//! 2. The status update is sent to the server.
//! 3. On success nothing else changes. On failure the item's pre-move status
//!    is restored and an error message is set; if the item has vanished from
//!    the collection in the meantime, the store refetches everything instead.

pub mod drag;
pub mod remote;
pub mod store;

pub use drag::{
    DragController, DragGesture, DragState, DropOutcome, GestureHandler, IntentSink,
    KeyboardSensor, LaneFeedback,
};
pub use remote::BoardRemote;
pub use store::{BoardState, BoardStore, LoadState, MoveOutcome};
