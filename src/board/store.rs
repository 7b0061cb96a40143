use std::sync::Arc;

use bugpilot_common::{Lanes, MoveIntent, Status, WorkItem};
use chrono::Utc;
use tokio::sync::{mpsc, watch};

use super::remote::BoardRemote;
use crate::errors::{ApiError, BoardError};

pub const MOVE_FAILED_MESSAGE: &str = "Failed to update ticket status. Please try again.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load tickets. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Full fetch failed; the page shows a retry prompt.
    Failed(String),
}

/// Everything a renderer needs. Lanes are recomputed from `items` on demand.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub items: Vec<WorkItem>,
    pub error: Option<String>,
    pub load: LoadState,
    /// Bumped on every change to `items`.
    pub revision: u64,
}

impl BoardState {
    pub fn lanes(&self) -> Lanes<'_> {
        Lanes::from_items(&self.items)
    }

    pub fn item(&self, item_id: &str) -> Option<&WorkItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn status_of(&self, item_id: &str) -> Option<Status> {
        self.item(item_id).map(|i| i.status)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// How a `move_item` call settled.
#[derive(Debug)]
pub enum MoveOutcome {
    /// Target equals the current status: no request, no change.
    Unchanged,
    /// The item is not on the board: no request, no change.
    UnknownItem,
    /// Server accepted; the optimistic state stands.
    Confirmed,
    /// Server rejected; the item is back in its original lane.
    Reverted { error: ApiError },
    /// Server rejected and the item was gone at revert time; the board was refetched.
    Resynced { error: ApiError },
}

impl MoveOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Reverted { .. } | Self::Resynced { .. })
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Reverted { error } | Self::Resynced { error } => Some(error),
            _ => None,
        }
    }
}

/// Holds a project's work items and is the only path that changes their status.
///
/// State lives in a `watch` channel: each write is a synchronous,
/// run-to-completion closure, and subscribers are notified after it. No
/// lock is held across the remote call. Overlapping moves of the same item
/// are not serialized; whichever settles last wins.
pub struct BoardStore {
    project_id: String,
    remote: Arc<dyn BoardRemote>,
    state: watch::Sender<BoardState>,
}

impl BoardStore {
    /// An empty store. Call `refresh` to load it.
    pub fn new(project_id: impl Into<String>, remote: Arc<dyn BoardRemote>) -> Self {
        let (state, _) = watch::channel(BoardState::default());
        Self {
            project_id: project_id.into(),
            remote,
            state,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BoardState {
        self.state.borrow().clone()
    }

    pub fn status_of(&self, item_id: &str) -> Option<Status> {
        self.state.borrow().status_of(item_id)
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Replace the whole collection with the server's. Not a merge: items
    /// missing from the response disappear.
    pub async fn refresh(&self) -> Result<(), BoardError> {
        self.state.send_modify(|s| {
            s.load = LoadState::Loading;
            s.error = None;
        });

        match self.remote.fetch_items(&self.project_id).await {
            Ok(items) => {
                let count = items.len();
                self.state.send_modify(|s| {
                    s.items = items;
                    s.load = LoadState::Ready;
                    s.touch();
                });
                tracing::debug!(project_id = %self.project_id, count, "Board loaded");
                Ok(())
            }
            Err(source) => {
                tracing::error!(project_id = %self.project_id, error = %source, "Ticket fetch failed");
                self.state.send_modify(|s| {
                    s.items.clear();
                    s.load = LoadState::Failed(LOAD_FAILED_MESSAGE.to_string());
                    s.error = Some(LOAD_FAILED_MESSAGE.to_string());
                    s.touch();
                });
                Err(BoardError::FetchFailed {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                    source,
                })
            }
        }
    }

    /// Move an item to `new_status`: apply locally, confirm remotely, revert
    /// on failure. Resolves once the remote call has settled.
    ///
    /// Never fails. Failures are reported through the outcome and the
    /// store's error message.
    pub async fn move_item(&self, item_id: &str, new_status: Status) -> MoveOutcome {
        let Some(original) = self.apply_optimistic(item_id, new_status) else {
            tracing::warn!(item_id, "Move requested for a ticket that is not on the board");
            return MoveOutcome::UnknownItem;
        };
        if original == new_status {
            return MoveOutcome::Unchanged;
        }
        tracing::debug!(item_id, from = %original, to = %new_status, "Applied optimistic move");

        match self.remote.update_status(item_id, new_status).await {
            Ok(()) => {
                self.clear_error();
                tracing::debug!(item_id, status = %new_status, "Move confirmed");
                MoveOutcome::Confirmed
            }
            Err(error) => {
                tracing::error!(
                    item_id,
                    from = %original,
                    to = %new_status,
                    error = %error,
                    "Ticket status update failed"
                );
                if self.revert(item_id, original) {
                    tracing::debug!(item_id, status = %original, "Move reverted");
                    MoveOutcome::Reverted { error }
                } else {
                    tracing::warn!(item_id, "Ticket left the board before revert; refetching");
                    if self.refresh().await.is_ok() {
                        self.set_error(MOVE_FAILED_MESSAGE);
                    }
                    MoveOutcome::Resynced { error }
                }
            }
        }
    }

    /// Consume a drag intent. `from` is the drag-time snapshot and only
    /// mattered for deciding to emit; the move targets `to`.
    pub async fn apply_intent(&self, intent: MoveIntent) -> MoveOutcome {
        if self.status_of(&intent.item_id) != Some(intent.from) {
            tracing::debug!(item_id = %intent.item_id, "Ticket changed lanes during drag");
        }
        self.move_item(&intent.item_id, intent.to).await
    }

    /// Drain intents until every sender is dropped, one move at a time.
    pub async fn run_intents(
        &self,
        mut intents: mpsc::UnboundedReceiver<MoveIntent>,
        mut on_outcome: impl FnMut(&MoveIntent, &MoveOutcome),
    ) {
        while let Some(intent) = intents.recv().await {
            let outcome = self.apply_intent(intent.clone()).await;
            on_outcome(&intent, &outcome);
        }
    }

    /// Returns the status before the write, `None` if the item is absent.
    /// Writes nothing when the status already matches.
    fn apply_optimistic(&self, item_id: &str, new_status: Status) -> Option<Status> {
        let mut original = None;
        self.state.send_if_modified(|s| {
            let Some(item) = s.items.iter_mut().find(|i| i.id == item_id) else {
                return false;
            };
            original = Some(item.status);
            if item.status == new_status {
                return false;
            }
            *item = item.with_status(new_status, Utc::now());
            s.touch();
            true
        });
        original
    }

    /// Restore `original` and set the move error. False if the item is gone.
    fn revert(&self, item_id: &str, original: Status) -> bool {
        let mut found = false;
        self.state.send_modify(|s| {
            s.error = Some(MOVE_FAILED_MESSAGE.to_string());
            if let Some(item) = s.items.iter_mut().find(|i| i.id == item_id) {
                item.status = original;
                found = true;
                s.touch();
            }
        });
        found
    }

    fn set_error(&self, message: &str) {
        self.state.send_modify(|s| s.error = Some(message.to_string()));
    }
}
