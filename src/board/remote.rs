use async_trait::async_trait;
use bugpilot_common::{Status, WorkItem};

use crate::api::ApiClient;
use crate::errors::ApiError;

/// Remote source of truth for the board.
/// Real implementation: `ApiClient`. Test double: `FakeRemote` in the store tests.
#[async_trait]
pub trait BoardRemote: Send + Sync {
    /// Confirm a status change. Any error means the move was rejected.
    async fn update_status(&self, item_id: &str, status: Status) -> Result<(), ApiError>;

    /// Fetch the whole collection for a project.
    async fn fetch_items(&self, project_id: &str) -> Result<Vec<WorkItem>, ApiError>;
}

#[async_trait]
impl BoardRemote for ApiClient {
    async fn update_status(&self, item_id: &str, status: Status) -> Result<(), ApiError> {
        self.update_ticket_status(item_id, status).await
    }

    async fn fetch_items(&self, project_id: &str) -> Result<Vec<WorkItem>, ApiError> {
        self.list_project_tickets(project_id).await
    }
}
