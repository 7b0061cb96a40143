//! Tickets, comments and screenshot attachments.

use std::path::Path;

use bugpilot_common::{Comment, DashboardStats, Priority, Status, WorkItem};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::{ApiClient, decode};
use crate::errors::ApiError;

#[derive(Debug, Serialize)]
pub struct NewTicket<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub priority: Priority,
    pub project: &'a str,
}

/// Partial ticket update; unset fields are left untouched server-side.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl TicketUpdate {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.assignees.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    image_url: String,
}

impl ApiClient {
    /// Full fetch of a project's tickets. Order carries no meaning.
    pub async fn list_project_tickets(&self, project_id: &str) -> Result<Vec<WorkItem>, ApiError> {
        let path = format!("/tickets/project/{}", project_id);
        let resp = self.send_authed(self.authed(Method::GET, &path)?).await?;
        decode(resp, "tickets").await
    }

    /// Tickets assigned to the signed-in user across projects.
    pub async fn my_tickets(&self) -> Result<Vec<WorkItem>, ApiError> {
        let resp = self
            .send_authed(self.authed(Method::GET, "/tickets/my-tickets")?)
            .await?;
        decode(resp, "tickets").await
    }

    pub async fn get_ticket(&self, ticket_id: &str) -> Result<WorkItem, ApiError> {
        let path = format!("/tickets/{}", ticket_id);
        let resp = self.send_authed(self.authed(Method::GET, &path)?).await?;
        decode(resp, "ticket").await
    }

    pub async fn create_ticket(&self, ticket: &NewTicket<'_>) -> Result<WorkItem, ApiError> {
        if ticket.title.trim().is_empty() {
            return Err(ApiError::BadRequest("Ticket title cannot be empty.".to_string()));
        }
        let builder = self.authed(Method::POST, "/tickets/")?.json(ticket);
        let resp = self.send_authed(builder).await?;
        decode(resp, "ticket").await
    }

    /// The response body is ignored; only success matters.
    pub async fn update_ticket(&self, ticket_id: &str, update: &TicketUpdate) -> Result<(), ApiError> {
        if update.is_empty() {
            return Err(ApiError::BadRequest("Nothing to update.".to_string()));
        }
        let path = format!("/tickets/{}", ticket_id);
        let builder = self.authed(Method::PUT, &path)?.json(update);
        self.send_authed(builder).await?;
        Ok(())
    }

    pub async fn update_ticket_status(&self, ticket_id: &str, status: Status) -> Result<(), ApiError> {
        self.update_ticket(ticket_id, &TicketUpdate::status(status)).await
    }

    pub async fn delete_ticket(&self, ticket_id: &str) -> Result<(), ApiError> {
        let path = format!("/tickets/{}", ticket_id);
        self.send_authed(self.authed(Method::DELETE, &path)?).await?;
        Ok(())
    }

    pub async fn add_comment(&self, ticket_id: &str, text: &str) -> Result<Comment, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::BadRequest("Comment cannot be empty.".to_string()));
        }
        let path = format!("/tickets/{}/comments", ticket_id);
        let builder = self
            .authed(Method::POST, &path)?
            .json(&serde_json::json!({ "text": text }));
        let resp = self.send_authed(builder).await?;
        decode(resp, "comment").await
    }

    /// Upload an image as multipart field `screenshot`; returns its URL.
    pub async fn upload_screenshot(&self, ticket_id: &str, file: &Path) -> Result<String, ApiError> {
        let bytes = tokio::fs::read(file).await.map_err(|source| ApiError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "screenshot".to_string());
        let mime = mime_guess::from_path(file).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())?;
        let form = Form::new().part("screenshot", part);

        let path = format!("/tickets/{}/upload-screenshot", ticket_id);
        let builder = self.authed(Method::POST, &path)?.multipart(form);
        let resp = self.send_authed(builder).await?;
        let upload: UploadResponse = decode(resp, "upload response").await?;
        Ok(upload.image_url)
    }

    /// Project count plus the user's tickets per lane, fetched concurrently.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let (projects, mine) = tokio::try_join!(self.list_projects(), self.my_tickets())?;
        Ok(DashboardStats::new(projects.len(), &mine))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ticket_json(id: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "title": format!("Ticket {}", id),
            "status": status,
            "priority": "Medium",
            "project": "p1",
            "assignees": [],
            "createdBy": {"_id": "u1", "name": "Alex"},
            "createdAt": "2024-03-05T10:00:00.000Z",
            "updatedAt": "2024-03-05T10:00:00.000Z"
        })
    }

    #[tokio::test]
    async fn test_list_project_tickets() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tickets/project/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                ticket_json("t1", "To Do"),
                ticket_json("t2", "Done")
            ])))
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&mock_server.uri());
        let tickets = client.list_project_tickets("p1").await.unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[1].status, Status::Done);
    }

    #[tokio::test]
    async fn test_status_update_sends_only_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/tickets/t1"))
            .and(body_json(serde_json::json!({"status": "In Progress"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json("t1", "In Progress")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&mock_server.uri());
        client
            .update_ticket_status("t1", Status::InProgress)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected_locally() {
        let client = signed_in_client("http://127.0.0.1:9");
        assert!(matches!(
            client.update_ticket("t1", &TicketUpdate::default()).await.unwrap_err(),
            ApiError::BadRequest(_)
        ));
    }

    #[tokio::test]
    async fn test_create_ticket_validates_title() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/"))
            .and(body_json(serde_json::json!({
                "title": "Broken link",
                "description": "",
                "priority": "High",
                "project": "p1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(ticket_json("t9", "To Do")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&mock_server.uri());
        let created = client
            .create_ticket(&NewTicket {
                title: "Broken link",
                description: "",
                priority: Priority::High,
                project: "p1",
            })
            .await
            .unwrap();
        assert_eq!(created.id, "t9");

        let err = client
            .create_ticket(&NewTicket {
                title: "  ",
                description: "",
                priority: Priority::Low,
                project: "p1",
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: Ticket title cannot be empty.");
    }

    #[tokio::test]
    async fn test_add_comment_returns_comment() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/t1/comments"))
            .and(body_json(serde_json::json!({"text": "Reproduced on staging"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "_id": "c1",
                "user": {"_id": "u1", "name": "Alex"},
                "text": "Reproduced on staging",
                "createdAt": "2024-03-06T09:00:00.000Z"
            })))
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&mock_server.uri());
        let comment = client.add_comment("t1", "Reproduced on staging").await.unwrap();
        assert_eq!(comment.id, "c1");
        assert_eq!(comment.user.name, "Alex");
    }

    #[tokio::test]
    async fn test_upload_screenshot_multipart() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/t1/upload-screenshot"))
            .and(body_string_contains("name=\"screenshot\""))
            .and(body_string_contains("filename=\"crash.png\""))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"imageUrl": "https://cdn.example.com/crash.png"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("crash.png");
        std::fs::write(&file, b"not really a png").unwrap();

        let client = signed_in_client(&mock_server.uri());
        let url = client.upload_screenshot("t1", &file).await.unwrap();
        assert_eq!(url, "https://cdn.example.com/crash.png");
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let client = signed_in_client("http://127.0.0.1:9");
        let err = client
            .upload_screenshot("t1", Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"_id": "p1", "name": "A"},
                {"_id": "p2", "name": "B"}
            ])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tickets/my-tickets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                ticket_json("t1", "To Do"),
                ticket_json("t2", "In Progress"),
                ticket_json("t3", "Done"),
                ticket_json("t4", "Done")
            ])))
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&mock_server.uri());
        let stats = client.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.open_issues, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 2);
    }
}
