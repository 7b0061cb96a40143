//! Projects and membership.

use bugpilot_common::{Project, UserDetails};
use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, decode};
use crate::errors::ApiError;

/// Role given to members added from the client.
pub const DEFAULT_MEMBER_ROLE: &str = "developer";

#[derive(Debug, Serialize)]
pub struct NewProject<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
struct NewMember<'a> {
    user: &'a str,
    role: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddMembersRequest<'a> {
    new_members: Vec<NewMember<'a>>,
}

impl ApiClient {
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let resp = self.send_authed(self.authed(Method::GET, "/projects")?).await?;
        decode(resp, "projects").await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project, ApiError> {
        let path = format!("/projects/{}", project_id);
        let resp = self.send_authed(self.authed(Method::GET, &path)?).await?;
        decode(resp, "project").await
    }

    pub async fn create_project(&self, project: &NewProject<'_>) -> Result<Project, ApiError> {
        if project.name.trim().is_empty() {
            return Err(ApiError::BadRequest("Project name cannot be empty.".to_string()));
        }
        let builder = self.authed(Method::POST, "/projects")?.json(project);
        let resp = self.send_authed(builder).await?;
        decode(resp, "project").await
    }

    /// Users matching `email` who are not yet members of `project`.
    /// A blank query returns no results without hitting the server.
    pub async fn search_users(
        &self,
        email: &str,
        project: &Project,
    ) -> Result<Vec<UserDetails>, ApiError> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(Vec::new());
        }
        let builder = self
            .authed(Method::GET, "/users/search")?
            .query(&[("email", email), ("projectId", project.id.as_str())]);
        let resp = self.send_authed(builder).await?;
        let users: Vec<UserDetails> = decode(resp, "user search results").await?;
        Ok(users
            .into_iter()
            .filter(|u| !project.has_member(&u.id))
            .collect())
    }

    /// Add users to a project as developers.
    pub async fn add_members(&self, project_id: &str, user_ids: &[String]) -> Result<(), ApiError> {
        if user_ids.is_empty() {
            return Err(ApiError::BadRequest("Please select users to add.".to_string()));
        }
        let body = AddMembersRequest {
            new_members: user_ids
                .iter()
                .map(|id| NewMember {
                    user: id,
                    role: DEFAULT_MEMBER_ROLE,
                })
                .collect(),
        };
        let path = format!("/projects/{}/members", project_id);
        let builder = self.authed(Method::POST, &path)?.json(&body);
        self.send_authed(builder).await?;
        Ok(())
    }

    /// Remove a member. Removing yourself is refused locally.
    pub async fn remove_member(&self, project_id: &str, user_id: &str) -> Result<(), ApiError> {
        if self.session.user().is_some_and(|u| u.id == user_id) {
            return Err(ApiError::BadRequest("You can't remove yourself.".to_string()));
        }
        let path = format!("/projects/{}/members/{}", project_id, user_id);
        self.send_authed(self.authed(Method::DELETE, &path)?).await?;
        Ok(())
    }
}
