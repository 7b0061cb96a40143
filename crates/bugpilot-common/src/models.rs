use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lane a work item sits in. Ordered: `ToDo < InProgress < Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    /// All lanes in board order.
    pub const ALL: [Status; 3] = [Status::ToDo, Status::InProgress, Status::Done];

    /// Wire and display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    /// Accepts the wire labels plus the usual CLI spellings
    /// (`todo`, `to-do`, `in_progress`, `in-progress`, `done`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::ToDo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(format!(
                "Invalid status '{}'. Valid values: todo, in-progress, done",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid values: low, medium, high",
                s
            )),
        }
    }
}

/// A user as embedded in tickets and comments (id + display name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Full user record returned by user search and populated memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// The signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: UserDetails,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
}

impl Project {
    /// Only the creator manages membership.
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.created_by.as_ref().is_some_and(|c| c.id == user_id)
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user.id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: UserRef,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A ticket: the movable unit on the board.
///
/// Only `id` and `status` matter to the move protocol. `updated_at` is
/// refreshed locally on an optimistic move purely as a display hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub assignees: Vec<UserRef>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl WorkItem {
    /// Copy of this item in `status`, stamped with `now` as its update time.
    pub fn with_status(&self, status: Status, now: DateTime<Utc>) -> Self {
        Self {
            status,
            updated_at: Some(now),
            ..self.clone()
        }
    }
}

/// "Move item X from lane A to lane B". Produced by a completed drag,
/// consumed once by the board store. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent {
    pub item_id: String,
    pub from: Status,
    pub to: Status,
}

impl MoveIntent {
    /// Returns `None` for a same-lane drop, which is never an intent.
    pub fn new(item_id: impl Into<String>, from: Status, to: Status) -> Option<Self> {
        (from != to).then(|| Self {
            item_id: item_id.into(),
            from,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_wire_labels() {
        assert_eq!(serde_json::to_string(&Status::ToDo).unwrap(), "\"To Do\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(serde_json::to_string(&Status::Done).unwrap(), "\"Done\"");
    }

    #[test]
    fn status_from_str_accepts_cli_spellings() {
        assert_eq!("todo".parse::<Status>().unwrap(), Status::ToDo);
        assert_eq!("To Do".parse::<Status>().unwrap(), Status::ToDo);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("IN_PROGRESS".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("done".parse::<Status>().unwrap(), Status::Done);
        assert!("blocked".parse::<Status>().is_err());
    }

    #[test]
    fn status_order_matches_board_order() {
        let mut shuffled = vec![Status::Done, Status::ToDo, Status::InProgress];
        shuffled.sort();
        assert_eq!(shuffled, Status::ALL.to_vec());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn work_item_parses_api_payload() {
        let json = r#"{
            "_id": "t1",
            "title": "Login page crashes",
            "description": "Stack trace attached",
            "status": "In Progress",
            "priority": "High",
            "project": "p1",
            "assignees": [{"_id": "u2", "name": "Sam"}],
            "createdBy": {"_id": "u1", "name": "Alex"},
            "createdAt": "2024-03-05T10:00:00.000Z",
            "updatedAt": "2024-03-06T10:00:00.000Z",
            "__v": 0
        }"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "t1");
        assert_eq!(item.status, Status::InProgress);
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.assignees[0].name, "Sam");
        assert_eq!(item.created_by.unwrap().id, "u1");
        assert!(item.created_at.is_some());
        assert!(item.comments.is_empty());
    }

    #[test]
    fn work_item_tolerates_sparse_payload() {
        let json = r#"{"_id": "t9", "title": "Bare", "status": "Done"}"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.priority, Priority::Medium);
        assert!(item.created_by.is_none());
        assert!(item.updated_at.is_none());
    }

    #[test]
    fn with_status_refreshes_updated_at_only() {
        let json = r#"{"_id": "t1", "title": "A", "status": "To Do", "priority": "Low"}"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        let now = Utc::now();
        let moved = item.with_status(Status::Done, now);
        assert_eq!(moved.status, Status::Done);
        assert_eq!(moved.updated_at, Some(now));
        assert_eq!(moved.title, item.title);
        assert_eq!(moved.priority, item.priority);
    }

    #[test]
    fn move_intent_rejects_same_lane() {
        assert!(MoveIntent::new("t1", Status::Done, Status::Done).is_none());
        let intent = MoveIntent::new("t1", Status::ToDo, Status::Done).unwrap();
        assert_eq!(intent.item_id, "t1");
        assert_eq!(intent.to, Status::Done);
    }

    #[test]
    fn auth_user_accepts_either_id_key() {
        let a: AuthUser = serde_json::from_str(r#"{"id": "u1", "name": "Alex"}"#).unwrap();
        let b: AuthUser = serde_json::from_str(r#"{"_id": "u1", "name": "Alex"}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn project_admin_is_creator() {
        let json = r#"{
            "_id": "p1",
            "name": "Website",
            "members": [{"_id": "m1", "user": {"_id": "u2", "name": "Sam", "email": "sam@example.com"}, "role": "developer"}],
            "createdBy": {"_id": "u1", "name": "Alex"}
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.is_admin("u1"));
        assert!(!project.is_admin("u2"));
        assert!(project.has_member("u2"));
        assert!(!project.has_member("u3"));
    }
}
