//! Terminal rendering. Everything here turns already-decided state into
//! strings; no function in this module changes state or talks to the API.

pub mod board;
pub mod dashboard;
pub mod icons;
pub mod ticket;

pub use board::{RenderOptions, render_board};
pub use dashboard::{render_dashboard, render_members, render_projects, render_users};
pub use ticket::render_ticket;

use bugpilot_common::{Priority, Status, UserRef};
use chrono::{DateTime, Utc};
use console::{StyledObject, style};

/// Used when stdout is not a terminal.
pub const FALLBACK_WIDTH: usize = 100;

pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

/// `Mar 5, 2024`, or `N/A` when unknown.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}

pub fn priority_label(priority: Priority) -> StyledObject<&'static str> {
    let label = style(priority.as_str()).bold();
    match priority {
        Priority::High => label.red(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.green(),
    }
}

pub fn status_label(status: Status) -> StyledObject<String> {
    let label = match status {
        Status::ToDo => format!("{}{}", icons::TODO, status),
        Status::InProgress => format!("{}{}", icons::IN_PROGRESS, status),
        Status::Done => format!("{}{}", icons::DONE, status),
    };
    let label = style(label).bold();
    match status {
        Status::ToDo => label.blue(),
        Status::InProgress => label.yellow(),
        Status::Done => label.green(),
    }
}

pub fn assignee_names(assignees: &[UserRef]) -> String {
    if assignees.is_empty() {
        return "Unassigned".to_string();
    }
    assignees
        .iter()
        .map(|u| u.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
