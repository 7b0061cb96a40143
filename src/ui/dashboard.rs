//! Dashboard, project list and member views.

use bugpilot_common::{AuthUser, DashboardStats, Project, UserDetails};
use console::style;

use super::icons;

pub fn render_dashboard(user: &AuthUser, stats: &DashboardStats) -> String {
    let rows = [
        ("Total Projects", stats.total_projects),
        ("Open Issues", stats.open_issues),
        ("In Progress", stats.in_progress),
        ("Completed", stats.completed),
    ];
    let mut out = format!("Welcome back, {}!\n\n", style(&user.name).bold().cyan());
    for (label, count) in rows {
        out.push_str(&format!("  {:<16}{}\n", label, style(count).bold()));
    }
    out
}

/// One line per project. Projects the user created are marked as admin.
pub fn render_projects(projects: &[Project], user_id: Option<&str>) -> String {
    if projects.is_empty() {
        return format!("{}\n", style("No projects yet.").dim().italic());
    }
    let mut out = String::new();
    for project in projects {
        let admin = user_id.is_some_and(|id| project.is_admin(id));
        out.push_str(&format!(
            "{} {}{}\n",
            style(&project.name).bold(),
            style(format!("#{}", project.id)).dim(),
            if admin { style(" (admin)").yellow().to_string() } else { String::new() }
        ));
        if let Some(desc) = project.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("  {}\n", style(desc).dim()));
        }
    }
    out
}

pub fn render_members(project: &Project) -> String {
    let mut out = format!(
        "{} {}\n",
        style(&project.name).bold(),
        style(format!("({} members)", project.members.len())).dim()
    );
    if let Some(creator) = &project.created_by {
        out.push_str(&format!("  {}{} {}\n", icons::USER, creator.name, style("admin").yellow()));
    }
    for member in &project.members {
        out.push_str(&format!(
            "  {}{} <{}> {} {}\n",
            icons::USER,
            member.user.name,
            member.user.email,
            style(&member.role).dim(),
            style(format!("#{}", member.user.id)).dim()
        ));
    }
    out
}

pub fn render_users(users: &[UserDetails]) -> String {
    if users.is_empty() {
        return format!("{}\n", style("No users found.").dim().italic());
    }
    users
        .iter()
        .map(|u| format!("{} <{}> {}\n", u.name, u.email, style(format!("#{}", u.id)).dim()))
        .collect()
}
