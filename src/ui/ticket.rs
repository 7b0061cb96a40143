use bugpilot_common::WorkItem;
use console::style;

use super::{assignee_names, format_date, icons, priority_label, status_label};

/// Full ticket view: fields, description, screenshots and comments.
pub fn render_ticket(ticket: &WorkItem, width: usize) -> String {
    let width = width.max(20);
    let mut lines = vec![
        format!("{}{}", icons::BUG, style(&ticket.title).bold()),
        style(format!("#{}", ticket.id)).dim().to_string(),
        String::new(),
        format!("{:<10}{}", "Status", status_label(ticket.status)),
        format!("{:<10}{}", "Priority", priority_label(ticket.priority)),
        format!("{:<10}{}", "Assignees", assignee_names(&ticket.assignees)),
        format!(
            "{:<10}{}",
            "Creator",
            ticket
                .created_by
                .as_ref()
                .map(|u| u.name.as_str())
                .unwrap_or("Unknown")
        ),
        format!("{:<10}{}", "Created", format_date(ticket.created_at)),
        format!("{:<10}{}", "Updated", format_date(ticket.updated_at)),
        String::new(),
    ];

    match ticket.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(desc) => lines.extend(textwrap::wrap(desc, width).into_iter().map(|l| l.into_owned())),
        None => lines.push(style("No description.").dim().italic().to_string()),
    }

    if !ticket.screenshots.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}{}", icons::IMAGE, style("Screenshots").bold()));
        for url in &ticket.screenshots {
            lines.push(format!("  {}", style(url).underlined()));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}{} ({})",
        icons::COMMENT,
        style("Comments").bold(),
        ticket.comments.len()
    ));
    if ticket.comments.is_empty() {
        lines.push(style("  No comments yet.").dim().italic().to_string());
    }
    for comment in &ticket.comments {
        lines.push(format!(
            "  {} {}",
            style(&comment.user.name).bold(),
            style(format_date(comment.created_at)).dim()
        ));
        let options = textwrap::Options::new(width).initial_indent("    ").subsequent_indent("    ");
        lines.extend(textwrap::wrap(&comment.text, options).into_iter().map(|l| l.into_owned()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
