use bugpilot_common::{Status, WorkItem};
use console::{Alignment, measure_text_width, pad_str, style};

use super::{FALLBACK_WIDTH, assignee_names, format_date, icons, priority_label, status_label};
use crate::board::{BoardState, LaneFeedback, LoadState};

/// Below this width lanes are stacked instead of side by side.
pub const STACKED_BELOW: usize = 72;

const GAP: &str = " │ ";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: usize,
    pub show_descriptions: bool,
    /// Hover state from an active drag, if any.
    pub feedback: Option<[LaneFeedback; 3]>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: FALLBACK_WIDTH,
            show_descriptions: true,
            feedback: None,
        }
    }
}

impl RenderOptions {
    pub fn for_terminal(show_descriptions: bool) -> Self {
        Self {
            width: super::terminal_width(),
            show_descriptions,
            feedback: None,
        }
    }

    fn is_over(&self, status: Status) -> bool {
        self.feedback
            .is_some_and(|f| f.iter().any(|l| l.status == status && l.is_over))
    }
}

pub fn render_board(title: &str, state: &BoardState, opts: &RenderOptions) -> String {
    let mut lines = vec![format!("{}{}", icons::BUG, style(title).bold().cyan())];

    match &state.load {
        LoadState::Idle | LoadState::Loading => {
            lines.push(format!("{}Loading tickets...", icons::HOURGLASS));
            return finish(lines);
        }
        LoadState::Failed(message) => {
            lines.push(format!("{}{}", icons::CROSS, style(message).red().bold()));
            lines.push(style("Run the board command again to retry.").dim().to_string());
            return finish(lines);
        }
        LoadState::Ready => {}
    }

    if let Some(error) = &state.error {
        lines.push(format!("{}{}", icons::WARN, style(error).red().bold()));
    }
    lines.push(String::new());

    let lanes = state.lanes();
    if opts.width < STACKED_BELOW {
        let width = opts.width.max(20);
        for (status, items) in lanes.iter() {
            lines.extend(lane_block(status, items, width, opts));
            lines.push(String::new());
        }
    } else {
        let gaps = 2 * measure_text_width(GAP);
        let col_width = (opts.width.saturating_sub(gaps) / 3).max(10);
        let blocks: Vec<Vec<String>> = lanes
            .iter()
            .map(|(status, items)| lane_block(status, items, col_width, opts))
            .collect();
        let rows = blocks.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..rows {
            let cells: Vec<String> = blocks
                .iter()
                .map(|block| {
                    let cell = block.get(row).map(String::as_str).unwrap_or("");
                    pad_str(cell, col_width, Alignment::Left, Some("…")).into_owned()
                })
                .collect();
            lines.push(cells.join(GAP).trim_end().to_string());
        }
    }

    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn lane_block(status: Status, items: &[&WorkItem], width: usize, opts: &RenderOptions) -> Vec<String> {
    let mut header = format!("{} ({})", status_label(status), items.len());
    if opts.is_over(status) {
        header.push_str(&format!(" {}", style("« drop here").cyan()));
    }
    let mut lines = vec![header, style("─".repeat(width)).dim().to_string()];

    if items.is_empty() {
        lines.push(style("No tickets here.").dim().italic().to_string());
        return lines;
    }
    for item in items {
        lines.extend(card(item, width, opts.show_descriptions));
        lines.push(String::new());
    }
    lines
}

fn card(item: &WorkItem, width: usize, show_description: bool) -> Vec<String> {
    let mut lines: Vec<String> = textwrap::wrap(&item.title, width)
        .into_iter()
        .map(|l| style(l).bold().to_string())
        .collect();

    if show_description {
        if let Some(desc) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
            lines.extend(
                textwrap::wrap(desc, width)
                    .into_iter()
                    .map(|l| style(l).dim().to_string()),
            );
        }
    }

    lines.push(format!("{} {}", priority_label(item.priority), style(format!("#{}", item.id)).dim()));
    lines.push(format!("{}{}", icons::USER, assignee_names(&item.assignees)));
    let creator = item.created_by.as_ref().map(|u| u.name.as_str()).unwrap_or("Unknown");
    lines.push(
        style(format!("by {} on {}", creator, format_date(item.created_at)))
            .dim()
            .to_string(),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugpilot_common::{Priority, UserRef};
    use chrono::{TimeZone, Utc};

    fn item(id: &str, status: Status) -> WorkItem {
        WorkItem {
            id: id.to_string(),
            title: format!("Ticket {}", id),
            description: Some(format!("Details for {}", id)),
            status,
            priority: Priority::High,
            project: "p1".to_string(),
            assignees: vec![],
            created_by: Some(UserRef {
                id: "u1".into(),
                name: "Alex".into(),
            }),
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()),
            updated_at: None,
            screenshots: vec![],
            comments: vec![],
        }
    }

    fn ready(items: Vec<WorkItem>) -> BoardState {
        BoardState {
            items,
            load: LoadState::Ready,
            ..BoardState::default()
        }
    }

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).to_string()
    }

    #[test]
    fn test_lane_headers_and_counts() {
        let state = ready(vec![
            item("a", Status::ToDo),
            item("b", Status::ToDo),
            item("c", Status::Done),
        ]);
        let out = plain(&render_board("Website", &state, &RenderOptions::default()));
        assert!(out.contains("To Do (2)"));
        assert!(out.contains("In Progress (0)"));
        assert!(out.contains("Done (1)"));
        assert!(out.contains("No tickets here."));
        assert!(out.contains("Unassigned"));
        assert!(out.contains("by Alex on Mar 5, 2024"));
    }

    #[test]
    fn test_columns_fit_width() {
        let state = ready(vec![item("a", Status::ToDo), item("b", Status::InProgress)]);
        let opts = RenderOptions {
            width: 90,
            ..RenderOptions::default()
        };
        let out = render_board("Website", &state, &opts);
        for line in out.lines() {
            assert!(measure_text_width(line) <= 90, "too wide: {:?}", line);
        }
        // Side by side: all three headers share a row.
        let row = plain(&out)
            .lines()
            .find(|l| l.contains("To Do ("))
            .unwrap()
            .to_string();
        assert!(row.contains("In Progress (") && row.contains("Done ("));
    }

    #[test]
    fn test_narrow_terminal_stacks_lanes() {
        let state = ready(vec![item("a", Status::ToDo)]);
        let opts = RenderOptions {
            width: 40,
            ..RenderOptions::default()
        };
        let out = plain(&render_board("Website", &state, &opts));
        let todo = out.lines().position(|l| l.contains("To Do (")).unwrap();
        let done = out.lines().position(|l| l.contains("Done (")).unwrap();
        assert!(done > todo);
        assert!(!out.lines().any(|l| l.contains("To Do (") && l.contains("Done (")));
    }

    #[test]
    fn test_error_banner() {
        let mut state = ready(vec![item("a", Status::ToDo)]);
        state.error = Some("Failed to update ticket status. Please try again.".into());
        let out = plain(&render_board("Website", &state, &RenderOptions::default()));
        assert!(out.contains("Failed to update ticket status. Please try again."));
    }

    #[test]
    fn test_loading_and_failed_pages() {
        let loading = BoardState {
            load: LoadState::Loading,
            ..BoardState::default()
        };
        let out = plain(&render_board("Website", &loading, &RenderOptions::default()));
        assert!(out.contains("Loading tickets..."));
        assert!(!out.contains("To Do ("));

        let failed = BoardState {
            load: LoadState::Failed("Failed to load tickets. Please try again.".into()),
            ..BoardState::default()
        };
        let out = plain(&render_board("Website", &failed, &RenderOptions::default()));
        assert!(out.contains("Failed to load tickets. Please try again."));
        assert!(!out.contains("No tickets here."));
    }

    #[test]
    fn test_descriptions_can_be_hidden() {
        let state = ready(vec![item("a", Status::ToDo)]);
        let shown = plain(&render_board("W", &state, &RenderOptions::default()));
        assert!(shown.contains("Details for a"));

        let opts = RenderOptions {
            show_descriptions: false,
            ..RenderOptions::default()
        };
        let hidden = plain(&render_board("W", &state, &opts));
        assert!(!hidden.contains("Details for a"));
    }

    #[test]
    fn test_hover_marker() {
        let state = ready(vec![item("a", Status::ToDo)]);
        let feedback = Status::ALL.map(|status| LaneFeedback {
            status,
            is_over: status == Status::Done,
            can_drop: true,
        });
        let opts = RenderOptions {
            feedback: Some(feedback),
            ..RenderOptions::default()
        };
        let out = plain(&render_board("W", &state, &opts));
        assert_eq!(out.matches("« drop here").count(), 1);
    }
}
