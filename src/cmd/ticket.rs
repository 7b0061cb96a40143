//! Single-ticket commands: `bugpilot ticket`.

use anyhow::{Result, bail};
use bugpilot::api::{NewTicket, TicketUpdate};
use bugpilot::ui::{self, icons::CHECK};
use console::style;

use super::AppContext;
use super::super::TicketCommands;

pub async fn cmd_ticket(ctx: &AppContext, command: TicketCommands) -> Result<()> {
    ctx.require_user()?;

    match command {
        TicketCommands::Show { ticket } => {
            let ticket = ctx.client.get_ticket(&ticket).await?;
            print!("{}", ui::render_ticket(&ticket, ui::terminal_width()));
        }
        TicketCommands::Create {
            project,
            title,
            description,
            priority,
        } => {
            let ticket = ctx
                .client
                .create_ticket(&NewTicket {
                    title: &title,
                    description: &description,
                    priority,
                    project: &project,
                })
                .await?;
            println!(
                "{}Created ticket {} {}",
                CHECK,
                style(&ticket.title).bold(),
                style(format!("#{}", ticket.id)).dim()
            );
        }
        TicketCommands::Edit {
            ticket,
            title,
            description,
            priority,
            status,
            assignees,
            unassign,
        } => {
            let assignees = if unassign {
                Some(Vec::new())
            } else if assignees.is_empty() {
                None
            } else {
                Some(assignees)
            };
            let update = TicketUpdate {
                title,
                description,
                priority,
                assignees,
                status,
            };
            ctx.client.update_ticket(&ticket, &update).await?;
            println!("{}Updated ticket #{}", CHECK, ticket);
        }
        TicketCommands::Delete { ticket, yes } => {
            if !yes {
                bail!("Deleting a ticket cannot be undone. Re-run with --yes to confirm.");
            }
            ctx.client.delete_ticket(&ticket).await?;
            println!("{}Deleted ticket #{}", CHECK, ticket);
        }
        TicketCommands::Comment { ticket, text } => {
            let comment = ctx.client.add_comment(&ticket, &text).await?;
            println!("{}Comment added {}", CHECK, style(format!("#{}", comment.id)).dim());
        }
        TicketCommands::Upload { ticket, file } => {
            let url = ctx.client.upload_screenshot(&ticket, &file).await?;
            println!("{}Screenshot uploaded: {}", CHECK, url);
        }
    }
    Ok(())
}
