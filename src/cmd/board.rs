//! Kanban board commands: `bugpilot board`, `bugpilot move`.
//!
//! `move` goes through the same path an interactive board would: a
//! keyboard sensor drives the drag controller, the controller emits a
//! `MoveIntent` on a channel, and the store drains that channel.

use std::sync::Arc;

use anyhow::{Result, bail};
use bugpilot::board::{BoardStore, DragController, DropOutcome, KeyboardSensor, MoveOutcome};
use bugpilot::common::{MoveIntent, Status};
use bugpilot::errors::BoardError;
use bugpilot::ui::icons::{CHECK, CROSS, REVERT, WARN};
use bugpilot::ui::{RenderOptions, render_board};
use tokio::sync::mpsc;

use super::AppContext;

/// Fetch the project and its tickets. On a failed fetch the failure page
/// is printed before the error is returned.
async fn open_board(ctx: &AppContext, project_id: &str) -> Result<(String, BoardStore)> {
    ctx.require_user()?;
    let project = ctx.client.get_project(project_id).await?;
    let store = BoardStore::new(project_id, Arc::new(ctx.client.clone()));
    if let Err(err) = store.refresh().await {
        print!("{}", render_board(&project.name, &store.snapshot(), &render_options(ctx)));
        return Err(err.into());
    }
    Ok((project.name, store))
}

fn render_options(ctx: &AppContext) -> RenderOptions {
    RenderOptions::for_terminal(ctx.config.show_descriptions)
}

pub async fn cmd_board(ctx: &AppContext, project_id: &str, no_descriptions: bool) -> Result<()> {
    let (name, store) = open_board(ctx, project_id).await?;
    let mut opts = render_options(ctx);
    opts.show_descriptions &= !no_descriptions;
    print!("{}", render_board(&name, &store.snapshot(), &opts));
    Ok(())
}

pub async fn cmd_move(ctx: &AppContext, project_id: &str, ticket_id: &str, target: Status) -> Result<()> {
    let (name, store) = open_board(ctx, project_id).await?;
    let current = store
        .status_of(ticket_id)
        .ok_or_else(|| BoardError::ItemNotFound {
            id: ticket_id.to_string(),
        })?;

    let (tx, rx) = mpsc::unbounded_channel();
    let mut controller = DragController::new(tx);
    let mut keys = KeyboardSensor::new();
    keys.grab(&mut controller, ticket_id, current);
    keys.focus_lane(&mut controller, target);

    if ctx.config.verbose {
        let mut preview = render_options(ctx);
        preview.feedback = Some(controller.lane_feedback());
        print!("{}", render_board(&name, &store.snapshot(), &preview));
    }

    match keys.release(&mut controller) {
        DropOutcome::Moved(intent) => {
            tracing::debug!(item_id = %intent.item_id, from = %intent.from, to = %intent.to, "Drop emitted move");
        }
        DropOutcome::NoOp => println!("Ticket is already in {}.", current),
        DropOutcome::Cancelled => println!("Move cancelled."),
    }
    // Closes the channel so the store stops after the last intent.
    drop(controller);

    let mut failed = None;
    store
        .run_intents(rx, |intent, outcome| {
            report(intent, outcome);
            if let Some(error) = outcome.error() {
                failed = Some(error.to_string());
            }
        })
        .await;

    println!();
    print!("{}", render_board(&name, &store.snapshot(), &render_options(ctx)));

    if let Some(error) = failed {
        bail!("Move of {} failed: {}", ticket_id, error);
    }
    Ok(())
}

fn report(intent: &MoveIntent, outcome: &MoveOutcome) {
    match outcome {
        MoveOutcome::Confirmed => {
            println!("{}Moved {}: {} → {}", CHECK, intent.item_id, intent.from, intent.to)
        }
        MoveOutcome::Reverted { .. } => eprintln!(
            "{}Move rejected by the server. {} is back in {}.",
            REVERT, intent.item_id, intent.from
        ),
        MoveOutcome::Resynced { .. } => eprintln!(
            "{}Move rejected and the ticket has changed elsewhere. Board reloaded.",
            WARN
        ),
        MoveOutcome::UnknownItem => {
            eprintln!("{}Ticket {} is no longer on the board.", CROSS, intent.item_id)
        }
        MoveOutcome::Unchanged => println!("Ticket is already in {}.", intent.to),
    }
}
