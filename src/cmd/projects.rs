//! Project commands and the dashboard: `bugpilot projects`, `bugpilot dashboard`.

use anyhow::Result;
use bugpilot::api::NewProject;
use bugpilot::ui::{self, icons::CHECK};
use console::style;

use super::AppContext;
use super::super::ProjectsCommands;

pub async fn cmd_dashboard(ctx: &AppContext) -> Result<()> {
    let user = ctx.require_user()?;
    let stats = ctx.client.dashboard_stats().await?;
    print!("{}", ui::render_dashboard(&user, &stats));
    Ok(())
}

pub async fn cmd_projects(ctx: &AppContext, command: Option<ProjectsCommands>) -> Result<()> {
    let user = ctx.require_user()?;

    match command {
        None | Some(ProjectsCommands::List) => {
            let projects = ctx.client.list_projects().await?;
            print!("{}", ui::render_projects(&projects, Some(&user.id)));
        }
        Some(ProjectsCommands::Create { name, description }) => {
            let project = ctx
                .client
                .create_project(&NewProject {
                    name: &name,
                    description: &description,
                })
                .await?;
            println!(
                "{}Created project {} {}",
                CHECK,
                style(&project.name).bold(),
                style(format!("#{}", project.id)).dim()
            );
        }
        Some(ProjectsCommands::Show { project }) => {
            let project = ctx.client.get_project(&project).await?;
            if let Some(desc) = project.description.as_deref().filter(|d| !d.is_empty()) {
                println!("{}", desc);
                println!();
            }
            print!("{}", ui::render_members(&project));
            if project.is_admin(&user.id) {
                println!();
                println!("{}", style("You are the admin of this project.").yellow());
            }
        }
    }
    Ok(())
}
