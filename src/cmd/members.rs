//! Membership commands: `bugpilot members`. Only the project creator may
//! add or remove members.

use anyhow::{Result, bail};
use bugpilot::common::{AuthUser, Project};
use bugpilot::ui::{self, icons::CHECK};

use super::AppContext;
use super::super::MembersCommands;

fn require_admin(project: &Project, user: &AuthUser) -> Result<()> {
    if !project.is_admin(&user.id) {
        bail!("Only the admin of '{}' can manage its members.", project.name);
    }
    Ok(())
}

pub async fn cmd_members(ctx: &AppContext, command: MembersCommands) -> Result<()> {
    let user = ctx.require_user()?;

    match command {
        MembersCommands::Search { project, email } => {
            let project = ctx.client.get_project(&project).await?;
            let users = ctx.client.search_users(&email, &project).await?;
            print!("{}", ui::render_users(&users));
        }
        MembersCommands::Add { project, users } => {
            let project = ctx.client.get_project(&project).await?;
            require_admin(&project, &user)?;
            ctx.client.add_members(&project.id, &users).await?;
            println!("{}Added {} member(s) to {}", CHECK, users.len(), project.name);
        }
        MembersCommands::Remove {
            project,
            user: member,
        } => {
            let project = ctx.client.get_project(&project).await?;
            require_admin(&project, &user)?;
            ctx.client.remove_member(&project.id, &member).await?;
            println!("{}Removed member #{} from {}", CHECK, member, project.name);
        }
    }
    Ok(())
}
