use anyhow::Result;
use bugpilot::common::{Priority, Status};
use bugpilot::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;

#[derive(Parser)]
#[command(name = "bugpilot")]
#[command(version, about = "Terminal client for the BugPilot issue tracker")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to bugpilot.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL. Overrides bugpilot.toml and BUGPILOT_BACKEND_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "BUGPILOT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account (two steps: send-otp, then verify)
    Register {
        #[command(subcommand)]
        command: RegisterCommands,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Project and ticket counts for the signed-in user
    Dashboard,
    /// List, create or show projects
    Projects {
        #[command(subcommand)]
        command: Option<ProjectsCommands>,
    },
    /// Show a project's kanban board
    Board {
        /// Project id
        project: String,
        /// Hide ticket descriptions
        #[arg(long)]
        no_descriptions: bool,
    },
    /// Move a ticket to another lane
    Move {
        /// Project id
        project: String,
        /// Ticket id
        ticket: String,
        /// Target lane: todo, in-progress, done
        status: Status,
    },
    /// Work with a single ticket
    Ticket {
        #[command(subcommand)]
        command: TicketCommands,
    },
    /// Manage project members
    Members {
        #[command(subcommand)]
        command: MembersCommands,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum RegisterCommands {
    /// Email a one-time registration code
    SendOtp {
        #[arg(short, long)]
        email: String,
    },
    /// Create the account with the emailed code and sign in
    Verify {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "BUGPILOT_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(short, long)]
        otp: String,
    },
}

#[derive(Subcommand, Clone)]
pub enum ProjectsCommands {
    /// List projects you belong to
    List,
    /// Create a project (you become its admin)
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show a project and its members
    Show { project: String },
}

#[derive(Subcommand, Clone)]
pub enum TicketCommands {
    /// Show a ticket with comments and screenshots
    Show { ticket: String },
    /// Create a ticket in a project
    Create {
        /// Project id
        project: String,
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
    },
    /// Edit ticket fields
    Edit {
        ticket: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        status: Option<Status>,
        /// Assign a user id (repeatable). Replaces current assignees
        #[arg(long = "assignee")]
        assignees: Vec<String>,
        /// Remove all assignees
        #[arg(long, conflicts_with = "assignees")]
        unassign: bool,
    },
    /// Delete a ticket
    Delete {
        ticket: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Add a comment
    Comment { ticket: String, text: String },
    /// Attach a screenshot image
    Upload { ticket: String, file: PathBuf },
}

#[derive(Subcommand, Clone)]
pub enum MembersCommands {
    /// Find users by email who are not yet members
    Search { project: String, email: String },
    /// Add users (by id) as developers
    Add {
        project: String,
        #[arg(required = true)]
        users: Vec<String>,
    },
    /// Remove a member (not yourself)
    Remove { project: String, user: String },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Write a default bugpilot.toml
    Init,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("BUGPILOT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "bugpilot=debug,info"
        } else {
            "bugpilot=info,warn"
        })
    });

    let format = std::env::var("BUGPILOT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.clone(), cli.base_url.as_deref(), cli.verbose)?;

    let ctx = cmd::AppContext::new(config)?;
    let result = match cli.command {
        Commands::Login { email, password } => cmd::cmd_login(&ctx, &email, &password).await,
        Commands::Register { command } => cmd::cmd_register(&ctx, command).await,
        Commands::Logout => cmd::cmd_logout(&ctx),
        Commands::Whoami => cmd::cmd_whoami(&ctx),
        Commands::Dashboard => cmd::cmd_dashboard(&ctx).await,
        Commands::Projects { command } => cmd::cmd_projects(&ctx, command).await,
        Commands::Board {
            project,
            no_descriptions,
        } => cmd::cmd_board(&ctx, &project, no_descriptions).await,
        Commands::Move {
            project,
            ticket,
            status,
        } => cmd::cmd_move(&ctx, &project, &ticket, status).await,
        Commands::Ticket { command } => cmd::cmd_ticket(&ctx, command).await,
        Commands::Members { command } => cmd::cmd_members(&ctx, command).await,
        Commands::Config { command } => cmd::cmd_config(&ctx.config, command),
    };

    // A 401 mid-command clears the session; persist that even on failure.
    let persisted = ctx.persist();
    result?;
    persisted
}
