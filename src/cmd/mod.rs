//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module     | Commands handled                                  |
//! |------------|---------------------------------------------------|
//! | `auth`     | `Login`, `Register`, `Logout`, `Whoami`           |
//! | `projects` | `Projects`, `Dashboard`                           |
//! | `board`    | `Board`, `Move`                                   |
//! | `ticket`   | `Ticket`                                          |
//! | `members`  | `Members`                                         |
//! | `config`   | `Config`                                          |

pub mod auth;
pub mod board;
pub mod config;
pub mod members;
pub mod projects;
pub mod ticket;

pub use auth::{cmd_login, cmd_logout, cmd_register, cmd_whoami};
pub use board::{cmd_board, cmd_move};
pub use config::cmd_config;
pub use members::cmd_members;
pub use projects::{cmd_dashboard, cmd_projects};
pub use ticket::cmd_ticket;

use anyhow::Result;
use bugpilot::api::ApiClient;
use bugpilot::common::AuthUser;
use bugpilot::config::Config;
use bugpilot::errors::ApiError;
use bugpilot::session::{Session, SessionFile};

/// What every command needs: resolved config and a client bound to the
/// persisted session.
pub struct AppContext {
    pub config: Config,
    pub client: ApiClient,
    session_file: SessionFile,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let session_file = SessionFile::new(&config.session_path);
        let session = Session::from_credentials(session_file.load()?);
        let client = ApiClient::from_config(&config, session)?;
        Ok(Self {
            config,
            client,
            session_file,
        })
    }

    /// The signed-in user, or a "run login first" error.
    pub fn require_user(&self) -> Result<AuthUser> {
        self.client
            .session()
            .user()
            .ok_or_else(|| ApiError::MissingToken.into())
    }

    /// Write the session back to disk.
    pub fn persist(&self) -> Result<()> {
        self.session_file.sync(self.client.session())
    }
}
