//! REST client for the BugPilot API.
//!
//! ## Overview
//!
//! `ApiClient` is a thin typed wrapper over `reqwest`: every call builds a
//! request relative to the configured base URL, attaches the session's
//! bearer token, maps non-2xx responses to `ApiError::Status` (using the
//! server's `message` field when present) and decodes the JSON body.
//!
//! A `401` on an authenticated request clears the session, so the next
//! command starts signed out instead of retrying a dead token.
//!
//! | Module     | Endpoints                                              |
//! |------------|--------------------------------------------------------|
//! | `auth`     | `/auth/login`, `/auth/send-otp`, `/auth/verify-otp`    |
//! | `projects` | `/projects`, `/projects/:id/members`, `/users/search`  |
//! | `tickets`  | `/tickets`, comments, screenshots, `my-tickets`        |

pub mod auth;
pub mod projects;
pub mod tickets;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::errors::ApiError;
use crate::session::Session;

pub use auth::{LoginRequest, VerifyOtpRequest};
pub use projects::NewProject;
pub use tickets::{NewTicket, TicketUpdate};

/// Error payload shape used by the API (`{"message": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bugpilot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn from_config(config: &Config, session: Session) -> Result<Self, ApiError> {
        Self::new(&config.base_url, config.timeout, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request with the bearer credential. Fails fast when signed out.
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.session.bearer().ok_or(ApiError::MissingToken)?;
        Ok(self.http.request(method, self.url(path)).bearer_auth(token))
    }

    /// Request without credentials (login and registration).
    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Send an authenticated request and check its status.
    async fn send_authed(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = builder.send().await?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Authentication token expired or invalid. Clearing session.");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        check_status(resp).await
    }

    /// Send a public request and check its status.
    async fn send_public(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = builder.send().await?;
        check_status(resp).await
    }
}

async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response, what: &'static str) -> Result<T, ApiError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode { what, source })
}
