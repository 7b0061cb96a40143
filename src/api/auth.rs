//! Sign-in and two-step (OTP) registration.

use bugpilot_common::AuthUser;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ApiClient, decode};
use crate::errors::ApiError;
use crate::session::Credentials;

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub otp: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: AuthUser,
}

impl ApiClient {
    /// Sign in and initialize the session with the returned credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        let builder = self
            .public(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password });
        let resp = self.send_public(builder).await?;
        let auth: AuthResponse = decode(resp, "login response").await?;
        Ok(self.start_session(auth))
    }

    /// First registration step: ask the server to email a one-time code.
    pub async fn send_otp(&self, email: &str) -> Result<(), ApiError> {
        if email.trim().is_empty() {
            return Err(ApiError::BadRequest("Email cannot be empty.".to_string()));
        }
        let builder = self
            .public(Method::POST, "/auth/send-otp")
            .json(&serde_json::json!({ "email": email }));
        self.send_public(builder).await?;
        Ok(())
    }

    /// Second registration step: create the account and sign in.
    pub async fn verify_otp(&self, req: &VerifyOtpRequest<'_>) -> Result<Credentials, ApiError> {
        let builder = self.public(Method::POST, "/auth/verify-otp").json(req);
        let resp = self.send_public(builder).await?;
        let auth: AuthResponse = decode(resp, "registration response").await?;
        Ok(self.start_session(auth))
    }

    /// End the session locally. The API keeps no server-side session.
    pub fn logout(&self) {
        self.session.clear();
    }

    fn start_session(&self, auth: AuthResponse) -> Credentials {
        tracing::info!(user = %auth.user.name, "Signed in");
        self.session.init(auth.token.clone(), auth.user.clone());
        Credentials {
            token: auth.token,
            user: auth.user,
        }
    }
}
