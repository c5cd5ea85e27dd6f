use std::env;

use async_trait::async_trait;
use reqwest::Client;

use crate::auth::{AuthOutcome, CredentialVerifier};
use crate::error::AppError;

use super::dto;

pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Clone)]
pub struct FirebaseAuthConfig {
    pub api_key: String,
    pub auth_url: String,
}

impl FirebaseAuthConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("FIREBASE_API_KEY")
            .ok_or_else(|| AppError::Config("FIREBASE_API_KEY is not set".to_string()))?;
        let auth_url = lookup("FIREBASE_AUTH_URL")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
        Ok(Self { api_key, auth_url })
    }

    pub fn sign_in_url(&self) -> String {
        format!(
            "{}/accounts:signInWithPassword?key={}",
            self.auth_url.trim_end_matches('/'),
            self.api_key
        )
    }
}

impl std::fmt::Debug for FirebaseAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseAuthConfig")
            .field("auth_url", &self.auth_url)
            .finish_non_exhaustive()
    }
}

/// Email/password sign-in against Firebase Authentication.
pub struct FirebasePasswordAuth {
    client: Client,
    config: FirebaseAuthConfig,
}

impl FirebasePasswordAuth {
    pub fn new(config: FirebaseAuthConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CredentialVerifier for FirebasePasswordAuth {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<AuthOutcome, AppError> {
        let request_body = dto::SignInWithPasswordRequest {
            email: identifier,
            password: secret,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(self.config.sign_in_url())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            let parsed: dto::SignInWithPasswordResponse = serde_json::from_str(&body)?;
            return Ok(AuthOutcome::Authenticated {
                identity: parsed.email.unwrap_or(parsed.local_id),
            });
        }

        sign_in_error(status.as_u16(), &body)
    }
}

/// Bad credentials come back as 400 with a reason code; anything else is a
/// transport-level failure.
fn sign_in_error(status: u16, body: &str) -> Result<AuthOutcome, AppError> {
    match serde_json::from_str::<dto::AuthErrorBody>(body) {
        Ok(parsed) if parsed.error.code == 400 => Ok(AuthOutcome::Denied {
            reason: parsed.error.message,
        }),
        Ok(parsed) => Err(AppError::Remote {
            status,
            message: parsed.error.message,
        }),
        Err(_) => Err(AppError::Remote {
            status,
            message: body.to_string(),
        }),
    }
}
