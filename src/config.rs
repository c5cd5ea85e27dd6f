use std::env;
use std::net::SocketAddr;

use crate::auth::StaticCredentials;
use crate::error::AppError;
use crate::firebase::FirebaseConfig;
use crate::firebase::auth::FirebaseAuthConfig;
use crate::form::FormKind;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub enum AuthMode {
    /// One name/NIM pair from the environment.
    Static(StaticCredentials),
    /// Email/password accounts in Firebase Authentication.
    Firebase(FirebaseAuthConfig),
}

impl AuthMode {
    pub fn form_kind(&self) -> FormKind {
        match self {
            AuthMode::Static(_) => FormKind::NameAndNim,
            AuthMode::Firebase(_) => FormKind::EmailAndPassword,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub firebase: FirebaseConfig,
    pub auth: AuthMode,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_text = lookup("PORTAL_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_text
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("PORTAL_ADDR {:?} is invalid: {}", addr_text, e)))?;

        let firebase = FirebaseConfig::from_lookup(&lookup)?;

        let auth = match lookup("AUTH_MODE").as_deref().unwrap_or("static") {
            "static" => AuthMode::Static(StaticCredentials::from_lookup(&lookup)?),
            "firebase" => AuthMode::Firebase(FirebaseAuthConfig::from_lookup(&lookup)?),
            other => {
                return Err(AppError::Config(format!(
                    "AUTH_MODE must be \"static\" or \"firebase\", got {:?}",
                    other
                )));
            }
        };

        Ok(Self {
            addr,
            firebase,
            auth,
        })
    }
}
