pub mod auth;
pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::error::AppError;

pub const DEFAULT_SCHEDULE_PATH: &str = "jadwalkuliah";

#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub database_url: String,
    pub auth_token: Option<String>,
    pub schedule_path: String,
}

impl FirebaseConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("FIREBASE_DATABASE_URL")
            .ok_or_else(|| AppError::Config("FIREBASE_DATABASE_URL is not set".to_string()))?;
        let auth_token = lookup("FIREBASE_AUTH_TOKEN").filter(|t| !t.is_empty());
        let schedule_path = lookup("SCHEDULE_PATH")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_SCHEDULE_PATH.to_string());

        Ok(Self {
            database_url,
            auth_token,
            schedule_path,
        })
    }

    /// REST address of the node at `path`, without credentials.
    pub fn node_url(&self, path: &str) -> String {
        format!(
            "{}/{}.json",
            self.database_url.trim_end_matches('/'),
            path.trim_matches('/')
        )
    }
}

/// One-shot read access to a hierarchical key-value store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns the whole subtree under `path`, or `Value::Null` if nothing is stored there.
    async fn get_snapshot(&self, path: &str) -> Result<Value, AppError>;
}

pub struct FirebaseRestStore {
    client: Client,
    config: FirebaseConfig,
}

impl FirebaseRestStore {
    pub fn new(config: FirebaseConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn snapshot_request(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(self.config.node_url(path));
        match &self.config.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }
}

#[async_trait]
impl RemoteStore for FirebaseRestStore {
    async fn get_snapshot(&self, path: &str) -> Result<Value, AppError> {
        tracing::debug!("reading firebase node {}", path);

        let response = self.snapshot_request(path).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(database_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn database_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<dto::DatabaseErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string());
    AppError::Remote { status, message }
}
