use serde::{Deserialize, Serialize};

/// Error body of the Realtime Database REST API, e.g. `{"error": "Permission denied"}`.
#[derive(Debug, Deserialize)]
pub struct DatabaseErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithPasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithPasswordResponse {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthErrorBody {
    pub error: AuthErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct AuthErrorDetail {
    pub code: u16,
    pub message: String,
}
