use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::AppError;
use crate::fetch::FetchResult;
use crate::form::FormState;
use crate::models::ScheduleHandoff;
use crate::store::RecordStore;

pub const DENIED_MESSAGE: &str = "Nama atau NIM tidak valid!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthOutcome {
    Authenticated { identity: String },
    Denied { reason: String },
}

/// Checks an identifier/secret pair against the set of authorized users.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<AuthOutcome, AppError>;
}

/// A single authorized name/NIM pair.
#[derive(Clone)]
pub struct StaticCredentials {
    identifier: String,
    secret: String,
}

impl StaticCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let identifier = lookup("PORTAL_NAME")
            .ok_or_else(|| AppError::Config("PORTAL_NAME is not set".to_string()))?;
        let secret = lookup("PORTAL_NIM")
            .ok_or_else(|| AppError::Config("PORTAL_NIM is not set".to_string()))?;
        Ok(Self::new(identifier, secret))
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<AuthOutcome, AppError> {
        if identifier == self.identifier && secret == self.secret {
            Ok(AuthOutcome::Authenticated {
                identity: identifier.to_string(),
            })
        } else {
            Ok(AuthOutcome::Denied {
                reason: DENIED_MESSAGE.to_string(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Submit was not possible; nothing was verified or fetched.
    Incomplete,
    Denied { reason: String },
    Fetched { result: FetchResult },
}

impl SignInOutcome {
    pub fn into_handoff(self) -> Result<ScheduleHandoff, AppError> {
        match self {
            SignInOutcome::Incomplete => Err(AppError::FormIncomplete),
            SignInOutcome::Denied { reason } => Err(AppError::CredentialMismatch(reason)),
            SignInOutcome::Fetched { result } => match result {
                FetchResult::Success { schedules } => Ok(ScheduleHandoff::new(schedules)),
                FetchResult::Failure { message } => Err(AppError::FetchFailed(message)),
                FetchResult::Loading => Err(AppError::FetchFailed(
                    "Fetch did not complete".to_string(),
                )),
            },
        }
    }
}

/// Gates schedule retrieval behind a credential check.
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn CredentialVerifier>,
    records: RecordStore,
    schedule_path: String,
}

impl AuthGate {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        records: RecordStore,
        schedule_path: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            records,
            schedule_path: schedule_path.into(),
        }
    }

    pub async fn sign_in(&self, form: &FormState) -> SignInOutcome {
        let credentials = match form.submit() {
            Ok(credentials) => credentials,
            Err(_) => return SignInOutcome::Incomplete,
        };

        let outcome = match self
            .verifier
            .verify(&credentials.identifier, &credentials.secret)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => AuthOutcome::Denied {
                reason: e.to_string(),
            },
        };

        match outcome {
            AuthOutcome::Denied { reason } => {
                warn!("Sign-in denied: {}", reason);
                SignInOutcome::Denied { reason }
            }
            AuthOutcome::Authenticated { identity } => {
                info!("Signed in as {}, fetching {}", identity, self.schedule_path);
                let result = self.records.fetch_all(&self.schedule_path).await;
                SignInOutcome::Fetched { result }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firebase::RemoteStore;
    use crate::form::FormKind;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        snapshot: Value,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl RemoteStore for CountingStore {
        async fn get_snapshot(&self, _path: &str) -> Result<Value, AppError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.snapshot.clone())
        }
    }

    struct UnreachableVerifier;

    #[async_trait]
    impl CredentialVerifier for UnreachableVerifier {
        async fn verify(&self, _identifier: &str, _secret: &str) -> Result<AuthOutcome, AppError> {
            Err(AppError::Remote {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn build_gate(verifier: Arc<dyn CredentialVerifier>) -> (AuthGate, Arc<CountingStore>) {
        let store = Arc::new(CountingStore {
            snapshot: json!({
                "a": { "hari": "Senin", "matakuliah": "Basis Data" },
                "b": { "hari": "Selasa", "matakuliah": "Jaringan Komputer" }
            }),
            reads: AtomicUsize::new(0),
        });
        let records = RecordStore::new(store.clone());
        (AuthGate::new(verifier, records, "jadwalkuliah"), store)
    }

    fn form(name: &str, nim: &str) -> FormState {
        FormState {
            kind: FormKind::NameAndNim,
            identifier: name.to_string(),
            secret: nim.to_string(),
        }
    }

    #[tokio::test]
    async fn test_correct_credentials_fetch_once() {
        let (gate, store) = build_gate(Arc::new(StaticCredentials::new("Rina", "225150201111001")));

        let outcome = gate.sign_in(&form("Rina", "225150201111001")).await;

        match outcome {
            SignInOutcome::Fetched {
                result: FetchResult::Success { schedules },
            } => {
                assert_eq!(schedules.len(), 2);
                assert_eq!(schedules[0].course_name, "Basis Data");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wrong_credentials_never_fetch() {
        let (gate, store) = build_gate(Arc::new(StaticCredentials::new("Rina", "225150201111001")));

        let outcome = gate.sign_in(&form("Rina", "225150201111002")).await;

        assert_eq!(
            outcome,
            SignInOutcome::Denied {
                reason: DENIED_MESSAGE.to_string()
            }
        );
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_incomplete_form_skips_verification() {
        let (gate, store) = build_gate(Arc::new(StaticCredentials::new(" ", "42")));

        let outcome = gate.sign_in(&form(" ", "42")).await;

        assert_eq!(outcome, SignInOutcome::Incomplete);
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_letter_in_nim_skips_verification() {
        let (gate, store) = build_gate(Arc::new(StaticCredentials::new("Rina", "12a")));

        let outcome = gate.sign_in(&form("Rina", "12a")).await;

        assert_eq!(outcome, SignInOutcome::Incomplete);
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_verifier_error_is_denial() {
        let (gate, store) = build_gate(Arc::new(UnreachableVerifier));

        let outcome = gate.sign_in(&form("Rina", "42")).await;

        assert_eq!(
            outcome,
            SignInOutcome::Denied {
                reason: "Firebase error 503: unavailable".to_string()
            }
        );
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_static_credentials_from_lookup() {
        let result = StaticCredentials::from_lookup(|key| match key {
            "PORTAL_NAME" => Some("Rina".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_handoff_mapping() {
        assert!(matches!(
            SignInOutcome::Incomplete.into_handoff(),
            Err(AppError::FormIncomplete)
        ));
        assert!(matches!(
            SignInOutcome::Denied {
                reason: DENIED_MESSAGE.to_string()
            }
            .into_handoff(),
            Err(AppError::CredentialMismatch(_))
        ));

        let handoff = SignInOutcome::Fetched {
            result: FetchResult::Success { schedules: vec![] },
        }
        .into_handoff()
        .expect("Success should hand off");
        assert!(handoff.schedules.is_empty());
    }
}
