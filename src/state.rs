use std::sync::Arc;

use crate::auth::{AuthGate, CredentialVerifier};
use crate::firebase::RemoteStore;
use crate::form::FormKind;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub records: RecordStore,
    pub gate: AuthGate,
    pub form_kind: FormKind,
    pub schedule_path: String,
}

impl AppState {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        verifier: Arc<dyn CredentialVerifier>,
        form_kind: FormKind,
        schedule_path: impl Into<String>,
    ) -> Self {
        let schedule_path = schedule_path.into();
        let records = RecordStore::new(remote);
        let gate = AuthGate::new(verifier, records.clone(), schedule_path.clone());
        Self {
            records,
            gate,
            form_kind,
            schedule_path,
        }
    }
}
