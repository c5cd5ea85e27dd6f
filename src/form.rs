use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;

/// Which login form a screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Student name plus numeric student number (NIM).
    #[default]
    NameAndNim,
    EmailAndPassword,
}

impl FormKind {
    fn is_numeric(self, field: Field) -> bool {
        matches!((self, field), (FormKind::NameAndNim, Field::Secret))
    }

    pub fn field_names(self) -> (&'static str, &'static str) {
        match self {
            FormKind::NameAndNim => ("name", "nim"),
            FormKind::EmailAndPassword => ("email", "password"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Identifier,
    Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    /// `value` is the full new text of the field, not a single keystroke.
    Edit { field: Field, value: String },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub kind: FormKind,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub secret: String,
}

/// Values of a complete form, ready for a credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl FormState {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            identifier: String::new(),
            secret: String::new(),
        }
    }

    /// Applies one user event. Edits to a numeric field that would introduce a
    /// non-digit are dropped and the field keeps its previous value.
    pub fn reduce(mut self, event: FormEvent) -> (Self, EditOutcome) {
        match event {
            FormEvent::Reset => {
                self.identifier.clear();
                self.secret.clear();
                (self, EditOutcome::Accepted)
            }
            FormEvent::Edit { field, value } => {
                if self.kind.is_numeric(field) && !is_numeric_text(&value) {
                    debug!("rejected non-numeric edit on {:?}", field);
                    return (self, EditOutcome::Rejected);
                }
                match field {
                    Field::Identifier => self.identifier = value,
                    Field::Secret => self.secret = value,
                }
                (self, EditOutcome::Accepted)
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        let (identifier_name, secret_name) = self.kind.field_names();
        let numeric: &[&str] = if self.kind.is_numeric(Field::Secret) {
            &[secret_name]
        } else {
            &[]
        };
        is_valid(
            &[
                (identifier_name, self.identifier.as_str()),
                (secret_name, self.secret.as_str()),
            ],
            numeric,
        )
    }

    /// False if a numeric field holds anything but digits, which edits
    /// through `reduce` can never produce.
    pub fn is_well_formed(&self) -> bool {
        !self.kind.is_numeric(Field::Secret) || is_numeric_text(&self.secret)
    }

    pub fn submit_enabled(&self) -> bool {
        self.is_valid()
    }

    pub fn submit(&self) -> Result<Credentials, AppError> {
        if !self.is_valid() {
            return Err(AppError::FormIncomplete);
        }
        Ok(Credentials {
            identifier: self.identifier.clone(),
            secret: self.secret.clone(),
        })
    }
}

/// True when every required field holds something other than whitespace and
/// every field named in `numeric` holds only digits.
pub fn is_valid(fields: &[(&str, &str)], numeric: &[&str]) -> bool {
    fields.iter().all(|(name, value)| {
        !value.trim().is_empty() && (!numeric.contains(name) || is_numeric_text(value))
    })
}

pub fn is_numeric_text(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}
