use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::debug;

use crate::dns::Credentials;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("please specify API credentials file")]
    NotSpecified,

    #[error("could not load API credentials yaml file {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("API credentials file {} does not contain valid YAML", .path.display())]
    Malformed { path: PathBuf },

    #[error("API credentials file does not specify '{0}'")]
    MissingField(String),

    #[error("API credentials file field '{0}' must be a non-empty string")]
    InvalidField(String),
}

/// Key names looked up in the credentials document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFields {
    pub username: String,
    pub password: String,
}

impl Default for CredentialFields {
    fn default() -> Self {
        Self {
            username: "username".to_string(),
            password: "password".to_string(),
        }
    }
}

/// Load a username/password pair from a YAML mapping at `path`.
pub fn load_credentials(
    path: &Path,
    fields: &CredentialFields,
) -> Result<Credentials, CredentialError> {
    let content = fs::read_to_string(path).map_err(|e| CredentialError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if is_blank_document(&content) {
        return Err(CredentialError::Malformed {
            path: path.to_path_buf(),
        });
    }

    let document: Value =
        serde_yaml::from_str(&content).map_err(|e| CredentialError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(CredentialError::Malformed {
                path: path.to_path_buf(),
            })
        }
    };

    let username = required_field(&mapping, &fields.username)?;
    let password = required_field(&mapping, &fields.password)?;

    debug!("Loaded API credentials for user {}", username);

    Ok(Credentials { username, password })
}

fn required_field(mapping: &Mapping, name: &str) -> Result<String, CredentialError> {
    match mapping.get(name) {
        None | Some(Value::Null) => Err(CredentialError::MissingField(name.to_string())),
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(_) => Err(CredentialError::InvalidField(name.to_string())),
    }
}

// Only whitespace, comments or a bare document marker.
fn is_blank_document(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
