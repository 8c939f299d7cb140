//! Error types for zonectl
//!
//! Every stage of a run has its own error type; they all end up in
//! [`Error`], whose display form is the message shown to the user.

use thiserror::Error;

use crate::command::{DispatchError, ValidationError};
use crate::dns::ProviderError;
use crate::secrets::CredentialError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not authenticate: {0}")]
    Authentication(#[source] ProviderError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
