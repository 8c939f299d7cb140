use std::path::PathBuf;

use tracing::debug;

use crate::command::{validate, Command, CommandOptions, DispatchOptions, Dispatcher, OperationResult};
use crate::dns::ProviderConnector;
use crate::error::Error;
use crate::secrets::{load_credentials, CredentialError, CredentialFields};

/// Everything the user asked for in one run.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: Command,
    pub options: CommandOptions,
    pub creds_file: Option<PathBuf>,
}

/// Run one invocation: credentials, validation, authentication, dispatch.
///
/// Nothing touches the network until credentials load and the request
/// validates.
pub async fn execute(
    invocation: &Invocation,
    connector: &dyn ProviderConnector,
    fields: &CredentialFields,
    options: DispatchOptions,
) -> OperationResult {
    let creds_file = match &invocation.creds_file {
        Some(path) => path,
        None => return OperationResult::Failure(CredentialError::NotSpecified.into()),
    };

    let credentials = match load_credentials(creds_file, fields) {
        Ok(credentials) => credentials,
        Err(e) => return OperationResult::Failure(e.into()),
    };

    let request = match validate(invocation.command, &invocation.options) {
        Ok(request) => request,
        Err(e) => return OperationResult::Failure(e.into()),
    };

    debug!("Running {} for {:?}", invocation.command, request.zone_name());

    let client = match connector.authenticate(&credentials).await {
        Ok(client) => client,
        Err(e) => return OperationResult::Failure(Error::Authentication(e)),
    };

    debug!("Authenticated with {}", client.provider_name());

    Dispatcher::new(client.as_ref(), options)
        .dispatch(&request)
        .await
}
