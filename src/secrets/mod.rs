mod creds_file;

pub use creds_file::{load_credentials, CredentialError, CredentialFields};
