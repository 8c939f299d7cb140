mod provider;
mod ultradns;

pub use provider::{
    Account, Accounts, ApiEndpoint, Credentials, DnsProviderClient, ProviderConnector,
    ProviderError, Zone, ZoneFilter, ZoneList, ZoneProperties, ZoneType,
};
pub use ultradns::{UltraDnsClient, UltraDnsConnector};

use anyhow::{anyhow, Result};
use std::sync::Arc;

use crate::config::ApiSettings;

pub fn create_connector(api: &ApiSettings) -> Result<Arc<dyn ProviderConnector>> {
    match api.provider.to_lowercase().as_str() {
        "ultradns" => Ok(Arc::new(UltraDnsConnector::new(api))),
        _ => Err(anyhow!("Unknown DNS provider: {}", api.provider)),
    }
}
