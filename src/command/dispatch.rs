use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::request::{Request, RequestKind};
use crate::config::ApiSettings;
use crate::dns::{DnsProviderClient, ProviderError, Zone, ZoneFilter};
use crate::error::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("could not get account name: {0}")]
    AccountResolution(#[source] ProviderError),

    #[error("could not get account name: no accounts available to these credentials")]
    NoAccount,

    #[error("{operation}: {source}")]
    Operation {
        operation: String,
        source: ProviderError,
    },
}

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Page size for zone listings; only the first page is fetched.
    pub zone_list_limit: u32,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            zone_list_limit: 1000,
        }
    }
}

impl From<&ApiSettings> for DispatchOptions {
    fn from(api: &ApiSettings) -> Self {
        Self {
            zone_list_limit: api.zone_list_limit,
        }
    }
}

/// Zone names in provider order with the trailing dot removed.
///
/// Consumed once by the reporter.
#[derive(Debug)]
pub struct ZoneNames {
    zones: std::vec::IntoIter<Zone>,
}

impl ZoneNames {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones: zones.into_iter(),
        }
    }
}

impl Iterator for ZoneNames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.zones
            .next()
            .map(|zone| display_name(&zone.properties.name).to_string())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.zones.size_hint()
    }
}

#[derive(Debug)]
pub enum Payload {
    Zones(ZoneNames),
    Response(Value),
}

#[derive(Debug)]
pub enum OperationResult {
    Success(Payload),
    Failure(Error),
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }
}

/// Append the root label if `name` is relative.
pub fn absolute_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Drop the single trailing root label the provider appends.
pub fn display_name(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Runs one validated request against an authenticated client.
pub struct Dispatcher<'a> {
    client: &'a dyn DnsProviderClient,
    options: DispatchOptions,
}

impl<'a> Dispatcher<'a> {
    pub fn new(client: &'a dyn DnsProviderClient, options: DispatchOptions) -> Self {
        Self { client, options }
    }

    pub async fn dispatch(&self, request: &Request) -> OperationResult {
        match self.run(request).await {
            Ok(payload) => OperationResult::Success(payload),
            Err(e) => OperationResult::Failure(Error::Dispatch(e)),
        }
    }

    async fn run(&self, request: &Request) -> Result<Payload, DispatchError> {
        match request.kind() {
            RequestKind::ListZones {
                zone_type,
                name_filter,
            } => {
                let account = self.resolve_account().await?;
                let filter = ZoneFilter {
                    zone_type: zone_type.clone(),
                    name: name_filter.clone(),
                };

                let list = self
                    .client
                    .get_zones_of_account(&account, &filter, self.options.zone_list_limit)
                    .await
                    .map_err(|source| DispatchError::Operation {
                        operation: format!("failed to get {} zone(s)", zone_type),
                        source,
                    })?;

                if list.zones.len() as u64 >= u64::from(self.options.zone_list_limit) {
                    debug!(
                        "Zone listing hit the page limit of {}; later pages are not fetched",
                        self.options.zone_list_limit
                    );
                }

                Ok(Payload::Zones(ZoneNames::new(list.zones)))
            }

            RequestKind::AddSecondaryZone {
                zone_name,
                primary_ns,
            } => {
                let account = self.resolve_account().await?;
                let zone = absolute_name(zone_name);
                debug!("Creating secondary zone {} in {} from {}", zone, account, primary_ns);

                let result = self
                    .client
                    .create_secondary_zone(&account, &zone, primary_ns)
                    .await
                    .map_err(|source| DispatchError::Operation {
                        operation: format!("failed to add secondary zone '{}'", zone_name),
                        source,
                    })?;

                info!("Added secondary zone {}", zone);
                Ok(Payload::Response(result))
            }

            RequestKind::DeleteZone { zone_name } => {
                let result = self
                    .client
                    .delete_zone(&absolute_name(zone_name))
                    .await
                    .map_err(|source| DispatchError::Operation {
                        operation: format!("failed to delete zone '{}'", zone_name),
                        source,
                    })?;

                info!("Deleted zone {}", zone_name);
                Ok(Payload::Response(result))
            }

            RequestKind::PromoteZone { zone_name } => {
                let result = self
                    .client
                    .convert_zone(&absolute_name(zone_name))
                    .await
                    .map_err(|source| DispatchError::Operation {
                        operation: format!("failed to promote zone '{}'", zone_name),
                        source,
                    })?;

                info!("Promoted zone {} to primary", zone_name);
                Ok(Payload::Response(result))
            }

            RequestKind::DeleteARecord {
                zone_name,
                record_name,
            } => {
                // Relative and absolute owner names are both accepted as-is.
                let result = self
                    .client
                    .delete_rrset(zone_name, "A", record_name)
                    .await
                    .map_err(|source| DispatchError::Operation {
                        operation: format!(
                            "failed to delete A record '{}.{}'",
                            record_name, zone_name
                        ),
                        source,
                    })?;

                info!("Deleted A record {} from {}", record_name, zone_name);
                Ok(Payload::Response(result))
            }
        }
    }

    /// First account visible to the authenticated user.
    async fn resolve_account(&self) -> Result<String, DispatchError> {
        let details = self
            .client
            .get_account_details()
            .await
            .map_err(DispatchError::AccountResolution)?;

        let account = details
            .accounts
            .into_iter()
            .next()
            .ok_or(DispatchError::NoAccount)?;

        debug!("Using account {}", account.account_name);
        Ok(account.account_name)
    }
}
