use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiSettings;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// Errors surfaced by a provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("authentication rejected: {0}")]
    Rejected(String),

    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    #[error("invalid name '{0}' in request path")]
    InvalidName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneType {
    Primary,
    Secondary,
}

impl ZoneType {
    pub fn as_query(&self) -> &'static str {
        match self {
            ZoneType::Primary => "PRIMARY",
            ZoneType::Secondary => "SECONDARY",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneType::Primary => write!(f, "primary"),
            ZoneType::Secondary => write!(f, "secondary"),
        }
    }
}

/// Search filter for zone listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFilter {
    pub zone_type: ZoneType,
    pub name: Option<String>,
}

impl ZoneFilter {
    /// Render as the provider's `q` query value, e.g. `name:foo zone_type:PRIMARY`.
    pub fn to_query(&self) -> String {
        match &self.name {
            Some(name) => format!("name:{} zone_type:{}", name, self.zone_type.as_query()),
            None => format!("zone_type:{}", self.zone_type.as_query()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Accounts {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneProperties {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    pub properties: ZoneProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneList {
    pub zones: Vec<Zone>,
}

#[async_trait]
pub trait DnsProviderClient: Send + Sync {
    /// Accounts visible to the authenticated user
    async fn get_account_details(&self) -> Result<Accounts, ProviderError>;

    /// A single page of zones owned by `account`
    async fn get_zones_of_account(
        &self,
        account: &str,
        filter: &ZoneFilter,
        limit: u32,
    ) -> Result<ZoneList, ProviderError>;

    async fn create_secondary_zone(
        &self,
        account: &str,
        zone_name: &str,
        primary_ns: &str,
    ) -> Result<serde_json::Value, ProviderError>;

    async fn delete_zone(&self, zone_name: &str) -> Result<serde_json::Value, ProviderError>;

    /// Promote a secondary zone to primary
    async fn convert_zone(&self, zone_name: &str) -> Result<serde_json::Value, ProviderError>;

    async fn delete_rrset(
        &self,
        zone_name: &str,
        record_type: &str,
        owner_name: &str,
    ) -> Result<serde_json::Value, ProviderError>;

    fn provider_name(&self) -> &'static str;
}

/// Produces authenticated clients.
#[async_trait]
pub trait ProviderConnector: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn DnsProviderClient>, ProviderError>;
}

/// Base URL of the provider API, derived from settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub base_url: String,
}

impl ApiEndpoint {
    pub fn from_settings(api: &ApiSettings) -> Self {
        let scheme = if api.use_tls { "https" } else { "http" };
        Self {
            base_url: format!("{}://{}", scheme, api.host.trim_end_matches('/')),
        }
    }
}
