use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::provider::{
    Accounts, ApiEndpoint, Credentials, DnsProviderClient, ProviderConnector, ProviderError,
    ZoneFilter, ZoneList,
};
use crate::config::ApiSettings;

const TOKEN_PATH: &str = "/v1/authorization/token";

/// Connects to the UltraDNS REST API with a username and password.
pub struct UltraDnsConnector {
    endpoint: ApiEndpoint,
    timeout: Duration,
}

impl UltraDnsConnector {
    pub fn new(api: &ApiSettings) -> Self {
        Self {
            endpoint: ApiEndpoint::from_settings(api),
            timeout: Duration::from_secs(api.timeout_seconds),
        }
    }
}

#[async_trait]
impl ProviderConnector for UltraDnsConnector {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn DnsProviderClient>, ProviderError> {
        let client = UltraDnsClient::authenticate(credentials, &self.endpoint, self.timeout).await?;
        Ok(Box::new(client))
    }
}

pub struct UltraDnsClient {
    client: Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateZoneProperties<'a> {
    name: &'a str,
    account_name: &'a str,
    #[serde(rename = "type")]
    zone_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSecondaryZone<'a> {
    properties: CreateZoneProperties<'a>,
    secondary_create_info: Value,
}

impl UltraDnsClient {
    /// Exchange credentials for an access token.
    pub async fn authenticate(
        credentials: &Credentials,
        endpoint: &ApiEndpoint,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        let url = format!("{}{}", endpoint.base_url, TOKEN_PATH);

        debug!("Requesting access token from {}", endpoint.base_url);

        let response = client
            .post(&url)
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response.text().await.unwrap_or_default());
            return Err(ProviderError::Rejected(format!("{} {}", status, message)));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ProviderError::UnexpectedResponse(format!("token response: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: endpoint.base_url.clone(),
            access_token: token.access_token,
        })
    }

    /// Join `segments` onto the base URL, each as one percent-encoded path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ProviderError::InvalidName(bad.to_string()));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::UnexpectedResponse(format!("base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::UnexpectedResponse(format!("base URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    async fn json_body(response: Response) -> Result<Value, ProviderError> {
        let response = check_status(response).await?;
        let status = response.status();
        let body = response.text().await?;

        if body.trim().is_empty() {
            return Ok(Value::String(status.to_string()));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Api {
        status: status.as_u16(),
        message: error_message(body),
    })
}

/// Pull `errorMessage` out of an UltraDNS error body, falling back to the raw text.
fn error_message(body: String) -> String {
    let errors = serde_json::from_str::<Vec<ApiErrorBody>>(&body)
        .or_else(|_| serde_json::from_str::<ApiErrorBody>(&body).map(|e| vec![e]));
    if let Ok(errors) = errors {
        let messages: Vec<String> = errors
            .into_iter()
            .filter_map(|e| match (e.error_code, e.error_message) {
                (Some(code), Some(msg)) => Some(format!("{} (code {})", msg, code)),
                (None, Some(msg)) => Some(msg),
                _ => None,
            })
            .collect();
        if !messages.is_empty() {
            return messages.join(", ");
        }
    }
    body
}

#[async_trait]
impl DnsProviderClient for UltraDnsClient {
    async fn get_account_details(&self) -> Result<Accounts, ProviderError> {
        let response = self
            .client
            .get(self.url(&["v1", "accounts"])?)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let body = Self::json_body(response).await?;
        serde_json::from_value(body).map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))
    }

    async fn get_zones_of_account(
        &self,
        account: &str,
        filter: &ZoneFilter,
        limit: u32,
    ) -> Result<ZoneList, ProviderError> {
        let query = filter.to_query();
        debug!("Listing zones of {} with q={} limit={}", account, query, limit);

        let response = self
            .client
            .get(self.url(&["v1", "accounts", account, "zones"])?)
            .header("Authorization", self.auth_header())
            .query(&[("q", query), ("limit", limit.to_string())])
            .send()
            .await?;

        let body = Self::json_body(response).await?;
        if body.get("zones").is_none() {
            return Err(ProviderError::UnexpectedResponse(format!(
                "API returned {}",
                body
            )));
        }

        serde_json::from_value(body).map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))
    }

    async fn create_secondary_zone(
        &self,
        account: &str,
        zone_name: &str,
        primary_ns: &str,
    ) -> Result<Value, ProviderError> {
        let payload = CreateSecondaryZone {
            properties: CreateZoneProperties {
                name: zone_name,
                account_name: account,
                zone_type: "SECONDARY",
            },
            secondary_create_info: json!({
                "primaryNameServers": {
                    "nameServerIpList": {
                        "nameServerIp1": { "ip": primary_ns }
                    }
                }
            }),
        };

        let response = self
            .client
            .post(self.url(&["v1", "zones"])?)
            .header("Authorization", self.auth_header())
            .json(&payload)
            .send()
            .await?;

        Self::json_body(response).await
    }

    async fn delete_zone(&self, zone_name: &str) -> Result<Value, ProviderError> {
        let response = self
            .client
            .delete(self.url(&["v1", "zones", zone_name])?)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        Self::json_body(response).await
    }

    async fn convert_zone(&self, zone_name: &str) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(self.url(&["v1", "zones", zone_name, "convert"])?)
            .header("Authorization", self.auth_header())
            .json(&json!({}))
            .send()
            .await?;

        Self::json_body(response).await
    }

    async fn delete_rrset(
        &self,
        zone_name: &str,
        record_type: &str,
        owner_name: &str,
    ) -> Result<Value, ProviderError> {
        let response = self
            .client
            .delete(self.url(&[
                "v1", "zones", zone_name, "rrsets", record_type, owner_name,
            ])?)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        Self::json_body(response).await
    }

    fn provider_name(&self) -> &'static str {
        "ultradns"
    }
}
