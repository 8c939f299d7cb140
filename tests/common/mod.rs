//! Test doubles shared by the integration tests
//!
//! `RecordingClient` stands in for the provider API and records every call
//! so tests can assert on exactly what reached the network boundary.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;

use zonectl::dns::{
    Account, Accounts, Credentials, DnsProviderClient, ProviderConnector, ProviderError, Zone,
    ZoneFilter, ZoneList, ZoneProperties,
};

/// Shared call log
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }
}

/// Provider client that answers from canned data
#[derive(Clone)]
pub struct RecordingClient {
    log: CallLog,
    accounts: Vec<String>,
    zones: Vec<String>,
    failures: HashMap<&'static str, (u16, String)>,
}

impl RecordingClient {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            accounts: vec!["acme".to_string()],
            zones: Vec::new(),
            failures: HashMap::new(),
        }
    }

    pub fn with_accounts(mut self, accounts: &[&str]) -> Self {
        self.accounts = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_zones(mut self, zones: &[&str]) -> Self {
        self.zones = zones.iter().map(|z| z.to_string()).collect();
        self
    }

    /// Make `operation` fail with an API error
    pub fn failing(mut self, operation: &'static str, status: u16, message: &str) -> Self {
        self.failures.insert(operation, (status, message.to_string()));
        self
    }

    fn check(&self, operation: &'static str) -> Result<(), ProviderError> {
        match self.failures.get(operation) {
            Some((status, message)) => Err(ProviderError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DnsProviderClient for RecordingClient {
    async fn get_account_details(&self) -> Result<Accounts, ProviderError> {
        self.log.push("get_account_details".to_string());
        self.check("get_account_details")?;
        Ok(Accounts {
            accounts: self
                .accounts
                .iter()
                .map(|name| Account {
                    account_name: name.clone(),
                })
                .collect(),
        })
    }

    async fn get_zones_of_account(
        &self,
        account: &str,
        filter: &ZoneFilter,
        limit: u32,
    ) -> Result<ZoneList, ProviderError> {
        self.log.push(format!(
            "get_zones_of_account {} {} {}",
            account,
            filter.to_query(),
            limit
        ));
        self.check("get_zones_of_account")?;
        Ok(ZoneList {
            zones: self
                .zones
                .iter()
                .map(|name| Zone {
                    properties: ZoneProperties { name: name.clone() },
                })
                .collect(),
        })
    }

    async fn create_secondary_zone(
        &self,
        account: &str,
        zone_name: &str,
        primary_ns: &str,
    ) -> Result<Value, ProviderError> {
        self.log.push(format!(
            "create_secondary_zone {} {} {}",
            account, zone_name, primary_ns
        ));
        self.check("create_secondary_zone")?;
        Ok(json!({ "message": "Successful" }))
    }

    async fn delete_zone(&self, zone_name: &str) -> Result<Value, ProviderError> {
        self.log.push(format!("delete_zone {}", zone_name));
        self.check("delete_zone")?;
        Ok(json!({ "message": "Successful" }))
    }

    async fn convert_zone(&self, zone_name: &str) -> Result<Value, ProviderError> {
        self.log.push(format!("convert_zone {}", zone_name));
        self.check("convert_zone")?;
        Ok(json!({ "message": "Successful" }))
    }

    async fn delete_rrset(
        &self,
        zone_name: &str,
        record_type: &str,
        owner_name: &str,
    ) -> Result<Value, ProviderError> {
        self.log.push(format!(
            "delete_rrset {} {} {}",
            zone_name, record_type, owner_name
        ));
        self.check("delete_rrset")?;
        Ok(Value::String("204 No Content".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Connector handing out a `RecordingClient`
pub struct RecordingConnector {
    client: RecordingClient,
    log: CallLog,
    reject: bool,
}

impl RecordingConnector {
    pub fn new(client: RecordingClient, log: CallLog) -> Self {
        Self {
            client,
            log,
            reject: false,
        }
    }

    pub fn rejecting(mut self) -> Self {
        self.reject = true;
        self
    }
}

#[async_trait]
impl ProviderConnector for RecordingConnector {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn DnsProviderClient>, ProviderError> {
        self.log.push(format!("authenticate {}", credentials.username));
        if self.reject {
            return Err(ProviderError::Rejected(
                "400 Bad Request invalid_grant".to_string(),
            ));
        }
        Ok(Box::new(self.client.clone()))
    }
}

/// Write a credentials file and keep its directory alive
pub fn creds_file(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("creds.yaml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
