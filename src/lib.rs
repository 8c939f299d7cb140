//! zonectl - administer a managed DNS provider's zone inventory.
//!
//! One invocation runs one operation: credentials are loaded, the request is
//! validated, the provider is authenticated against and a single operation
//! is dispatched. The outcome is reported once with a matching exit status.

pub mod app;
pub mod command;
pub mod config;
pub mod dns;
pub mod error;
pub mod report;
pub mod secrets;

pub use error::Error;
