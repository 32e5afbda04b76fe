//! Provider entry point: metadata, schema, and one-time configuration.
//!
//! `configure` runs once per provider lifetime. It resolves the endpoint,
//! builds the shared HTTP transport, and returns the `Connection` that
//! every resource adapter is constructed from.

use std::sync::Arc;

use tracing::info;

use crate::config::{resolve_endpoint_with, ProviderConfig};
use crate::error::Result;
use crate::resource::{Connection, DisplayResource, ItemResource, Resource};
use crate::schema::{Attribute, Schema};
use crate::transport::HttpTransport;

pub const PROVIDER_TYPE_NAME: &str = "demoapp";

#[derive(Debug, Clone)]
pub struct Provider {
    version: String,
}

impl Provider {
    /// `version` is the release version, or `"dev"` for local builds.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    pub fn schema(&self) -> Schema {
        Schema {
            description: "Interact with the Demo App API.",
            attributes: vec![Attribute::optional(
                "endpoint",
                "The endpoint URL of the Demo App API (e.g., http://localhost:8080). \
                 Can also be set via DEMOAPP_ENDPOINT environment variable.",
            )],
        }
    }

    /// Resolve the endpoint from `config` or the process environment.
    pub fn configure(&self, config: &ProviderConfig) -> Result<Connection> {
        self.configure_with(config, |name| std::env::var(name).ok())
    }

    pub fn configure_with<F>(&self, config: &ProviderConfig, lookup: F) -> Result<Connection>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = resolve_endpoint_with(config.endpoint.as_deref(), lookup)?;
        let transport = HttpTransport::new()?;

        info!(
            endpoint = %endpoint,
            version = %self.version,
            timeout = ?transport.timeout(),
            "configured demoapp provider"
        );
        Ok(Connection::new(&endpoint, Arc::new(transport)))
    }

    /// Resource type names this provider serves.
    pub fn resources(&self) -> Vec<&'static str> {
        vec![ItemResource::TYPE_NAME, DisplayResource::TYPE_NAME]
    }

    pub fn item_resource(&self, conn: &Connection) -> ItemResource {
        ItemResource::new(conn.clone())
    }

    pub fn display_resource(&self, conn: &Connection) -> DisplayResource {
        DisplayResource::new(conn.clone())
    }
}
