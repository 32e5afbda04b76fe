//! Resource adapters exposed to the orchestrator.
//!
//! # Design
//! Both adapters implement `Resource`, the four CRUD entry points plus a
//! declared schema. They share nothing but a `Connection`, the
//! request builder and transport pair built once by the provider, so any
//! number of adapters can run operations concurrently.
//!
//! Items and the display panel differ in identity and delete semantics and
//! are separate types: items get their id from the service and fail loudly
//! on delete, the display is a singleton with a fixed id whose delete is
//! best-effort.

pub mod display;
pub mod item;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::client::DemoAppClient;
use crate::error::{Operation, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::schema::Schema;
use crate::transport::{self, Transport};

pub use display::DisplayResource;
pub use item::ItemResource;

/// Result of a read that can find the record gone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ReadOutcome<T> {
    Found(T),
    /// The service no longer has the record; drop it from state.
    NotFound,
}

impl<T> ReadOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            ReadOutcome::Found(value) => Some(value),
            ReadOutcome::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReadOutcome::NotFound)
    }
}

/// Request builder plus transport, shared by every adapter of a provider.
#[derive(Debug, Clone)]
pub struct Connection {
    client: DemoAppClient,
    transport: Arc<dyn Transport>,
}

impl Connection {
    pub fn new(endpoint: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: DemoAppClient::new(endpoint),
            transport,
        }
    }

    pub fn client(&self) -> &DemoAppClient {
        &self.client
    }

    pub(crate) async fn send(
        &self,
        operation: Operation,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse> {
        transport::send(self.transport.as_ref(), operation, request, cancel).await
    }
}

/// A record type the orchestrator can manage.
///
/// `create` and `update` return the service's view of the record, which
/// replaces whatever the caller planned. None of the methods retry.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Attributes the user configures.
    type Plan: Clone + fmt::Debug + Send + Sync;
    /// What the orchestrator persists between runs.
    type State: Clone + fmt::Debug + Send + Sync;

    /// Full resource type name, `<provider>_<suffix>`.
    const TYPE_NAME: &'static str;

    fn schema(&self) -> Schema;

    /// Whether `plan` differs from the persisted `state` in any attribute
    /// the user controls.
    fn needs_update(&self, plan: &Self::Plan, state: &Self::State) -> bool;

    async fn create(&self, plan: &Self::Plan, cancel: &CancellationToken) -> Result<Self::State>;

    async fn read(
        &self,
        state: &Self::State,
        cancel: &CancellationToken,
    ) -> Result<ReadOutcome<Self::State>>;

    async fn update(
        &self,
        plan: &Self::Plan,
        state: &Self::State,
        cancel: &CancellationToken,
    ) -> Result<Self::State>;

    async fn delete(&self, state: &Self::State, cancel: &CancellationToken) -> Result<()>;

    /// Adopt an existing record by id.
    async fn import(&self, id: &str, cancel: &CancellationToken) -> Result<ReadOutcome<Self::State>>;
}
