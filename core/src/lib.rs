//! Resource adapters for the demoapp inventory service.
//!
//! # Overview
//! Lets an infrastructure orchestrator manage two record types over HTTP:
//! named items under `/api/items` and the singleton display panel under
//! `/api/display`. The orchestrator calls `create` / `read` / `update` /
//! `delete` on a `Resource`; the adapter translates each call into one
//! request and turns the answer back into persisted state.
//!
//! # Design
//! - `DemoAppClient` builds `HttpRequest`s and parses `HttpResponse`s
//!   without I/O; every status-code rule lives there.
//! - `Transport` executes requests. `Provider::configure` builds the one
//!   reqwest-backed transport (30 s timeout, no retries) and hands it to
//!   every adapter through a `Connection`.
//! - Every operation takes a `CancellationToken` and aborts its in-flight
//!   request when it fires.
//! - `lifecycle::Managed` is the orchestrator-side view of one record and
//!   enforces that failed operations leave state untouched.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod transport;
pub mod types;

pub use client::DemoAppClient;
pub use config::{resolve_endpoint, ProviderConfig, ENDPOINT_ENV_VAR};
pub use error::{Error, Operation, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use lifecycle::{Managed, Phase, PlannedAction};
pub use provider::Provider;
pub use resource::{Connection, DisplayResource, ItemResource, ReadOutcome, Resource};
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT};
pub use types::{ApiItem, DisplayPlan, DisplayState, ItemBody, ItemPlan, ItemState, DISPLAY_ID};

pub use tokio_util::sync::CancellationToken;
