//! Error types for the demoapp resource adapters.
//!
//! # Design
//! Configuration problems surface before any network activity, validation
//! problems before the request for one operation is sent. Everything that
//! happens once a request exists carries the `Operation` it belongs to so
//! the orchestrator can report it without retrying.
//!
//! A 404 on item read is not an error at all; it is
//! `ReadOutcome::NotFound` in `resource`.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// The adapter operation an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateItem,
    ReadItem,
    UpdateItem,
    DeleteItem,
    CreateDisplay,
    ReadDisplay,
    UpdateDisplay,
    DeleteDisplay,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::CreateItem => "create item",
            Operation::ReadItem => "read item",
            Operation::UpdateItem => "update item",
            Operation::DeleteItem => "delete item",
            Operation::CreateDisplay => "create display",
            Operation::ReadDisplay => "read display",
            Operation::UpdateDisplay => "update display",
            Operation::DeleteDisplay => "delete display",
        };
        f.write_str(s)
    }
}

/// Failure to complete an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The caller's cancellation token fired before the response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// The fixed per-request timeout elapsed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// DNS, connect, TLS, or body read failure.
    #[error("{0}")]
    Request(String),
}

/// Errors returned by the provider and its resources.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither the provider configuration nor the environment named an endpoint.
    #[error(
        "missing demoapp endpoint: set `{key}` in the provider configuration \
         or the {env_var} environment variable"
    )]
    MissingEndpoint {
        key: &'static str,
        env_var: &'static str,
    },

    /// The endpoint is present but not an absolute http(s) URL.
    #[error("invalid demoapp endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The shared HTTP client could not be built.
    #[error("could not build HTTP client: {0}")]
    HttpClient(String),

    /// Input rejected before any request was sent.
    #[error("invalid `{attribute}`: {reason}")]
    Validation {
        attribute: &'static str,
        reason: String,
    },

    #[error("{operation}: could not send HTTP request: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    /// The service answered with a status the operation does not accept.
    #[error("{operation}: API returned status {status}: {body}")]
    Api {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// A success response whose body does not match the wire schema.
    #[error("{operation}: could not parse API response: {message}")]
    Decode {
        operation: Operation,
        message: String,
    },

    #[error("{operation}: could not encode request body: {message}")]
    Encode {
        operation: Operation,
        message: String,
    },
}

impl Error {
    /// Whether this error belongs to provider initialization rather than a
    /// single resource operation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingEndpoint { .. } | Error::InvalidEndpoint { .. } | Error::HttpClient(_)
        )
    }

    /// The operation the error was raised in, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Transport { operation, .. }
            | Error::Api { operation, .. }
            | Error::Decode { operation, .. }
            | Error::Encode { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
