//! Execution of `HttpRequest`s.
//!
//! # Design
//! `Transport` is the only place the adapters touch the network. The
//! provider builds one `HttpTransport` at configure time and shares it
//! behind an `Arc`; tests substitute a scripted fake. `send` wraps every
//! exchange with the caller's cancellation token: when the token fires the
//! in-flight future is dropped, which aborts the reqwest request.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, Operation, Result, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Per-request timeout applied by the provider's shared client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes one HTTP exchange. Implementations must be safe to share
/// between concurrent operations.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport with a fixed timeout and no retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::HttpClient(error_chain(&e)))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Request(error_chain(&err))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        Ok(HttpResponse { status, body })
    }
}

/// Run one exchange for `operation`, aborting it if `cancel` fires first.
pub(crate) async fn send(
    transport: &dyn Transport,
    operation: Operation,
    request: HttpRequest,
    cancel: &CancellationToken,
) -> Result<HttpResponse> {
    debug!(%operation, method = request.method.as_str(), url = %request.url, "sending request");

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TransportError::Cancelled),
        result = transport.execute(request) => result,
    };

    match result {
        Ok(response) => {
            debug!(%operation, status = response.status, "received response");
            Ok(response)
        }
        Err(source) => Err(Error::Transport { operation, source }),
    }
}

// reqwest's Display stops at the outermost error ("error sending request");
// the cause (connection refused, dns) is in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
