//! Stateless request builder and response parser for the demoapp API.
//!
//! # Design
//! `DemoAppClient` holds only the resolved endpoint and carries no mutable
//! state between calls. Each wire operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The resources run the exchange in between
//! through a `Transport`, so every status-code rule in this file is tested
//! without a network.

use reqwest::Url;
use serde::de::IgnoredAny;

use crate::error::{Error, Operation, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ApiItem, ItemBody};

const ITEMS_PATH: &str = "/api/items";
const DISPLAY_PATH: &str = "/api/display";

/// Body posted to the display endpoint to clear it.
pub const EMPTY_DISPLAY: &str = "{}";

/// Request builder and response parser bound to one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAppClient {
    base_url: String,
}

impl DemoAppClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn items_url(&self) -> String {
        format!("{}{ITEMS_PATH}", self.base_url)
    }

    /// The id is pushed as a single percent-encoded path segment, so it can
    /// never address anything outside the items collection.
    fn item_url(&self, id: &str) -> String {
        let Ok(mut url) = Url::parse(&self.items_url()) else {
            return format!("{}{ITEMS_PATH}/{id}", self.base_url);
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url.into()
    }

    fn display_url(&self) -> String {
        format!("{}{DISPLAY_PATH}", self.base_url)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    pub fn build_create_item(&self, body: &ItemBody) -> Result<HttpRequest> {
        let json = encode(Operation::CreateItem, body)?;
        Ok(HttpRequest::new(HttpMethod::Post, self.items_url()).with_json(json))
    }

    pub fn build_get_item(&self, id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_update_item(&self, id: &str, body: &ItemBody) -> Result<HttpRequest> {
        let json = encode(Operation::UpdateItem, body)?;
        Ok(HttpRequest::new(HttpMethod::Put, self.item_url(id)).with_json(json))
    }

    pub fn build_delete_item(&self, id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<ApiItem> {
        check_status(Operation::CreateItem, &response, &[200, 201])?;
        decode(Operation::CreateItem, &response)
    }

    /// `Ok(None)` when the service answers 404: the item is gone.
    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Option<ApiItem>> {
        if response.status == 404 {
            return Ok(None);
        }
        check_status(Operation::ReadItem, &response, &[200])?;
        decode(Operation::ReadItem, &response).map(Some)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<ApiItem> {
        check_status(Operation::UpdateItem, &response, &[200])?;
        decode(Operation::UpdateItem, &response)
    }

    /// Deleting an item that is already absent succeeds.
    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<()> {
        check_status(Operation::DeleteItem, &response, &[200, 204, 404])
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    /// Build the POST that replaces the display content. `data` is sent as
    /// is, after checking that it is well-formed JSON.
    pub fn build_write_display(&self, data: &str) -> Result<HttpRequest> {
        validate_json("data", data)?;
        Ok(HttpRequest::new(HttpMethod::Post, self.display_url()).with_json(data.to_string()))
    }

    pub fn build_get_display(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.display_url())
    }

    pub fn build_clear_display(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Post, self.display_url()).with_json(EMPTY_DISPLAY.to_string())
    }

    pub fn parse_write_display(&self, operation: Operation, response: HttpResponse) -> Result<()> {
        check_status(operation, &response, &[200, 201])
    }

    /// The raw body is the display content; it is returned untouched.
    pub fn parse_get_display(&self, response: HttpResponse) -> Result<String> {
        check_status(Operation::ReadDisplay, &response, &[200])?;
        Ok(response.body)
    }

    pub fn parse_clear_display(&self, response: HttpResponse) -> Result<()> {
        if response.is_success() {
            return Ok(());
        }
        Err(api_error(Operation::DeleteDisplay, response))
    }
}

/// Check that `data` is syntactically valid JSON without interpreting it.
pub fn validate_json(attribute: &'static str, data: &str) -> Result<()> {
    serde_json::from_str::<IgnoredAny>(data)
        .map(|_| ())
        .map_err(|e| Error::Validation {
            attribute,
            reason: format!("must be valid JSON: {e}"),
        })
}

fn check_status(operation: Operation, response: &HttpResponse, accepted: &[u16]) -> Result<()> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    Err(api_error(operation, response.clone()))
}

fn api_error(operation: Operation, response: HttpResponse) -> Error {
    Error::Api {
        operation,
        status: response.status,
        body: response.body,
    }
}

fn encode(operation: Operation, body: &ItemBody) -> Result<String> {
    serde_json::to_string(body).map_err(|e| Error::Encode {
        operation,
        message: e.to_string(),
    })
}

fn decode(operation: Operation, response: &HttpResponse) -> Result<ApiItem> {
    serde_json::from_str(&response.body).map_err(|e| Error::Decode {
        operation,
        message: e.to_string(),
    })
}
