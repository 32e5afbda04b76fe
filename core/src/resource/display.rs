//! `demoapp_display`: the singleton JSON panel at `/api/display`.
//!
//! Every write replaces the whole panel. Declaring more than one display
//! resource makes them overwrite each other; the last write wins.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{Connection, ReadOutcome, Resource};
use crate::error::{Operation, Result};
use crate::schema::{Attribute, Schema};
use crate::types::{DisplayPlan, DisplayState, DISPLAY_ID};

#[derive(Debug, Clone)]
pub struct DisplayResource {
    conn: Connection,
}

impl DisplayResource {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    async fn write(
        &self,
        operation: Operation,
        plan: &DisplayPlan,
        cancel: &CancellationToken,
    ) -> Result<DisplayState> {
        let client = self.conn.client();
        let request = client.build_write_display(&plan.data)?;
        let response = self.conn.send(operation, request, cancel).await?;
        client.parse_write_display(operation, response)?;

        info!(%operation, bytes = plan.data.len(), "wrote display");
        Ok(DisplayState::new(plan.data.clone()))
    }

    async fn fetch(&self, cancel: &CancellationToken) -> Result<DisplayState> {
        let client = self.conn.client();
        let request = client.build_get_display();
        let response = self.conn.send(Operation::ReadDisplay, request, cancel).await?;
        let data = client.parse_get_display(response)?;
        Ok(DisplayState::new(data))
    }
}

#[async_trait]
impl Resource for DisplayResource {
    type Plan = DisplayPlan;
    type State = DisplayState;

    const TYPE_NAME: &'static str = "demoapp_display";

    fn schema(&self) -> Schema {
        Schema {
            description: "Manages the display panel content in Demo App. Posts arbitrary JSON data that the frontend renders.",
            attributes: vec![
                Attribute::computed(
                    "id",
                    "Placeholder ID (always 'display' since there's only one display panel).",
                ),
                Attribute::required(
                    "data",
                    "JSON string to display. Use jsonencode() to convert HCL to JSON.",
                ),
            ],
        }
    }

    fn needs_update(&self, plan: &DisplayPlan, state: &DisplayState) -> bool {
        plan.data != state.data
    }

    async fn create(&self, plan: &DisplayPlan, cancel: &CancellationToken) -> Result<DisplayState> {
        self.write(Operation::CreateDisplay, plan, cancel).await
    }

    /// The panel always exists while the service runs, so there is no
    /// not-found outcome; any non-200 answer is an error.
    async fn read(
        &self,
        _state: &DisplayState,
        cancel: &CancellationToken,
    ) -> Result<ReadOutcome<DisplayState>> {
        self.fetch(cancel).await.map(ReadOutcome::Found)
    }

    async fn update(
        &self,
        plan: &DisplayPlan,
        _state: &DisplayState,
        cancel: &CancellationToken,
    ) -> Result<DisplayState> {
        self.write(Operation::UpdateDisplay, plan, cancel).await
    }

    /// Clears the panel by posting `{}`. Failures are logged and dropped so
    /// the record always leaves state.
    async fn delete(&self, _state: &DisplayState, cancel: &CancellationToken) -> Result<()> {
        let client = self.conn.client();
        let request = client.build_clear_display();

        let cleared = match self.conn.send(Operation::DeleteDisplay, request, cancel).await {
            Ok(response) => client.parse_clear_display(response),
            Err(err) => Err(err),
        };

        match cleared {
            Ok(()) => info!("cleared display"),
            Err(err) => warn!(error = %err, "could not clear display, removing it from state anyway"),
        }
        Ok(())
    }

    async fn import(&self, id: &str, cancel: &CancellationToken) -> Result<ReadOutcome<DisplayState>> {
        if id != DISPLAY_ID {
            debug!(id, "display import id is ignored");
        }
        self.fetch(cancel).await.map(ReadOutcome::Found)
    }
}
