//! `demoapp_item`: named records stored under `/api/items`.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{Connection, ReadOutcome, Resource};
use crate::error::{Error, Operation, Result};
use crate::schema::{Attribute, Schema};
use crate::types::{ItemBody, ItemPlan, ItemState};

/// Adapter for items. The service assigns the id on create and keeps it for
/// the life of the record.
#[derive(Debug, Clone)]
pub struct ItemResource {
    conn: Connection,
}

impl ItemResource {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    async fn read_id(&self, id: &str, cancel: &CancellationToken) -> Result<ReadOutcome<ItemState>> {
        let client = self.conn.client();
        let request = client.build_get_item(id);
        let response = self.conn.send(Operation::ReadItem, request, cancel).await?;

        match client.parse_get_item(response)? {
            Some(item) => Ok(ReadOutcome::Found(item.into())),
            None => {
                info!(id, "item no longer exists remotely");
                Ok(ReadOutcome::NotFound)
            }
        }
    }
}

fn validate(plan: &ItemPlan) -> Result<ItemBody> {
    if plan.name.is_empty() {
        return Err(Error::Validation {
            attribute: "name",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(ItemBody::from(plan))
}

#[async_trait]
impl Resource for ItemResource {
    type Plan = ItemPlan;
    type State = ItemState;

    const TYPE_NAME: &'static str = "demoapp_item";

    fn schema(&self) -> Schema {
        Schema {
            description: "Manages an item in the Demo App.",
            attributes: vec![
                Attribute::computed("id", "The unique identifier of the item.").use_state_for_unknown(),
                Attribute::required("name", "The name of the item."),
                Attribute::optional("description", "A description of the item."),
            ],
        }
    }

    fn needs_update(&self, plan: &ItemPlan, state: &ItemState) -> bool {
        plan.name != state.name || plan.description.as_deref().unwrap_or_default() != state.description
    }

    async fn create(&self, plan: &ItemPlan, cancel: &CancellationToken) -> Result<ItemState> {
        let body = validate(plan)?;
        let client = self.conn.client();

        let request = client.build_create_item(&body)?;
        let response = self.conn.send(Operation::CreateItem, request, cancel).await?;
        let item = client.parse_create_item(response)?;

        info!(id = item.id, name = %item.name, "created item");
        Ok(item.into())
    }

    async fn read(&self, state: &ItemState, cancel: &CancellationToken) -> Result<ReadOutcome<ItemState>> {
        self.read_id(&state.id, cancel).await
    }

    async fn update(
        &self,
        plan: &ItemPlan,
        state: &ItemState,
        cancel: &CancellationToken,
    ) -> Result<ItemState> {
        let body = validate(plan)?;
        let client = self.conn.client();

        let request = client.build_update_item(&state.id, &body)?;
        let response = self.conn.send(Operation::UpdateItem, request, cancel).await?;
        let item = client.parse_update_item(response)?;

        info!(id = item.id, name = %item.name, "updated item");
        Ok(item.into())
    }

    async fn delete(&self, state: &ItemState, cancel: &CancellationToken) -> Result<()> {
        let client = self.conn.client();
        let request = client.build_delete_item(&state.id);
        let response = self.conn.send(Operation::DeleteItem, request, cancel).await?;

        let status = response.status;
        client.parse_delete_item(response)?;
        if status == 404 {
            debug!(id = %state.id, "item was already absent");
        } else {
            info!(id = %state.id, "deleted item");
        }
        Ok(())
    }

    async fn import(&self, id: &str, cancel: &CancellationToken) -> Result<ReadOutcome<ItemState>> {
        if id.is_empty() {
            return Err(Error::Validation {
                attribute: "id",
                reason: "import requires an item id".to_string(),
            });
        }
        if matches!(id, "." | "..") {
            return Err(Error::Validation {
                attribute: "id",
                reason: format!("{id:?} is not an item id"),
            });
        }
        self.read_id(id, cancel).await
    }
}
