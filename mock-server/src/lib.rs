use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct ItemInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Everything the service stores.
#[derive(Debug)]
pub struct Inventory {
    next_id: u64,
    items: BTreeMap<u64, Item>,
    display: String,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: BTreeMap::new(),
            display: "{}".to_string(),
        }
    }
}

pub type Db = Arc<RwLock<Inventory>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Inventory::default()));
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/api/display", get(get_display).post(set_display))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let inventory = db.read().await;
    Json(inventory.items.values().cloned().collect())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<ItemInput>,
) -> (StatusCode, Json<Item>) {
    let mut inventory = db.write().await;
    let item = Item {
        id: inventory.next_id,
        name: input.name,
        description: input.description,
    };
    inventory.next_id += 1;
    inventory.items.insert(item.id, item.clone());
    info!(id = item.id, "created item");
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Item>, StatusCode> {
    let inventory = db.read().await;
    inventory
        .items
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>, StatusCode> {
    let mut inventory = db.write().await;
    let item = inventory.items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    item.name = input.name;
    item.description = input.description;
    Ok(Json(item.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut inventory = db.write().await;
    match inventory.items.remove(&id) {
        Some(_) => {
            info!(id, "deleted item");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn get_display(State(db): State<Db>) -> impl IntoResponse {
    let inventory = db.read().await;
    (
        [(header::CONTENT_TYPE, "application/json")],
        inventory.display.clone(),
    )
}

// The body is stored as received so reads return the exact bytes written.
async fn set_display(State(db): State<Db>, body: String) -> StatusCode {
    if serde_json::from_str::<serde::de::IgnoredAny>(&body).is_err() {
        return StatusCode::BAD_REQUEST;
    }
    db.write().await.display = body;
    StatusCode::OK
}
