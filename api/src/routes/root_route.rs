//! GET / — welcome message.

use axum::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the AgriChatBot API" }))
}
