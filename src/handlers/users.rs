use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::DeleteForm;

pub async fn delete_user(
    State(state): State<AppState>,
    body: Option<Json<DeleteForm>>,
) -> AppResult<Json<Value>> {
    let form = body.map(|Json(form)| form).unwrap_or_default();
    let username = form
        .username()
        .ok_or_else(|| AppError::Validation("Username is required".into()))?;

    let _write = state.write_lock.lock().await;
    let mut users = state.store.load();

    if users.remove(&username).is_none() {
        tracing::debug!("Delete requested for unknown user: {}", username);
        return Err(AppError::NotFound("User not found".into()));
    }

    if !state.store.save(&users) {
        tracing::error!("Failed to persist deletion of {}", username);
        return Err(AppError::Persistence("Failed to delete user".into()));
    }

    tracing::info!("Deleted user: {}", username);
    Ok(Json(json!({
        "ok": true,
        "message": format!("User '{}' deleted successfully", username),
    })))
}

pub async fn list_users(State(state): State<AppState>) -> Json<Value> {
    let users = state.store.load();
    Json(json!({ "users": users.usernames() }))
}
