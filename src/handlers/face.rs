use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use crate::app::AppState;
use crate::errors::AppResult;
use crate::matching::find_closest;
use crate::models::{EnrollForm, MatchForm, UserRecord};

fn missing() -> Json<Value> {
    Json(json!({ "ok": false, "error": "missing" }))
}

#[axum::debug_handler]
pub async fn enroll(
    State(state): State<AppState>,
    body: Option<Json<EnrollForm>>,
) -> Json<Value> {
    let form = body.map(|Json(form)| form).unwrap_or_default();
    let Some((username, descriptor)) = form.into_parts() else {
        tracing::debug!("Enroll request without username or descriptor");
        return missing();
    };

    let _write = state.write_lock.lock().await;
    let mut users = state.store.load();

    // The same face must not end up registered under two names.
    match find_closest(&descriptor, &users) {
        Ok(closest) => {
            if let Some(existing) = closest.username.as_deref() {
                if closest.within(state.matching.duplicate_threshold) && existing != username {
                    tracing::info!(
                        "Rejecting enrollment of {}: face already enrolled as {} (distance {})",
                        username,
                        existing,
                        closest.distance
                    );
                    return Json(json!({
                        "ok": false,
                        "error": "already_enrolled",
                        "username": existing,
                        "distance": closest.distance,
                    }));
                }
            }
        }
        Err(e) => {
            tracing::warn!("Skipping duplicate check for {}: {}", username, e);
        }
    }

    users.upsert(username.clone(), UserRecord { descriptor });
    if state.store.save(&users) {
        tracing::info!("Enrolled user: {}", username);
    } else {
        tracing::warn!("Enrollment of {} was not persisted", username);
    }

    Json(json!({ "ok": true }))
}

pub async fn match_descriptor(
    State(state): State<AppState>,
    body: Option<Json<MatchForm>>,
) -> AppResult<Json<Value>> {
    let form = body.map(|Json(form)| form).unwrap_or_default();
    let Some(descriptor) = form.descriptor else {
        tracing::debug!("Match request without descriptor");
        return Ok(missing());
    };

    let users = state.store.load();
    let closest = find_closest(&descriptor, &users).map_err(|e| {
        tracing::warn!("Match failed: {}", e);
        e
    })?;

    if closest.within(state.matching.match_threshold) {
        tracing::debug!("Matched {:?} at distance {}", closest.username, closest.distance);
        return Ok(Json(json!({
            "ok": true,
            "username": closest.username,
            "distance": closest.distance,
        })));
    }

    tracing::debug!("No match; closest {:?} at distance {}", closest.username, closest.distance);
    let distance = closest.wire_distance();
    Ok(Json(json!({
        "ok": false,
        "closest": closest.username,
        "distance": distance,
    })))
}
