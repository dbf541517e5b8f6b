use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::sync::oneshot;

use super::{channel_error, error_body, error_status, AppState};
use crate::models::users::{Credentials, NewUser, ProfileUpdate};
use crate::services::users::UserRequest;

pub async fn register(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .user_channel
        .send(UserRequest::Register { user, response: tx })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(profile)) => (StatusCode::CREATED, Json(json!(profile))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .user_channel
        .send(UserRequest::Login {
            credentials,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(profile)) => (StatusCode::OK, Json(json!(profile))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .user_channel
        .send(UserRequest::GetProfile {
            email,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(Some(profile))) => (StatusCode::OK, Json(json!(profile))),
        Ok(Ok(None)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "description": "user not found" })),
        ),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .user_channel
        .send(UserRequest::UpdateProfile {
            email,
            update,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(profile)) => (StatusCode::OK, Json(json!(profile))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}
