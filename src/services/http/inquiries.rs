use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::sync::oneshot;

use super::{channel_error, error_body, error_status, AppState};
use crate::models::inquiries::NewInquiry;
use crate::services::inquiries::InquiryServiceRequest;

pub async fn save_inquiry(
    State(state): State<AppState>,
    Json(inquiry): Json<NewInquiry>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .inquiry_channel
        .send(InquiryServiceRequest::Save {
            inquiry,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(inquiry)) => (StatusCode::CREATED, Json(json!(inquiry))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn list_inquiries(State(state): State<AppState>) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .inquiry_channel
        .send(InquiryServiceRequest::List { response: tx })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(inquiries)) => (StatusCode::OK, Json(json!(inquiries))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn resolve_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .inquiry_channel
        .send(InquiryServiceRequest::Resolve { id, response: tx })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({ "message": "Inquiry resolved" })),
        ),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}
