use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;

use super::{channel_error, error_body, error_status, AppState};
use crate::models::sales::{NewOrder, StatusUpdate};
use crate::services::sales::SaleServiceRequest;

#[derive(Deserialize)]
pub struct SalesQuery {
    customer: Option<String>,
}

pub async fn checkout(
    State(state): State<AppState>,
    Json(order): Json<NewOrder>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .sale_channel
        .send(SaleServiceRequest::Checkout {
            customer_email: order.customer_email,
            items: order.items,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(checkout)) => (StatusCode::CREATED, Json(json!(checkout))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .sale_channel
        .send(SaleServiceRequest::List {
            customer_email: query.customer,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(sales)) => (StatusCode::OK, Json(json!(sales))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .sale_channel
        .send(SaleServiceRequest::UpdateStatus {
            id,
            status: update.status,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(())) => (StatusCode::OK, Json(json!({ "message": "Sale updated" }))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}
