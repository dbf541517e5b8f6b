use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tokio::sync::oneshot;

use super::{channel_error, error_body, error_status, AppState};
use crate::models::pix::NewCharge;
use crate::repositories::pix::brcode;
use crate::services::pix::PixServiceRequest;

pub async fn create_charge(
    State(state): State<AppState>,
    Json(request): Json<NewCharge>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .pix_channel
        .send(PixServiceRequest::CreateCharge {
            sale_id: None,
            amount_in_cents: request.amount_in_cents,
            tx_id: request
                .tx_id
                .unwrap_or_else(|| brcode::DEFAULT_TX_ID.to_string()),
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(charge)) => (StatusCode::CREATED, Json(json!(charge))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}
