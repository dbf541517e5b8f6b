use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::sync::oneshot;

use super::{channel_error, error_body, error_status, AppState};
use crate::models::products::{HeroImage, Product};
use crate::services::products::ProductRequest;

pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .product_channel
        .send(ProductRequest::List { response: tx })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(products)) => (StatusCode::OK, Json(json!(products))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn add_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .product_channel
        .send(ProductRequest::Add {
            product,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(product)) => (StatusCode::CREATED, Json(json!(product))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut product): Json<Product>,
) -> impl IntoResponse {
    product.id = id;

    let (tx, rx) = oneshot::channel();
    let sent = state
        .product_channel
        .send(ProductRequest::Update {
            product,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(())) => (StatusCode::OK, Json(json!({ "message": "Product updated" }))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn get_hero(State(state): State<AppState>) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .product_channel
        .send(ProductRequest::GetHero { response: tx })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(hero)) => (StatusCode::OK, Json(json!(hero))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}

pub async fn set_hero(
    State(state): State<AppState>,
    Json(hero): Json<HeroImage>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .product_channel
        .send(ProductRequest::SetHero {
            url: hero.url,
            response: tx,
        })
        .await;
    if let Err(e) = sent {
        let (status, body) = channel_error(e);
        return (status, Json(body));
    }

    match rx.await {
        Ok(Ok(())) => (StatusCode::OK, Json(json!({ "message": "Hero image updated" }))),
        Ok(Err(e)) => (error_status(&e), Json(error_body(&e))),
        Err(e) => {
            let (status, body) = channel_error(e);
            (status, Json(body))
        }
    }
}
