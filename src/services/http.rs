use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::inquiries::InquiryServiceRequest;
use super::pix::PixServiceRequest;
use super::products::ProductRequest;
use super::sales::SaleServiceRequest;
use super::users::UserRequest;
use super::ServiceError;

mod inquiries;
mod pix;
mod products;
mod sales;
mod users;

// The storefront uploads product and hero images as base64 blobs
const BODY_LIMIT: usize = 50 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    product_channel: mpsc::Sender<ProductRequest>,
    sale_channel: mpsc::Sender<SaleServiceRequest>,
    inquiry_channel: mpsc::Sender<InquiryServiceRequest>,
    user_channel: mpsc::Sender<UserRequest>,
    pix_channel: mpsc::Sender<PixServiceRequest>,
}

fn error_status(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(error: &ServiceError) -> Value {
    json!({ "description": error.to_string() })
}

fn channel_error(error: impl std::fmt::Display) -> (StatusCode, Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "description": format!("Failed to process request: {}", error) }),
    )
}

pub async fn start_http_server(
    listen: &str,
    product_channel: mpsc::Sender<ProductRequest>,
    sale_channel: mpsc::Sender<SaleServiceRequest>,
    inquiry_channel: mpsc::Sender<InquiryServiceRequest>,
    user_channel: mpsc::Sender<UserRequest>,
    pix_channel: mpsc::Sender<PixServiceRequest>,
) -> Result<(), anyhow::Error> {
    let app_state = AppState {
        product_channel,
        sale_channel,
        inquiry_channel,
        user_channel,
        pix_channel,
    };

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api/products",
            get(products::list_products).post(products::add_product),
        )
        .route("/api/products/{id}", put(products::update_product))
        .route(
            "/api/settings/hero",
            get(products::get_hero).post(products::set_hero),
        )
        .route("/api/checkout", post(sales::checkout))
        .route("/api/sales", get(sales::list_sales))
        .route("/api/sales/{id}/status", put(sales::update_status))
        .route(
            "/api/inquiries",
            get(inquiries::list_inquiries).post(inquiries::save_inquiry),
        )
        .route("/api/inquiries/{id}/resolve", put(inquiries::resolve_inquiry))
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
        .route(
            "/api/users/{email}",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/api/pix/charge", post(pix::create_charge))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(BODY_LIMIT));

    let listener = tokio::net::TcpListener::bind(listen).await?;
    println!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
