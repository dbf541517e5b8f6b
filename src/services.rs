use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::mpsc;

use crate::settings::Settings;

pub mod database;
mod http;
mod inquiries;
mod pix;
mod products;
mod sales;
mod users;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Repository error: {0} - {1}")]
    Repository(String, String),
    #[error("Communication error: {0} - {1}")]
    Communication(String, String),
}

#[async_trait]
pub trait RequestHandler<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    async fn handle_request(&self, request: T);
}

#[async_trait]
pub trait Service<T, H>: Send + Sync + 'static
where
    T: Send + 'static,
    H: RequestHandler<T> + Clone + Send,
{
    async fn run(&mut self, handler: H, receiver: &mut mpsc::Receiver<T>) {
        while let Some(request) = receiver.recv().await {
            let handler = handler.clone();

            tokio::spawn(async move {
                handler.handle_request(request).await;
            });
        }
    }
}

pub async fn start_services(pool: SqlitePool, settings: Settings) -> Result<(), anyhow::Error> {
    database::prepare(&pool).await?;

    let (product_tx, mut product_rx) = mpsc::channel(512);
    let (sale_tx, mut sale_rx) = mpsc::channel(512);
    let (inquiry_tx, mut inquiry_rx) = mpsc::channel(512);
    let (user_tx, mut user_rx) = mpsc::channel(512);
    let (pix_tx, mut pix_rx) = mpsc::channel(512);

    let mut product_service = products::ProductService::new();
    let mut sale_service = sales::SaleService::new();
    let mut inquiry_service = inquiries::InquiryService::new();
    let mut user_service = users::UserService::new();
    let mut pix_service = pix::PixService::new();

    println!("[*] Starting catalog service.");
    let product_pool = pool.clone();
    tokio::spawn(async move {
        product_service
            .run(
                products::ProductRequestHandler::new(product_pool),
                &mut product_rx,
            )
            .await;
    });

    println!("[*] Starting Pix service.");
    let pix_pool = pool.clone();
    let pix_settings = settings.pix.clone();
    tokio::spawn(async move {
        pix_service
            .run(
                pix::PixRequestHandler::new(pix_settings, pix_pool),
                &mut pix_rx,
            )
            .await;
    });

    println!("[*] Starting sales service.");
    let sale_pool = pool.clone();
    let sale_pix_tx = pix_tx.clone();
    tokio::spawn(async move {
        sale_service
            .run(
                sales::SaleRequestHandler::new(sale_pool, sale_pix_tx),
                &mut sale_rx,
            )
            .await;
    });

    println!("[*] Starting inquiry service.");
    let inquiry_pool = pool.clone();
    tokio::spawn(async move {
        inquiry_service
            .run(
                inquiries::InquiryRequestHandler::new(inquiry_pool),
                &mut inquiry_rx,
            )
            .await;
    });

    println!("[*] Starting user service.");
    let user_pool = pool.clone();
    let admin = settings.admin.clone();
    tokio::spawn(async move {
        user_service
            .run(users::UserRequestHandler::new(user_pool, admin), &mut user_rx)
            .await;
    });

    println!("[*] Starting HTTP server.");
    http::start_http_server(
        &settings.server.listen,
        product_tx,
        sale_tx,
        inquiry_tx,
        user_tx,
        pix_tx,
    )
    .await?;

    Ok(())
}
