use super::{RequestHandler, Service, ServiceError};

use crate::models::pix;
use crate::repositories::pix::PixRepository;
use crate::settings;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::oneshot;

pub enum PixServiceRequest {
    CreateCharge {
        sale_id: Option<String>,
        amount_in_cents: i64,
        tx_id: String,
        response: oneshot::Sender<Result<pix::Charge, ServiceError>>,
    },
}

#[derive(Clone)]
pub struct PixRequestHandler {
    repository: Arc<PixRepository>,
}

impl PixRequestHandler {
    pub fn new(pix_settings: settings::Pix, pool: SqlitePool) -> Self {
        let repository = Arc::new(PixRepository::new(pix_settings, pool));

        PixRequestHandler { repository }
    }

    async fn create_charge(
        &self,
        sale_id: Option<&str>,
        amount_in_cents: i64,
        tx_id: &str,
    ) -> Result<pix::Charge, ServiceError> {
        self.repository
            .new_charge(sale_id, amount_in_cents, tx_id)
            .await
            .map_err(|e| ServiceError::Repository("Pix".to_string(), e.to_string()))
    }
}

#[async_trait]
impl RequestHandler<PixServiceRequest> for PixRequestHandler {
    async fn handle_request(&self, request: PixServiceRequest) {
        match request {
            PixServiceRequest::CreateCharge {
                sale_id,
                amount_in_cents,
                tx_id,
                response,
            } => {
                let charge = self
                    .create_charge(sale_id.as_deref(), amount_in_cents, &tx_id)
                    .await;
                let _ = response.send(charge);
            }
        }
    }
}

pub struct PixService;

impl PixService {
    pub fn new() -> Self {
        PixService {}
    }
}

impl Service<PixServiceRequest, PixRequestHandler> for PixService {}
