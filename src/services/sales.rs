use super::pix::PixServiceRequest;
use super::{RequestHandler, Service, ServiceError};

use crate::models::sales::{Checkout, OrderItem, Sale};
use crate::repositories::pix::brcode;
use crate::repositories::products::ProductRepository;
use crate::repositories::sales::SaleRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::{mpsc, oneshot};

const SALE_STATUSES: [&str; 3] = ["pending", "completed", "cancelled"];

pub enum SaleServiceRequest {
    Checkout {
        customer_email: Option<String>,
        items: Vec<OrderItem>,
        response: oneshot::Sender<Result<Checkout, ServiceError>>,
    },
    List {
        customer_email: Option<String>,
        response: oneshot::Sender<Result<Vec<Sale>, ServiceError>>,
    },
    UpdateStatus {
        id: String,
        status: String,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
}

#[derive(Clone)]
pub struct SaleRequestHandler {
    repository: SaleRepository,
    products: ProductRepository,
    pix_channel: mpsc::Sender<PixServiceRequest>,
}

impl SaleRequestHandler {
    pub fn new(sql_conn: SqlitePool, pix_channel: mpsc::Sender<PixServiceRequest>) -> Self {
        SaleRequestHandler {
            repository: SaleRepository::new(sql_conn.clone()),
            products: ProductRepository::new(sql_conn),
            pix_channel,
        }
    }

    async fn checkout(
        &self,
        customer_email: Option<String>,
        items: Vec<OrderItem>,
    ) -> Result<Checkout, ServiceError> {
        if items.is_empty() {
            return Err(ServiceError::InvalidRequest("order has no items".to_string()));
        }

        let mut total_in_cents: i64 = 0;
        let mut items_count: i64 = 0;
        let mut summary = Vec::with_capacity(items.len());

        for item in &items {
            if item.quantity <= 0 {
                return Err(ServiceError::InvalidRequest(format!(
                    "invalid quantity for product {}",
                    item.product_id
                )));
            }

            let product = self
                .products
                .get_product(&item.product_id)
                .await
                .map_err(|e| ServiceError::Repository("Sales".to_string(), e.to_string()))?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("product {}", item.product_id))
                })?;

            total_in_cents += product.price_in_cents * item.quantity;
            items_count += item.quantity;
            summary.push(format!("{}x {}", item.quantity, product.name));
        }

        let customer = customer_email.unwrap_or_else(|| "Visitante".to_string());
        let sale = self
            .repository
            .record_sale(&customer, total_in_cents, items_count, &summary.join(", "))
            .await
            .map_err(|e| ServiceError::Repository("Sales".to_string(), e.to_string()))?;

        let (pix_tx, pix_rx) = oneshot::channel();
        self.pix_channel
            .send(PixServiceRequest::CreateCharge {
                sale_id: Some(sale.id.clone()),
                amount_in_cents: sale.total_in_cents,
                tx_id: brcode::DEFAULT_TX_ID.to_string(),
                response: pix_tx,
            })
            .await
            .map_err(|e| {
                ServiceError::Communication("SaleService".to_string(), e.to_string())
            })?;

        let charge = pix_rx
            .await
            .map_err(|e| {
                ServiceError::Communication("SaleService".to_string(), e.to_string())
            })??;

        Ok(Checkout { sale, charge })
    }

    async fn list_sales(&self, customer_email: Option<String>) -> Result<Vec<Sale>, ServiceError> {
        self.repository
            .get_sales(customer_email.as_deref())
            .await
            .map_err(|e| ServiceError::Repository("Sales".to_string(), e.to_string()))
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<(), ServiceError> {
        if !SALE_STATUSES.contains(&status) {
            return Err(ServiceError::InvalidRequest(format!(
                "unknown sale status {status}"
            )));
        }

        self.repository
            .update_sale_status(id, status)
            .await
            .map_err(|e| ServiceError::NotFound(e.to_string()))
    }
}

#[async_trait]
impl RequestHandler<SaleServiceRequest> for SaleRequestHandler {
    async fn handle_request(&self, request: SaleServiceRequest) {
        match request {
            SaleServiceRequest::Checkout {
                customer_email,
                items,
                response,
            } => {
                let checkout = self.checkout(customer_email, items).await;
                let _ = response.send(checkout);
            }
            SaleServiceRequest::List {
                customer_email,
                response,
            } => {
                let sales = self.list_sales(customer_email).await;
                let _ = response.send(sales);
            }
            SaleServiceRequest::UpdateStatus {
                id,
                status,
                response,
            } => {
                let result = self.update_status(&id, &status).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct SaleService;

impl SaleService {
    pub fn new() -> Self {
        SaleService {}
    }
}

impl Service<SaleServiceRequest, SaleRequestHandler> for SaleService {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database;
    use crate::services::pix::{PixRequestHandler, PixService};
    use crate::settings;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        database::prepare(&pool).await.unwrap();
        pool
    }

    fn pix_settings() -> settings::Pix {
        settings::Pix {
            key: "06614436120".to_string(),
            merchant_name: "TechyPrint 3D".to_string(),
            merchant_city: "Brasil".to_string(),
            qr_endpoint: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
        }
    }

    async fn sale_handler(pool: SqlitePool) -> SaleRequestHandler {
        let (pix_tx, mut pix_rx) = mpsc::channel(16);
        let mut pix_service = PixService::new();
        let pix_handler = PixRequestHandler::new(pix_settings(), pool.clone());
        tokio::spawn(async move {
            pix_service.run(pix_handler, &mut pix_rx).await;
        });

        SaleRequestHandler::new(pool, pix_tx)
    }

    #[tokio::test]
    async fn checkout_prices_items_and_charges_total() {
        let handler = sale_handler(test_pool().await).await;

        let items = vec![
            OrderItem {
                product_id: "1".to_string(),
                quantity: 2,
            },
            OrderItem {
                product_id: "4".to_string(),
                quantity: 1,
            },
        ];
        let checkout = handler
            .checkout(Some("ana@exemplo.com".to_string()), items)
            .await
            .unwrap();

        // 2 x 45.90 + 1 x 22.00
        assert_eq!(checkout.sale.total_in_cents, 11380);
        assert_eq!(checkout.sale.items_count, 3);
        assert_eq!(
            checkout.sale.items_summary,
            "2x Dragão Articulado Crystal, 1x Organizador de Cabos Hex"
        );
        assert_eq!(checkout.charge.sale_id, Some(checkout.sale.id.clone()));
        assert!(checkout.charge.qr_copy_paste.contains("5406113.80"));
    }

    #[tokio::test]
    async fn checkout_defaults_anonymous_customer() {
        let handler = sale_handler(test_pool().await).await;

        let items = vec![OrderItem {
            product_id: "3".to_string(),
            quantity: 1,
        }];
        let checkout = handler.checkout(None, items).await.unwrap();
        assert_eq!(checkout.sale.customer_email, "Visitante");
    }

    #[tokio::test]
    async fn checkout_rejects_empty_and_unknown_orders() {
        let handler = sale_handler(test_pool().await).await;

        let empty = handler
            .checkout(Some("ana@exemplo.com".to_string()), vec![])
            .await;
        assert!(matches!(empty, Err(ServiceError::InvalidRequest(_))));

        let unknown = handler
            .checkout(
                Some("ana@exemplo.com".to_string()),
                vec![OrderItem {
                    product_id: "ghost".to_string(),
                    quantity: 1,
                }],
            )
            .await;
        assert!(matches!(unknown, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_status_validates_value() {
        let handler = sale_handler(test_pool().await).await;

        let result = handler.update_status("PED-12345", "shipped").await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }
}
