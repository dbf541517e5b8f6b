use super::{RequestHandler, Service, ServiceError};

use crate::models::products::{HeroImage, Product};
use crate::repositories::products::ProductRepository;
use crate::repositories::settings::SettingsRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::oneshot;
use uuid::Uuid;

pub enum ProductRequest {
    List {
        response: oneshot::Sender<Result<Vec<Product>, ServiceError>>,
    },
    Add {
        product: Product,
        response: oneshot::Sender<Result<Product, ServiceError>>,
    },
    Update {
        product: Product,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    GetHero {
        response: oneshot::Sender<Result<HeroImage, ServiceError>>,
    },
    SetHero {
        url: String,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
}

#[derive(Clone)]
pub struct ProductRequestHandler {
    repository: ProductRepository,
    settings: SettingsRepository,
}

impl ProductRequestHandler {
    pub fn new(sql_conn: SqlitePool) -> Self {
        ProductRequestHandler {
            repository: ProductRepository::new(sql_conn.clone()),
            settings: SettingsRepository::new(sql_conn),
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.repository
            .get_products()
            .await
            .map_err(|e| ServiceError::Repository("Catalog".to_string(), e.to_string()))
    }

    async fn add_product(&self, mut product: Product) -> Result<Product, ServiceError> {
        if product.id.is_empty() {
            product.id = Uuid::new_v4().hyphenated().to_string();
        }

        self.repository
            .insert_product(&product)
            .await
            .map_err(|e| ServiceError::Repository("Catalog".to_string(), e.to_string()))?;

        Ok(product)
    }

    async fn update_product(&self, product: Product) -> Result<(), ServiceError> {
        self.repository
            .update_product(&product)
            .await
            .map_err(|e| ServiceError::NotFound(e.to_string()))
    }

    async fn get_hero(&self) -> Result<HeroImage, ServiceError> {
        let url = self
            .settings
            .get_hero_image()
            .await
            .map_err(|e| ServiceError::Repository("Catalog".to_string(), e.to_string()))?;

        Ok(HeroImage { url })
    }

    async fn set_hero(&self, url: &str) -> Result<(), ServiceError> {
        self.settings
            .set_hero_image(url)
            .await
            .map_err(|e| ServiceError::Repository("Catalog".to_string(), e.to_string()))
    }
}

#[async_trait]
impl RequestHandler<ProductRequest> for ProductRequestHandler {
    async fn handle_request(&self, request: ProductRequest) {
        match request {
            ProductRequest::List { response } => {
                let products = self.list_products().await;
                let _ = response.send(products);
            }
            ProductRequest::Add { product, response } => {
                let product = self.add_product(product).await;
                let _ = response.send(product);
            }
            ProductRequest::Update { product, response } => {
                let result = self.update_product(product).await;
                let _ = response.send(result);
            }
            ProductRequest::GetHero { response } => {
                let hero = self.get_hero().await;
                let _ = response.send(hero);
            }
            ProductRequest::SetHero { url, response } => {
                let result = self.set_hero(&url).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct ProductService;

impl ProductService {
    pub fn new() -> Self {
        ProductService {}
    }
}

impl Service<ProductRequest, ProductRequestHandler> for ProductService {}
