use crate::models::products::Product;
use anyhow::bail;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ProductRepository {
    conn: SqlitePool,
}

impl ProductRepository {
    pub fn new(conn: SqlitePool) -> Self {
        ProductRepository { conn }
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, anyhow::Error> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY rowid")
            .fetch_all(&self.conn)
            .await?;

        Ok(products)
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, anyhow::Error> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.conn)
            .await?;

        Ok(product)
    }

    pub async fn insert_product(&self, product: &Product) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO products
            (id, name, description, price_in_cents, category, material, image_url, is_new)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_in_cents)
        .bind(&product.category)
        .bind(&product.material)
        .bind(&product.image_url)
        .bind(product.is_new)
        .execute(&self.conn)
        .await?;

        Ok(())
    }

    pub async fn update_product(&self, product: &Product) -> Result<(), anyhow::Error> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price_in_cents = ?, category = ?,
                material = ?, image_url = ?, is_new = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_in_cents)
        .bind(&product.category)
        .bind(&product.material)
        .bind(&product.image_url)
        .bind(product.is_new)
        .bind(&product.id)
        .execute(&self.conn)
        .await?;

        if result.rows_affected() == 0 {
            bail!("Product not found")
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::products::default_catalog;
    use crate::services::database;
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

    #[tokio::test]
    async fn boot_seeds_default_catalog() {
        let repository = ProductRepository::new(test_pool().await);

        let products = repository.get_products().await.unwrap();
        assert_eq!(products.len(), default_catalog().len());
        assert_eq!(products[0].name, "Dragão Articulado Crystal");
        assert!(products[0].is_new);
    }

    #[tokio::test]
    async fn insert_and_fetch_product() {
        let repository = ProductRepository::new(test_pool().await);

        let mut product = default_catalog().remove(0);
        product.id = "custom-1".to_string();
        product.name = "Miniatura Golem".to_string();
        repository.insert_product(&product).await.unwrap();

        let stored = repository.get_product("custom-1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Miniatura Golem");
    }

    #[tokio::test]
    async fn update_changes_price() {
        let repository = ProductRepository::new(test_pool().await);

        let mut product = repository.get_product("1").await.unwrap().unwrap();
        product.price_in_cents = 4990;
        repository.update_product(&product).await.unwrap();

        let stored = repository.get_product("1").await.unwrap().unwrap();
        assert_eq!(stored.price_in_cents, 4990);
    }

    #[tokio::test]
    async fn update_missing_product_fails() {
        let repository = ProductRepository::new(test_pool().await);

        let mut product = default_catalog().remove(0);
        product.id = "ghost".to_string();
        assert!(repository.update_product(&product).await.is_err());
    }
}
