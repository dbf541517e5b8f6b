use crate::models::sales::Sale;
use anyhow::bail;
use rand::Rng;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SaleRepository {
    conn: SqlitePool,
}

impl SaleRepository {
    pub fn new(conn: SqlitePool) -> Self {
        SaleRepository { conn }
    }

    pub async fn record_sale(
        &self,
        customer_email: &str,
        total_in_cents: i64,
        items_count: i64,
        items_summary: &str,
    ) -> Result<Sale, anyhow::Error> {
        // Five-digit order numbers, the format customers see on receipts
        let order_number: u32 = rand::thread_rng().gen_range(10_000..100_000);
        let sale = Sale {
            id: format!("PED-{order_number}"),
            customer_email: customer_email.to_string(),
            total_in_cents,
            items_count,
            items_summary: items_summary.to_string(),
            status: "pending".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        sqlx::query(
            r#"
            INSERT INTO sales
            (id, customer_email, total_in_cents, items_count, items_summary, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_email)
        .bind(sale.total_in_cents)
        .bind(sale.items_count)
        .bind(&sale.items_summary)
        .bind(&sale.status)
        .bind(sale.created_at)
        .execute(&self.conn)
        .await?;

        Ok(sale)
    }

    pub async fn get_sales(
        &self,
        customer_email: Option<&str>,
    ) -> Result<Vec<Sale>, anyhow::Error> {
        let sales = match customer_email {
            Some(email) => {
                sqlx::query_as::<_, Sale>(
                    "SELECT * FROM sales WHERE customer_email = ? ORDER BY created_at DESC",
                )
                .bind(email)
                .fetch_all(&self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY created_at DESC")
                    .fetch_all(&self.conn)
                    .await?
            }
        };

        Ok(sales)
    }

    pub async fn update_sale_status(&self, id: &str, status: &str) -> Result<(), anyhow::Error> {
        let result = sqlx::query("UPDATE sales SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.conn)
            .await?;

        if result.rows_affected() == 0 {
            bail!("Sale not found")
        }

        Ok(())
    }
}
