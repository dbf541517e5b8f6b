use crate::models::pix::Charge;
use crate::settings;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sqlx::SqlitePool;
use uuid::Uuid;

pub mod brcode;

// Everything encodeURIComponent leaves bare
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub struct PixRepository {
    encoder: brcode::BrCodeEncoder,
    qr_endpoint: String,
    conn: SqlitePool,
}

impl PixRepository {
    pub fn new(pix: settings::Pix, conn: SqlitePool) -> Self {
        let encoder =
            brcode::BrCodeEncoder::new(pix.key, pix.merchant_name, pix.merchant_city);

        PixRepository {
            encoder,
            qr_endpoint: pix.qr_endpoint,
            conn,
        }
    }

    pub async fn new_charge(
        &self,
        sale_id: Option<&str>,
        amount_in_cents: i64,
        tx_id: &str,
    ) -> Result<Charge, anyhow::Error> {
        let qr_copy_paste = self.encoder.charge(amount_in_cents, tx_id);
        let qr_image_url = format!(
            "{}?size=200x200&data={}",
            self.qr_endpoint,
            utf8_percent_encode(&qr_copy_paste, URI_COMPONENT)
        );
        let charge = Charge {
            id: Uuid::new_v4().hyphenated().to_string(),
            sale_id: sale_id.map(str::to_string),
            amount_in_cents,
            qr_copy_paste,
            qr_image_url,
            created_at: chrono::Utc::now().naive_utc(),
        };

        sqlx::query(
            r#"
            INSERT INTO pix_charges
            (id, sale_id, amount_in_cents, qr_copy_paste, qr_image_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&charge.id)
        .bind(&charge.sale_id)
        .bind(charge.amount_in_cents)
        .bind(&charge.qr_copy_paste)
        .bind(&charge.qr_image_url)
        .bind(charge.created_at)
        .execute(&self.conn)
        .await?;

        Ok(charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database;
    use sqlx::sqlite::SqlitePoolOptions;

    fn pix_settings() -> settings::Pix {
        settings::Pix {
            key: "06614436120".to_string(),
            merchant_name: "TechyPrint 3D".to_string(),
            merchant_city: "Brasil".to_string(),
            qr_endpoint: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
        }
    }

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
    async fn charge_is_persisted() {
        let pool = test_pool().await;
        let repository = PixRepository::new(pix_settings(), pool.clone());

        let charge = repository
            .new_charge(Some("PED-12345"), 4590, brcode::DEFAULT_TX_ID)
            .await
            .unwrap();

        let stored = sqlx::query_as::<_, Charge>("SELECT * FROM pix_charges WHERE id = ?")
            .bind(&charge.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored.sale_id.as_deref(), Some("PED-12345"));
        assert_eq!(stored.qr_copy_paste, charge.qr_copy_paste);
    }

    #[tokio::test]
    async fn charge_payload_matches_encoder() {
        let repository = PixRepository::new(pix_settings(), test_pool().await);

        let charge = repository
            .new_charge(None, 4590, brcode::DEFAULT_TX_ID)
            .await
            .unwrap();

        assert_eq!(
            charge.qr_copy_paste,
            brcode::encode("06614436120", "TechyPrint 3D", "Brasil", 4590, "***")
        );
    }

    #[tokio::test]
    async fn qr_image_url_escapes_payload() {
        let repository = PixRepository::new(pix_settings(), test_pool().await);

        let charge = repository
            .new_charge(None, 4590, brcode::DEFAULT_TX_ID)
            .await
            .unwrap();

        assert!(charge
            .qr_image_url
            .starts_with("https://api.qrserver.com/v1/create-qr-code/?size=200x200&data="));
        // "TechyPrint 3D" carries a space, so the query must be escaped
        assert!(charge.qr_image_url.contains("TechyPrint%203D"));
        assert!(!charge.qr_image_url[charge.qr_image_url.find("data=").unwrap()..].contains(' '));
    }
}
