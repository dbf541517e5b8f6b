use crate::models::inquiries::{ChatInquiry, NewInquiry};
use anyhow::bail;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct InquiryRepository {
    conn: SqlitePool,
}

impl InquiryRepository {
    pub fn new(conn: SqlitePool) -> Self {
        InquiryRepository { conn }
    }

    pub async fn save_inquiry(&self, inquiry: NewInquiry) -> Result<ChatInquiry, anyhow::Error> {
        let inquiry = ChatInquiry {
            id: Uuid::new_v4().hyphenated().to_string(),
            customer_email: inquiry.customer_email,
            customer_name: inquiry.customer_name,
            customer_contact: inquiry.customer_contact,
            summary: inquiry.summary,
            full_history: Json(inquiry.full_history),
            status: "open".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        sqlx::query(
            r#"
            INSERT INTO inquiries
            (id, customer_email, customer_name, customer_contact, summary, full_history, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&inquiry.id)
        .bind(&inquiry.customer_email)
        .bind(&inquiry.customer_name)
        .bind(&inquiry.customer_contact)
        .bind(&inquiry.summary)
        .bind(&inquiry.full_history)
        .bind(&inquiry.status)
        .bind(inquiry.created_at)
        .execute(&self.conn)
        .await?;

        Ok(inquiry)
    }

    pub async fn get_inquiries(&self) -> Result<Vec<ChatInquiry>, anyhow::Error> {
        let inquiries =
            sqlx::query_as::<_, ChatInquiry>("SELECT * FROM inquiries ORDER BY created_at DESC")
                .fetch_all(&self.conn)
                .await?;

        Ok(inquiries)
    }

    pub async fn resolve_inquiry(&self, id: &str) -> Result<(), anyhow::Error> {
        let result = sqlx::query("UPDATE inquiries SET status = 'resolved' WHERE id = ?")
            .bind(id)
            .execute(&self.conn)
            .await?;

        if result.rows_affected() == 0 {
            bail!("Inquiry not found")
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inquiries::ChatMessage;
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

    fn sample_inquiry() -> NewInquiry {
        NewInquiry {
            customer_email: "ana@exemplo.com".to_string(),
            customer_name: Some("Ana".to_string()),
            customer_contact: Some("+55 11 99999-0000".to_string()),
            summary: "Orçamento para peça personalizada".to_string(),
            full_history: vec![
                ChatMessage {
                    id: "m1".to_string(),
                    role: "user".to_string(),
                    text: "Vocês imprimem peças sob medida?".to_string(),
                    timestamp: chrono::Utc::now(),
                    is_error: None,
                },
                ChatMessage {
                    id: "m2".to_string(),
                    role: "model".to_string(),
                    text: "Sim! Conte mais sobre o projeto.".to_string(),
                    timestamp: chrono::Utc::now(),
                    is_error: None,
                },
            ],
        }
    }

    #[tokio::test]
    async fn saves_inquiry_with_history() {
        let repository = InquiryRepository::new(test_pool().await);

        let saved = repository.save_inquiry(sample_inquiry()).await.unwrap();
        assert_eq!(saved.status, "open");

        let inquiries = repository.get_inquiries().await.unwrap();
        assert_eq!(inquiries.len(), 1);
        assert_eq!(inquiries[0].full_history.0.len(), 2);
        assert_eq!(inquiries[0].full_history.0[1].role, "model");
    }

    #[tokio::test]
    async fn resolve_marks_inquiry() {
        let repository = InquiryRepository::new(test_pool().await);

        let saved = repository.save_inquiry(sample_inquiry()).await.unwrap();
        repository.resolve_inquiry(&saved.id).await.unwrap();

        let inquiries = repository.get_inquiries().await.unwrap();
        assert_eq!(inquiries[0].status, "resolved");

        assert!(repository.resolve_inquiry("missing").await.is_err());
    }
}
