use crate::models::users::UserProfile;
use anyhow::bail;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserRepository {
    conn: SqlitePool,
}

impl UserRepository {
    pub fn new(conn: SqlitePool) -> Self {
        UserRepository { conn }
    }

    pub async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserProfile>, anyhow::Error> {
        let user = sqlx::query_as::<_, UserProfile>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.conn)
            .await?;

        Ok(user)
    }

    pub async fn insert_user(&self, user: &UserProfile) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (email, name, phone, cep, address, password_hash)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.cep)
        .bind(&user.address)
        .bind(&user.password_hash)
        .execute(&self.conn)
        .await?;

        Ok(())
    }

    pub async fn update_user(&self, user: &UserProfile) -> Result<(), anyhow::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, phone = ?, cep = ?, address = ?, password_hash = ?
            WHERE email = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.cep)
        .bind(&user.address)
        .bind(&user.password_hash)
        .bind(&user.email)
        .execute(&self.conn)
        .await?;

        if result.rows_affected() == 0 {
            bail!("User not found")
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn sample_user() -> UserProfile {
        UserProfile {
            email: "ana@exemplo.com".to_string(),
            name: "Ana".to_string(),
            phone: "+55 11 99999-0000".to_string(),
            cep: "01310-100".to_string(),
            address: "Av. Paulista, 1000".to_string(),
            password_hash: "digest".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_fetch_user() {
        let repository = UserRepository::new(test_pool().await);

        repository.insert_user(&sample_user()).await.unwrap();

        let user = repository
            .get_user_by_email("ana@exemplo.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name, "Ana");

        assert!(repository
            .get_user_by_email("ninguem@exemplo.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_rewrites_profile() {
        let repository = UserRepository::new(test_pool().await);

        repository.insert_user(&sample_user()).await.unwrap();

        let mut user = sample_user();
        user.address = "Rua Augusta, 500".to_string();
        repository.update_user(&user).await.unwrap();

        let stored = repository
            .get_user_by_email("ana@exemplo.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.address, "Rua Augusta, 500");

        let mut ghost = sample_user();
        ghost.email = "ninguem@exemplo.com".to_string();
        assert!(repository.update_user(&ghost).await.is_err());
    }
}
