use sqlx::SqlitePool;

const HERO_KEY: &str = "hero_image";

pub const DEFAULT_HERO_IMAGE: &str = "https://picsum.photos/1000/800?grayscale";

/// Key/value storefront settings; currently only the hero image lives here.
#[derive(Clone)]
pub struct SettingsRepository {
    conn: SqlitePool,
}

impl SettingsRepository {
    pub fn new(conn: SqlitePool) -> Self {
        SettingsRepository { conn }
    }

    pub async fn get_hero_image(&self) -> Result<String, anyhow::Error> {
        let value =
            sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
                .bind(HERO_KEY)
                .fetch_optional(&self.conn)
                .await?;

        Ok(value.unwrap_or_else(|| DEFAULT_HERO_IMAGE.to_string()))
    }

    pub async fn set_hero_image(&self, url: &str) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(HERO_KEY)
        .bind(url)
        .execute(&self.conn)
        .await?;

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

    #[tokio::test]
    async fn hero_defaults_until_set() {
        let repository = SettingsRepository::new(test_pool().await);

        assert_eq!(
            repository.get_hero_image().await.unwrap(),
            DEFAULT_HERO_IMAGE
        );

        repository
            .set_hero_image("https://cdn.techyprint.com.br/capa.png")
            .await
            .unwrap();
        assert_eq!(
            repository.get_hero_image().await.unwrap(),
            "https://cdn.techyprint.com.br/capa.png"
        );
    }
}
