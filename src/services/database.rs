use crate::models::products::default_catalog;
use crate::repositories::products::ProductRepository;
use crate::repositories::settings::DEFAULT_HERO_IMAGE;
use sqlx::SqlitePool;

const TABLES: [&str; 6] = [
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        price_in_cents INTEGER NOT NULL,
        category TEXT NOT NULL,
        material TEXT NOT NULL,
        image_url TEXT NOT NULL,
        is_new INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales (
        id TEXT PRIMARY KEY,
        customer_email TEXT NOT NULL,
        total_in_cents INTEGER NOT NULL,
        items_count INTEGER NOT NULL,
        items_summary TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inquiries (
        id TEXT PRIMARY KEY,
        customer_email TEXT NOT NULL,
        customer_name TEXT,
        customer_contact TEXT,
        summary TEXT NOT NULL,
        full_history TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        email TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        phone TEXT NOT NULL,
        cep TEXT NOT NULL,
        address TEXT NOT NULL,
        password_hash TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pix_charges (
        id TEXT PRIMARY KEY,
        sale_id TEXT,
        amount_in_cents INTEGER NOT NULL,
        qr_copy_paste TEXT NOT NULL,
        qr_image_url TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL
    )
    "#,
];

pub async fn prepare(pool: &SqlitePool) -> Result<(), anyhow::Error> {
    for table in TABLES {
        sqlx::query(table).execute(pool).await?;
    }

    sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES ('hero_image', ?)")
        .bind(DEFAULT_HERO_IMAGE)
        .execute(pool)
        .await?;

    seed_catalog(pool).await?;

    Ok(())
}

async fn seed_catalog(pool: &SqlitePool) -> Result<(), anyhow::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let repository = ProductRepository::new(pool.clone());
    let catalog = default_catalog();
    let seeded = catalog.len();
    for product in catalog {
        repository.insert_product(&product).await?;
    }
    log::info!("Seeded empty catalog with {seeded} products.");

    Ok(())
}
