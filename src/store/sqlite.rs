use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, instrument};

use super::ProductStore;
use crate::domain::{Product, ProductChanges, ProductCreate};
use crate::error::StoreError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    description TEXT,
    price       REAL    NOT NULL,
    available   BOOLEAN NOT NULL DEFAULT 1,
    created_at  TEXT    NOT NULL,
    updated_at  TEXT    NOT NULL
)";

const COLUMNS: &str = "id, name, description, price, available, created_at, updated_at";

/// Products table in SQLite, reached through a `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    /// Opens the pool and makes sure the products table exists.
    ///
    /// In-memory databases live only as long as their connection, so for
    /// those the pool is pinned to a single connection that never expires.
    #[instrument(skip(url))]
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self::from_pool(pool);
        store.migrate().await?;
        info!("Connected to product database");
        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn count_available(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE available = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn find_available_page(&self, offset: u64, limit: u32) -> Result<Vec<Product>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM products WHERE available = 1 ORDER BY id LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(i64::from(limit))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_available(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE id = ? AND available = 1");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, product: ProductCreate) -> Result<Product, StoreError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (name, description, price, available, created_at, updated_at) \
             VALUES (?, ?, ?, 1, ?, ?) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        debug!(product_id = row.id, "Inserted product row");
        Ok(row)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, StoreError> {
        let sql = format!(
            "UPDATE products SET \
             name = COALESCE(?, name), \
             price = COALESCE(?, price), \
             description = COALESCE(?, description), \
             updated_at = ? \
             WHERE id = ? RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(changes.name)
            .bind(changes.price)
            .bind(changes.description)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::RowNotFound(id))
    }

    async fn deactivate(&self, id: i64) -> Result<Product, StoreError> {
        let sql = format!(
            "UPDATE products SET available = 0, updated_at = ? WHERE id = ? RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::RowNotFound(id))
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Product database connection closed");
    }
}
