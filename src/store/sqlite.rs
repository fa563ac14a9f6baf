//! SQLite-backed order store.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::StoreError;
use crate::models::{NewOrder, Order};
use crate::store::OrderStore;

const ORDER_COLUMNS: &str = "id, product, quantity, price, status, email_client";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    product: String,
    quantity: i64,
    price: f64,
    status: String,
    email_client: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(StoreError::CorruptRow)?;
        Ok(Self {
            id: row.id,
            product: row.product,
            quantity: row.quantity,
            price: row.price,
            status,
            email_client: row.email_client,
        })
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        e @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) => {
            StoreError::CorruptRow(e.to_string())
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

// == SQLite Order Store ==
#[derive(Debug, Clone)]
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`, creating the database file if needed.
    ///
    /// Every connection to `sqlite::memory:` gets its own private database,
    /// so in-memory URLs are always opened with a single connection.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        let max_connections = if url.contains(":memory:") {
            1
        } else {
            max_connections.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Self::new(pool))
    }

    /// Opens a fresh, migrated in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let store = Self::connect("sqlite::memory:", 1).await?;
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        info!("Order store migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let sql = format!(
            "INSERT INTO orders (product, quantity, price, status, email_client) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            ORDER_COLUMNS
        );

        let row: OrderRow = sqlx::query_as(&sql)
            .bind(order.product)
            .bind(order.quantity)
            .bind(order.price)
            .bind(order.status.as_str())
            .bind(order.email_client)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Order::try_from(row)
    }

    async fn query_all(&self) -> Result<Vec<Order>, StoreError> {
        let sql = format!("SELECT {} FROM orders ORDER BY id", ORDER_COLUMNS);

        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
