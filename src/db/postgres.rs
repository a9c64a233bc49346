use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::time::Duration;

use crate::models::{NewRecord, Record};
use crate::store::RecordStore;

#[derive(Clone)]
pub struct PostgresDb {
    pub pool: Pool<Postgres>,
}

impl PostgresDb {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self { pool })
    }

    pub async fn init_wallets_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS wallets (
                id BIGSERIAL PRIMARY KEY,
                user_id TEXT NOT NULL,
                address TEXT NOT NULL,
                balance DOUBLE PRECISION NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        tracing::info!("wallets table ready");
        Ok(())
    }

    /// All records for one requester, oldest first.
    pub async fn records_for_identifier(&self, identifier: &str) -> Result<Vec<Record>> {
        let rows: Vec<(i64, String, String, f64)> = sqlx::query_as(
            r#"
            SELECT id, user_id, address, balance
            FROM wallets
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(identifier)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, identifier, address, balance)| Record {
                id,
                identifier,
                address,
                balance,
            })
            .collect())
    }
}

#[async_trait]
impl RecordStore for PostgresDb {
    async fn append(&self, record: NewRecord) -> Result<Record> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO wallets (user_id, address, balance)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&record.identifier)
        .bind(&record.address)
        .bind(record.balance)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert wallet record")?;
        Ok(record.into_record(id))
    }

    async fn latest_balance(&self, address: &str) -> Result<Option<f64>> {
        let balance: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT balance
            FROM wallets
            WHERE lower(address) = lower($1)
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(balance)
    }
}
