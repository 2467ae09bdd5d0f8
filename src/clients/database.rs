use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, error, info};

use crate::{config::Config, models::user::UserRecord};

/// Relational store for user records, keyed by document number.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &UserRecord) -> Result<(), Error>;
    async fn find_by_document(&self, document_number: &str) -> Result<Option<UserRecord>, Error>;
    async fn delete_by_document(&self, document_number: &str) -> Result<u64, Error>;
}

pub struct PostgresUserStore {
    client: tokio_postgres::Client,
}

const USER_COLUMNS: &str =
    "id, document_type, document_number, name, email, phone, country, department, city, address";

impl PostgresUserStore {
    pub async fn connect(config: &Config) -> Result<Self, Error> {
        info!(host = %config.db_host, database = %config.db_name, "Connecting to PostgreSQL");

        let (client, connection) = tokio_postgres::Config::new()
            .host(&config.db_host)
            .dbname(&config.db_name)
            .user(&config.db_user)
            .password(&config.db_password)
            .connect(NoTls)
            .await
            .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "Database connection terminated");
            }
        });

        info!("PostgreSQL connection established");

        Ok(Self { client })
    }

    /// Creates the users table when missing, in place of an external
    /// migration step.
    pub async fn ensure_schema(&self) -> Result<(), Error> {
        self.client
            .batch_execute(
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    document_type TEXT,
                    document_number TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    phone TEXT,
                    country TEXT,
                    department TEXT,
                    city TEXT,
                    address TEXT,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )
                "#,
            )
            .await
            .map_err(|e| anyhow!("Failed to synchronize database schema: {}", e))?;

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), Error> {
        self.client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| anyhow!("Database health check failed: {}", e))?;

        Ok(())
    }
}

fn row_to_user(row: &Row) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        document_type: row.get("document_type"),
        document_number: row.get("document_number"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        country: row.get("country"),
        department: row.get("department"),
        city: row.get("city"),
        address: row.get("address"),
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert(&self, user: &UserRecord) -> Result<(), Error> {
        self.client
            .execute(
                "INSERT INTO users \
                 (id, document_type, document_number, name, email, phone, country, department, city, address) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
                &[
                    &user.id,
                    &user.document_type,
                    &user.document_number,
                    &user.name,
                    &user.email,
                    &user.phone,
                    &user.country,
                    &user.department,
                    &user.city,
                    &user.address,
                ],
            )
            .await
            .map_err(|e| anyhow!("Failed to insert user: {}", e))?;

        debug!(user_id = %user.id, "User row inserted");

        Ok(())
    }

    async fn find_by_document(&self, document_number: &str) -> Result<Option<UserRecord>, Error> {
        let row = self
            .client
            .query_opt(
                &format!("SELECT {} FROM users WHERE document_number = $1", USER_COLUMNS),
                &[&document_number],
            )
            .await
            .map_err(|e| anyhow!("Failed to look up user: {}", e))?;

        Ok(row.map(|row| row_to_user(&row)))
    }

    async fn delete_by_document(&self, document_number: &str) -> Result<u64, Error> {
        let deleted = self
            .client
            .execute(
                "DELETE FROM users WHERE document_number = $1",
                &[&document_number],
            )
            .await
            .map_err(|e| anyhow!("Failed to delete user: {}", e))?;

        debug!(document_number, rows = deleted, "User rows deleted");

        Ok(deleted)
    }
}
