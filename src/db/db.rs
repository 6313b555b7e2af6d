use sqlx::postgres::{PgPool, PgPoolOptions};

use std::time::Duration;

use crate::common::GeneralError;

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    /// Connects and applies pending migrations.
    pub async fn new(database_url: &str) -> Result<Self, GeneralError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}
