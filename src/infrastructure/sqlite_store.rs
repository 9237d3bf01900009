// SQLite repository implementation
use crate::application::reading_store::{ReadingStore, StoreError};
use crate::domain::sensor::{SensorSubmission, StoredReading};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS sensor_readings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pm25 REAL,
        no2 REAL,
        temperature REAL,
        humidity REAL,
        timestamp TEXT
    )";

const SELECT_COLUMNS: &str = "SELECT id, pm25, no2, temperature, humidity, timestamp FROM sensor_readings";

/// Process-wide store. The schema exists before the value is handed out, so
/// there is no window where requests can see an uninitialised table.
#[derive(Debug, Clone)]
pub struct SqliteReadingStore {
    pool: SqlitePool,
}

impl SqliteReadingStore {
    /// Open (creating if missing) the database at `url` and ensure the table exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::init(pool).await
    }

    /// Private in-memory database, used by tests and demos.
    pub async fn in_memory() -> Result<Self, StoreError> {
        // Every in-memory connection is its own database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        tracing::debug!("sensor_readings table ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ReadingStore for SqliteReadingStore {
    async fn append(&self, submission: &SensorSubmission) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO sensor_readings (pm25, no2, temperature, humidity, timestamp) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(submission.pm25)
        .bind(submission.no2)
        .bind(submission.temperature)
        .bind(submission.humidity)
        .bind(submission.timestamp.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn latest(&self) -> Result<Option<StoredReading>, StoreError> {
        let query = format!("{} ORDER BY timestamp DESC LIMIT 1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, StoredReading>(&query)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<StoredReading>, StoreError> {
        let query = format!("{} ORDER BY timestamp DESC LIMIT ?", SELECT_COLUMNS);
        let rows = sqlx::query_as::<_, StoredReading>(&query)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Loaded {} of at most {} sensor rows", rows.len(), limit);
        Ok(rows)
    }
}
