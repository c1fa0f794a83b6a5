//! Dashboard store trait and the SQLite implementation.

use crate::error::StoreResult;
use crate::repos::{DistrictRepo, PerformanceRepo, ResponseCacheRepo, StateSummaryRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined dashboard store trait.
#[async_trait]
pub trait DashboardStore:
    DistrictRepo + PerformanceRepo + StateSummaryRepo + ResponseCacheRepo + Send + Sync
{
    /// Create tables and indexes if they do not exist.
    async fn migrate(&self) -> StoreResult<()>;

    /// Check database connectivity.
    async fn health_check(&self) -> StoreResult<()>;
}

/// SQLite-based dashboard store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if needed) a SQLite database file and migrate it.
    pub async fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        // Single connection: concurrent request handlers and the cache writer
        // would otherwise contend for the write lock.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::debug!(path = %path.display(), "Opened SQLite store");
        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl DashboardStore for SqliteStore {
    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

mod sqlite_impl {
    use super::*;
    use crate::models::*;
    use time::OffsetDateTime;

    #[async_trait]
    impl DistrictRepo for SqliteStore {
        async fn upsert_district(&self, district: &DistrictRow) -> StoreResult<()> {
            sqlx::query(
                r#"
                INSERT INTO districts (district_code, district_name, hindi_name, state_code,
                                       state_name, latitude, longitude, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(district_code) DO UPDATE SET
                    district_name = excluded.district_name,
                    hindi_name = excluded.hindi_name,
                    state_code = excluded.state_code,
                    state_name = excluded.state_name,
                    latitude = excluded.latitude,
                    longitude = excluded.longitude,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(&district.district_code)
            .bind(&district.district_name)
            .bind(&district.hindi_name)
            .bind(&district.state_code)
            .bind(&district.state_name)
            .bind(district.latitude)
            .bind(district.longitude)
            .bind(district.created_at)
            .bind(district.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_district(&self, code: &str) -> StoreResult<Option<DistrictRow>> {
            let row =
                sqlx::query_as::<_, DistrictRow>("SELECT * FROM districts WHERE district_code = ?")
                    .bind(code)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(row)
        }

        async fn list_districts(&self) -> StoreResult<Vec<DistrictRow>> {
            let rows = sqlx::query_as::<_, DistrictRow>(
                "SELECT * FROM districts ORDER BY district_name, district_code",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn count_districts(&self) -> StoreResult<i64> {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM districts")
                .fetch_one(&self.pool)
                .await?;
            Ok(count)
        }
    }

    #[async_trait]
    impl PerformanceRepo for SqliteStore {
        async fn upsert_performance(&self, record: &PerformanceRow) -> StoreResult<()> {
            sqlx::query(
                r#"
                INSERT INTO performance (
                    district_code, district_name, hindi_name, financial_year, month, period,
                    total_job_cards, households_employed, person_days_generated,
                    avg_days_per_household, total_expenditure, wage_expenditure,
                    material_expenditure, total_works, completed_works, ongoing_works,
                    percentage_women, sc_persons_worked, st_persons_worked,
                    data_source, last_updated
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(district_code, period) DO UPDATE SET
                    district_name = excluded.district_name,
                    hindi_name = excluded.hindi_name,
                    financial_year = excluded.financial_year,
                    month = excluded.month,
                    total_job_cards = excluded.total_job_cards,
                    households_employed = excluded.households_employed,
                    person_days_generated = excluded.person_days_generated,
                    avg_days_per_household = excluded.avg_days_per_household,
                    total_expenditure = excluded.total_expenditure,
                    wage_expenditure = excluded.wage_expenditure,
                    material_expenditure = excluded.material_expenditure,
                    total_works = excluded.total_works,
                    completed_works = excluded.completed_works,
                    ongoing_works = excluded.ongoing_works,
                    percentage_women = excluded.percentage_women,
                    sc_persons_worked = excluded.sc_persons_worked,
                    st_persons_worked = excluded.st_persons_worked,
                    data_source = excluded.data_source,
                    last_updated = excluded.last_updated
                "#,
            )
            .bind(&record.district_code)
            .bind(&record.district_name)
            .bind(&record.hindi_name)
            .bind(&record.financial_year)
            .bind(&record.month)
            .bind(record.period)
            .bind(record.total_job_cards)
            .bind(record.households_employed)
            .bind(record.person_days_generated)
            .bind(record.avg_days_per_household)
            .bind(record.total_expenditure)
            .bind(record.wage_expenditure)
            .bind(record.material_expenditure)
            .bind(record.total_works)
            .bind(record.completed_works)
            .bind(record.ongoing_works)
            .bind(record.percentage_women)
            .bind(record.sc_persons_worked)
            .bind(record.st_persons_worked)
            .bind(&record.data_source)
            .bind(record.last_updated)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_latest_performance(&self, code: &str) -> StoreResult<Option<PerformanceRow>> {
            let row = sqlx::query_as::<_, PerformanceRow>(
                "SELECT * FROM performance WHERE district_code = ? ORDER BY period DESC LIMIT 1",
            )
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_recent_performance(
            &self,
            code: &str,
            limit: u32,
        ) -> StoreResult<Vec<PerformanceRow>> {
            let rows = sqlx::query_as::<_, PerformanceRow>(
                "SELECT * FROM performance WHERE district_code = ? ORDER BY period DESC LIMIT ?",
            )
            .bind(code)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn get_latest_per_district(&self) -> StoreResult<Vec<PerformanceRow>> {
            let rows = sqlx::query_as::<_, PerformanceRow>(
                r#"
                SELECT * FROM (
                    SELECT p.*,
                           ROW_NUMBER() OVER (PARTITION BY district_code ORDER BY period DESC) AS rn
                    FROM performance p
                ) ranked
                WHERE rn = 1
                ORDER BY district_code
                "#,
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn list_all_performance(&self) -> StoreResult<Vec<PerformanceRow>> {
            let rows = sqlx::query_as::<_, PerformanceRow>(
                "SELECT * FROM performance ORDER BY district_code, period",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }
    }

    #[async_trait]
    impl StateSummaryRepo for SqliteStore {
        async fn upsert_state_summary(&self, summary: &StateSummaryRow) -> StoreResult<()> {
            sqlx::query(
                r#"
                INSERT INTO state_summaries (
                    state_name, state_code, financial_year, period, total_districts,
                    total_person_days, total_expenditure, total_works, completed_works,
                    avg_women_participation, last_updated
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(state_name, period) DO UPDATE SET
                    state_code = excluded.state_code,
                    financial_year = excluded.financial_year,
                    total_districts = excluded.total_districts,
                    total_person_days = excluded.total_person_days,
                    total_expenditure = excluded.total_expenditure,
                    total_works = excluded.total_works,
                    completed_works = excluded.completed_works,
                    avg_women_participation = excluded.avg_women_participation,
                    last_updated = excluded.last_updated
                "#,
            )
            .bind(&summary.state_name)
            .bind(&summary.state_code)
            .bind(&summary.financial_year)
            .bind(summary.period)
            .bind(summary.total_districts)
            .bind(summary.total_person_days)
            .bind(summary.total_expenditure)
            .bind(summary.total_works)
            .bind(summary.completed_works)
            .bind(summary.avg_women_participation)
            .bind(summary.last_updated)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_latest_state_summary(
            &self,
            state_name: &str,
        ) -> StoreResult<Option<StateSummaryRow>> {
            let row = sqlx::query_as::<_, StateSummaryRow>(
                "SELECT * FROM state_summaries WHERE state_name = ? ORDER BY period DESC LIMIT 1",
            )
            .bind(state_name)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }
    }

    #[async_trait]
    impl ResponseCacheRepo for SqliteStore {
        async fn get_cached_response(
            &self,
            key: &str,
            now: OffsetDateTime,
        ) -> StoreResult<Option<CacheEntryRow>> {
            let row = sqlx::query_as::<_, CacheEntryRow>(
                "SELECT * FROM api_cache WHERE cache_key = ? AND expires_at > ?",
            )
            .bind(key)
            .bind(now.unix_timestamp())
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn put_cached_response(
            &self,
            key: &str,
            payload: &str,
            expires_at: OffsetDateTime,
        ) -> StoreResult<()> {
            let now = OffsetDateTime::now_utc();
            sqlx::query(
                r#"
                INSERT INTO api_cache (cache_key, payload, expires_at, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(cache_key) DO UPDATE SET
                    payload = excluded.payload,
                    expires_at = excluded.expires_at,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(payload)
            .bind(expires_at.unix_timestamp())
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn delete_expired_cache_entries(&self, now: OffsetDateTime) -> StoreResult<u64> {
            let result = sqlx::query("DELETE FROM api_cache WHERE expires_at <= ?")
                .bind(now.unix_timestamp())
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        }
    }
}

/// SQL schema for SQLite.
const SCHEMA_SQL: &str = r#"
-- Districts
CREATE TABLE IF NOT EXISTS districts (
    district_code TEXT PRIMARY KEY,
    district_name TEXT NOT NULL,
    hindi_name TEXT NOT NULL DEFAULT '',
    state_code TEXT,
    state_name TEXT NOT NULL DEFAULT 'Rajasthan',
    latitude REAL NOT NULL DEFAULT 0,
    longitude REAL NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_districts_name ON districts(district_name);

-- Monthly performance, one row per district and period
CREATE TABLE IF NOT EXISTS performance (
    district_code TEXT NOT NULL,
    district_name TEXT NOT NULL,
    hindi_name TEXT,
    financial_year TEXT NOT NULL,
    month TEXT NOT NULL,
    period TEXT NOT NULL,
    total_job_cards INTEGER NOT NULL DEFAULT 0,
    households_employed INTEGER NOT NULL DEFAULT 0,
    person_days_generated INTEGER NOT NULL DEFAULT 0,
    avg_days_per_household REAL NOT NULL DEFAULT 0,
    total_expenditure INTEGER NOT NULL DEFAULT 0,
    wage_expenditure INTEGER NOT NULL DEFAULT 0,
    material_expenditure INTEGER NOT NULL DEFAULT 0,
    total_works INTEGER NOT NULL DEFAULT 0,
    completed_works INTEGER NOT NULL DEFAULT 0,
    ongoing_works INTEGER NOT NULL DEFAULT 0,
    percentage_women REAL NOT NULL DEFAULT 0,
    sc_persons_worked INTEGER NOT NULL DEFAULT 0,
    st_persons_worked INTEGER NOT NULL DEFAULT 0,
    data_source TEXT NOT NULL DEFAULT 'data.gov.in',
    last_updated TEXT NOT NULL,
    PRIMARY KEY (district_code, period)
);
CREATE INDEX IF NOT EXISTS idx_performance_period ON performance(period);

-- Precomputed state totals
CREATE TABLE IF NOT EXISTS state_summaries (
    state_name TEXT NOT NULL,
    state_code TEXT,
    financial_year TEXT NOT NULL,
    period TEXT NOT NULL,
    total_districts INTEGER NOT NULL DEFAULT 0,
    total_person_days INTEGER NOT NULL DEFAULT 0,
    total_expenditure INTEGER NOT NULL DEFAULT 0,
    total_works INTEGER NOT NULL DEFAULT 0,
    completed_works INTEGER NOT NULL DEFAULT 0,
    avg_women_participation REAL NOT NULL DEFAULT 0,
    last_updated TEXT NOT NULL,
    PRIMARY KEY (state_name, period)
);

-- Cached API responses
CREATE TABLE IF NOT EXISTS api_cache (
    cache_key TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    expires_at INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_api_cache_expires ON api_cache(expires_at);
"#;
