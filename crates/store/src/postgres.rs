//! PostgreSQL-based dashboard store implementation.

use crate::error::StoreResult;
use crate::models::*;
use crate::repos::{DistrictRepo, PerformanceRepo, ResponseCacheRepo, StateSummaryRepo};
use crate::store::DashboardStore;
use async_trait::async_trait;
use rozgar_core::config::PgSslMode;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode as SqlxPgSslMode};
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use time::OffsetDateTime;

/// PostgreSQL schema (embedded).
const POSTGRES_SCHEMA: &str = include_str!("postgres_schema.sql");

fn postgres_schema_statements(schema: &str) -> Vec<&str> {
    schema
        .split(';')
        .filter_map(|statement| {
            let trimmed = statement.trim();
            let has_sql = trimmed.lines().any(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with("--")
            });
            has_sql.then_some(trimmed)
        })
        .collect()
}

/// PostgreSQL-based dashboard store.
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection URL.
    pub async fn from_url(
        url: &str,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> StoreResult<Self> {
        let opts = PgConnectOptions::from_str(url)?;
        Self::connect(opts, max_connections, statement_timeout_ms).await
    }

    /// Create a new PostgreSQL store from individual connection parameters.
    #[allow(clippy::too_many_arguments)]
    pub async fn from_params(
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
        database: &str,
        ssl_mode: Option<PgSslMode>,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> StoreResult<Self> {
        let mut opts = PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(database);

        if let Some(user) = username {
            opts = opts.username(user);
        }

        if let Some(pass) = password {
            opts = opts.password(pass);
        }

        if let Some(mode) = ssl_mode {
            let sqlx_mode = match mode {
                PgSslMode::Disable => SqlxPgSslMode::Disable,
                PgSslMode::Prefer => SqlxPgSslMode::Prefer,
                PgSslMode::Require => SqlxPgSslMode::Require,
            };
            opts = opts.ssl_mode(sqlx_mode);
        }

        tracing::info!(
            host = host,
            port = port,
            database = database,
            username = username.unwrap_or("<none>"),
            ssl_mode = ?ssl_mode,
            "Connecting to PostgreSQL with individual parameters"
        );

        Self::connect(opts, max_connections, statement_timeout_ms).await
    }

    async fn connect(
        mut opts: PgConnectOptions,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> StoreResult<Self> {
        if let Some(timeout_ms) = statement_timeout_ms {
            opts = opts.options([("statement_timeout", format!("{}ms", timeout_ms))]);
            tracing::info!("PostgreSQL statement_timeout set to {}ms", timeout_ms);
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl DashboardStore for PostgresStore {
    async fn migrate(&self) -> StoreResult<()> {
        // Prepared statements cannot hold more than one command.
        for statement in postgres_schema_statements(POSTGRES_SCHEMA) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DistrictRepo for PostgresStore {
    async fn upsert_district(&self, district: &DistrictRow) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO districts (district_code, district_name, hindi_name, state_code,
                                   state_name, latitude, longitude, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT(district_code) DO UPDATE SET
                district_name = EXCLUDED.district_name,
                hindi_name = EXCLUDED.hindi_name,
                state_code = EXCLUDED.state_code,
                state_name = EXCLUDED.state_name,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                updated_at = EXCLUDED.updated_at
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
            sqlx::query_as::<_, DistrictRow>("SELECT * FROM districts WHERE district_code = $1")
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
impl PerformanceRepo for PostgresStore {
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
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21)
            ON CONFLICT(district_code, period) DO UPDATE SET
                district_name = EXCLUDED.district_name,
                hindi_name = EXCLUDED.hindi_name,
                financial_year = EXCLUDED.financial_year,
                month = EXCLUDED.month,
                total_job_cards = EXCLUDED.total_job_cards,
                households_employed = EXCLUDED.households_employed,
                person_days_generated = EXCLUDED.person_days_generated,
                avg_days_per_household = EXCLUDED.avg_days_per_household,
                total_expenditure = EXCLUDED.total_expenditure,
                wage_expenditure = EXCLUDED.wage_expenditure,
                material_expenditure = EXCLUDED.material_expenditure,
                total_works = EXCLUDED.total_works,
                completed_works = EXCLUDED.completed_works,
                ongoing_works = EXCLUDED.ongoing_works,
                percentage_women = EXCLUDED.percentage_women,
                sc_persons_worked = EXCLUDED.sc_persons_worked,
                st_persons_worked = EXCLUDED.st_persons_worked,
                data_source = EXCLUDED.data_source,
                last_updated = EXCLUDED.last_updated
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
            "SELECT * FROM performance WHERE district_code = $1 ORDER BY period DESC LIMIT 1",
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
            "SELECT * FROM performance WHERE district_code = $1 ORDER BY period DESC LIMIT $2",
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
            SELECT DISTINCT ON (district_code) *
            FROM performance
            ORDER BY district_code, period DESC
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
impl StateSummaryRepo for PostgresStore {
    async fn upsert_state_summary(&self, summary: &StateSummaryRow) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO state_summaries (
                state_name, state_code, financial_year, period, total_districts,
                total_person_days, total_expenditure, total_works, completed_works,
                avg_women_participation, last_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT(state_name, period) DO UPDATE SET
                state_code = EXCLUDED.state_code,
                financial_year = EXCLUDED.financial_year,
                total_districts = EXCLUDED.total_districts,
                total_person_days = EXCLUDED.total_person_days,
                total_expenditure = EXCLUDED.total_expenditure,
                total_works = EXCLUDED.total_works,
                completed_works = EXCLUDED.completed_works,
                avg_women_participation = EXCLUDED.avg_women_participation,
                last_updated = EXCLUDED.last_updated
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
            "SELECT * FROM state_summaries WHERE state_name = $1 ORDER BY period DESC LIMIT 1",
        )
        .bind(state_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl ResponseCacheRepo for PostgresStore {
    async fn get_cached_response(
        &self,
        key: &str,
        now: OffsetDateTime,
    ) -> StoreResult<Option<CacheEntryRow>> {
        let row = sqlx::query_as::<_, CacheEntryRow>(
            "SELECT * FROM api_cache WHERE cache_key = $1 AND expires_at > $2",
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
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT(cache_key) DO UPDATE SET
                payload = EXCLUDED.payload,
                expires_at = EXCLUDED.expires_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(expires_at.unix_timestamp())
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_expired_cache_entries(&self, now: OffsetDateTime) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM api_cache WHERE expires_at <= $1")
            .bind(now.unix_timestamp())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_splits_into_statements_without_comment_blocks() {
        let statements = postgres_schema_statements(POSTGRES_SCHEMA);
        assert!(
            statements
                .iter()
                .all(|s| s.lines().any(|l| !l.trim().starts_with("--")))
        );
        let tables = statements
            .iter()
            .filter(|s| s.contains("CREATE TABLE"))
            .count();
        assert_eq!(tables, 4);
    }
}
