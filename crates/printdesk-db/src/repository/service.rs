//! # Service Repository
//!
//! Stores the [`AgentService`] projection: metadata, capability flags and
//! the active flag. Pricing rows are owned by
//! [`PricingRepository`](super::pricing::PricingRepository); `get` and
//! `list` stitch them back on.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::pricing::PricingRepository;
use printdesk_core::AgentService;

/// Column layout of the `services` table.
#[derive(Debug, FromRow)]
struct ServiceRow {
    id: String,
    name: String,
    category: Option<String>,
    sub_category: Option<String>,
    supports_color: bool,
    supports_front_back: bool,
    supports_print_cut: bool,
    is_active: bool,
}

impl ServiceRow {
    fn into_service(self) -> AgentService {
        AgentService {
            id: self.id,
            name: self.name,
            category: self.category,
            sub_category: self.sub_category,
            supports_color: self.supports_color,
            supports_front_back: self.supports_front_back,
            supports_print_cut: self.supports_print_cut,
            is_active: self.is_active,
            pricing_config: None,
        }
    }
}

const SELECT_SERVICE: &str = r#"
    SELECT
        id,
        name,
        category,
        sub_category,
        supports_color,
        supports_front_back,
        supports_print_cut,
        is_active
    FROM services
"#;

/// Repository for service rows.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ServiceRepository { pool }
    }

    /// Inserts a service's metadata.
    ///
    /// `pricing_config` is ignored; pricing is only written through a save.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - id already exists
    pub async fn insert(&self, service: &AgentService) -> DbResult<()> {
        debug!(id = %service.id, "Inserting service");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO services (
                id, name, category, sub_category,
                supports_color, supports_front_back, supports_print_cut,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(&service.category)
        .bind(&service.sub_category)
        .bind(service.supports_color)
        .bind(service.supports_front_back)
        .bind(service.supports_print_cut)
        .bind(service.is_active)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &service.id),
            other => other,
        })?;

        Ok(())
    }

    /// Gets a service with its stored pricing config, if any.
    pub async fn get(&self, id: &str) -> DbResult<Option<AgentService>> {
        let sql = format!("{} WHERE id = ?1", SELECT_SERVICE);
        let row: Option<ServiceRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.with_pricing(row).await?)),
            None => Ok(None),
        }
    }

    /// Lists every service, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<AgentService>> {
        let sql = format!("{} ORDER BY name, id", SELECT_SERVICE);
        let rows: Vec<ServiceRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        let mut services = Vec::with_capacity(rows.len());
        for row in rows {
            services.push(self.with_pricing(row).await?);
        }

        debug!(count = services.len(), "Listed services");
        Ok(services)
    }

    /// Sets the customer-facing flag.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no such service
    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        debug!(id = %id, active, "Setting service active flag");

        let result = sqlx::query("UPDATE services SET is_active = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", id));
        }

        Ok(())
    }

    /// When pricing was last saved, `None` if never.
    pub async fn pricing_saved_at(&self, id: &str) -> DbResult<Option<DateTime<Utc>>> {
        let saved: Option<Option<DateTime<Utc>>> =
            sqlx::query_scalar("SELECT pricing_saved_at FROM services WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        saved.ok_or_else(|| DbError::not_found("Service", id))
    }

    /// Counts services (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn with_pricing(&self, row: ServiceRow) -> DbResult<AgentService> {
        let mut service = row.into_service();
        service.pricing_config = PricingRepository::new(self.pool.clone())
            .load(&service.id)
            .await?;
        Ok(service)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
