//! # Pricing Repository
//!
//! Reads and replaces a service's [`PricingConfig`].
//!
//! ## Replace Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  replace(service_id, config)            ONE TRANSACTION                 │
//! │                                                                         │
//! │  1. UPDATE services SET pricing_saved_at = now   (0 rows → NotFound)    │
//! │  2. DELETE child rows of the service (3 tables)                         │
//! │  3. INSERT every tier / option / spec with position = vec index         │
//! │  4. COMMIT                                                              │
//! │                                                                         │
//! │  Any failure rolls back: the previous config stays readable.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A service whose `pricing_saved_at` is NULL has never been saved and loads
//! as `None`. A saved config always loads, even with empty collections.

use chrono::Utc;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use printdesk_core::{
    BaseConfiguration, BaseKind, CustomSpecification, PricingConfig, PricingOption,
};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, FromRow)]
struct BaseRow {
    id: String,
    name: String,
    kind: BaseKind,
    unit_price_cents: i64,
    custom_value: Option<String>,
}

#[derive(Debug, FromRow)]
struct OptionRow {
    id: String,
    name: String,
    enabled: bool,
    is_default: bool,
    price_modifier_cents: i64,
}

#[derive(Debug, FromRow)]
struct SpecRow {
    id: String,
    name: String,
    price_modifier_cents: i64,
}

impl From<BaseRow> for BaseConfiguration {
    fn from(row: BaseRow) -> Self {
        BaseConfiguration {
            id: row.id,
            name: row.name,
            kind: row.kind,
            unit_price_cents: row.unit_price_cents,
            custom_value: row.custom_value,
        }
    }
}

impl From<OptionRow> for PricingOption {
    fn from(row: OptionRow) -> Self {
        PricingOption {
            id: row.id,
            name: row.name,
            enabled: row.enabled,
            is_default: row.is_default,
            price_modifier_cents: row.price_modifier_cents,
        }
    }
}

impl From<SpecRow> for CustomSpecification {
    fn from(row: SpecRow) -> Self {
        CustomSpecification {
            id: row.id,
            name: row.name,
            price_modifier_cents: row.price_modifier_cents,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for pricing rows.
#[derive(Debug, Clone)]
pub struct PricingRepository {
    pool: SqlitePool,
}

impl PricingRepository {
    /// Creates a new PricingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PricingRepository { pool }
    }

    /// Loads the saved config of a service.
    ///
    /// ## Returns
    /// * `Ok(Some(config))` - pricing has been saved at least once
    /// * `Ok(None)` - never saved, or no such service
    pub async fn load(&self, service_id: &str) -> DbResult<Option<PricingConfig>> {
        let saved: Option<Option<String>> =
            sqlx::query_scalar("SELECT pricing_saved_at FROM services WHERE id = ?1")
                .bind(service_id)
                .fetch_optional(&self.pool)
                .await?;

        if !matches!(saved, Some(Some(_))) {
            return Ok(None);
        }

        let base_configurations: Vec<BaseRow> = sqlx::query_as(
            r#"
            SELECT id, name, kind, unit_price_cents, custom_value
            FROM base_configurations
            WHERE service_id = ?1
            ORDER BY position
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        let options: Vec<OptionRow> = sqlx::query_as(
            r#"
            SELECT id, name, enabled, is_default, price_modifier_cents
            FROM pricing_options
            WHERE service_id = ?1
            ORDER BY position
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        let custom_specifications: Vec<SpecRow> = sqlx::query_as(
            r#"
            SELECT id, name, price_modifier_cents
            FROM custom_specifications
            WHERE service_id = ?1
            ORDER BY position
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            service_id,
            tiers = base_configurations.len(),
            options = options.len(),
            specs = custom_specifications.len(),
            "Loaded pricing config"
        );

        Ok(Some(PricingConfig {
            base_configurations: base_configurations.into_iter().map(Into::into).collect(),
            options: options.into_iter().map(Into::into).collect(),
            custom_specifications: custom_specifications.into_iter().map(Into::into).collect(),
        }))
    }

    /// Replaces the stored config of a service in one transaction.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no such service; nothing written
    pub async fn replace(&self, service_id: &str, config: &PricingConfig) -> DbResult<()> {
        debug!(service_id, "Replacing pricing config");

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let touched = sqlx::query(
            "UPDATE services SET pricing_saved_at = ?2, updated_at = ?2 WHERE id = ?1",
        )
        .bind(service_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if touched.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DbError::not_found("Service", service_id));
        }

        for table in ["base_configurations", "pricing_options", "custom_specifications"] {
            let sql = format!("DELETE FROM {} WHERE service_id = ?1", table);
            sqlx::query(&sql).bind(service_id).execute(&mut *tx).await?;
        }

        insert_rows(&mut tx, service_id, config).await?;

        tx.commit().await?;
        Ok(())
    }
}

async fn insert_rows(
    tx: &mut Transaction<'_, Sqlite>,
    service_id: &str,
    config: &PricingConfig,
) -> DbResult<()> {
    for (position, base) in config.base_configurations.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO base_configurations (
                service_id, position, id, name, kind, unit_price_cents, custom_value
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(service_id)
        .bind(position as i64)
        .bind(&base.id)
        .bind(&base.name)
        .bind(base.kind)
        .bind(base.unit_price_cents)
        .bind(&base.custom_value)
        .execute(&mut **tx)
        .await?;
    }

    for (position, option) in config.options.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO pricing_options (
                service_id, position, id, name, enabled, is_default, price_modifier_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(service_id)
        .bind(position as i64)
        .bind(&option.id)
        .bind(&option.name)
        .bind(option.enabled)
        .bind(option.is_default)
        .bind(option.price_modifier_cents)
        .execute(&mut **tx)
        .await?;
    }

    for (position, spec) in config.custom_specifications.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO custom_specifications (
                service_id, position, id, name, price_modifier_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(service_id)
        .bind(position as i64)
        .bind(&spec.id)
        .bind(&spec.name)
        .bind(spec.price_modifier_cents)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::Database;
    use crate::DbError;
    use printdesk_core::{
        scaffold, AgentService, NewBaseConfiguration, NewCustomSpecification, PricingConfig,
    };

    async fn db_with_service(service: &AgentService) -> Database {
        let db = Database::in_memory().await.unwrap();
        db.services().insert(service).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_round_trip_preserves_display_order() {
        let service = AgentService::new("svc", "Printing")
            .with_sub_category("Bond Paper")
            .with_capabilities(true, true, true);
        let db = db_with_service(&service).await;

        let mut config = scaffold(&service);
        config.remove_base_configuration(1).unwrap();
        config.add_base_configuration(NewBaseConfiguration {
            name: "Tabloid".to_string(),
            kind: Default::default(),
            unit_price_cents: 500,
            custom_value: None,
        });
        config.add_custom_specification(NewCustomSpecification {
            name: "Lamination".to_string(),
            price_modifier_cents: 500,
        });
        config.base_configurations[3].custom_value = Some("5 x 7 in".to_string());

        db.pricing().replace("svc", &config).await.unwrap();
        let loaded = db.pricing().load("svc").await.unwrap().unwrap();

        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_never_saved_loads_as_none() {
        let service = AgentService::new("svc", "Printing");
        let db = db_with_service(&service).await;

        assert_eq!(db.pricing().load("svc").await.unwrap(), None);
        assert_eq!(db.pricing().load("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_replace_overwrites_previous_rows() {
        let service = AgentService::new("svc", "Printing").with_capabilities(true, false, false);
        let db = db_with_service(&service).await;

        db.pricing().replace("svc", &scaffold(&service)).await.unwrap();

        let mut smaller = scaffold(&service);
        smaller.remove_option(2).unwrap();
        db.pricing().replace("svc", &smaller).await.unwrap();

        let loaded = db.pricing().load("svc").await.unwrap().unwrap();
        assert_eq!(loaded.options.len(), 2);
        assert_eq!(loaded, smaller);
    }

    #[tokio::test]
    async fn test_saved_empty_config_loads_as_empty() {
        let service = AgentService::new("svc", "Printing");
        let db = db_with_service(&service).await;

        db.pricing().replace("svc", &PricingConfig::new()).await.unwrap();
        assert_eq!(
            db.pricing().load("svc").await.unwrap(),
            Some(PricingConfig::new())
        );
    }

    #[tokio::test]
    async fn test_replace_unknown_service() {
        let db = Database::in_memory().await.unwrap();
        let err = db
            .pricing()
            .replace("missing", &PricingConfig::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
