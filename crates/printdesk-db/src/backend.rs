//! # SQLite Pricing Backend
//!
//! [`PricingBackend`] over a [`Database`]: what the lifecycle controller
//! persists through in production.

use async_trait::async_trait;
use printdesk_core::{BackendError, PricingBackend, PricingConfig};
use tracing::debug;

use crate::pool::Database;

/// Persists pricing and the active flag into SQLite.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    db: Database,
}

impl SqliteBackend {
    pub fn new(db: Database) -> Self {
        SqliteBackend { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl PricingBackend for SqliteBackend {
    async fn persist_config(
        &self,
        service_id: &str,
        config: &PricingConfig,
    ) -> Result<(), BackendError> {
        debug!(service_id, "Persisting pricing config");
        self.db.pricing().replace(service_id, config).await?;
        Ok(())
    }

    async fn set_active(&self, service_id: &str, active: bool) -> Result<(), BackendError> {
        self.db.services().set_active(service_id, active).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use printdesk_core::{
        scaffold, AgentService, LifecycleError, PricingLifecycle, PricingState,
    };

    fn bond_paper() -> AgentService {
        AgentService::new("svc-bond", "Document Printing")
            .with_sub_category("Bond Paper")
            .with_capabilities(true, false, true)
    }

    #[tokio::test]
    async fn test_save_and_activate_through_sqlite() {
        let db = Database::in_memory().await.unwrap();
        let mut service = bond_paper();
        db.services().insert(&service).await.unwrap();

        let lifecycle = PricingLifecycle::new(db.backend());
        let config = scaffold(&service);
        let outcome = lifecycle
            .save_and_activate(&mut service, config.clone())
            .await
            .unwrap();
        assert_eq!(outcome.state, PricingState::Active);

        let stored = db.services().get("svc-bond").await.unwrap().unwrap();
        assert!(stored.is_active);
        assert_eq!(stored.pricing_config, Some(config));
        assert_eq!(stored, service);
        assert!(db.services().pricing_saved_at("svc-bond").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_draft_through_sqlite() {
        let db = Database::in_memory().await.unwrap();
        let mut service = bond_paper();
        db.services().insert(&service).await.unwrap();

        let lifecycle = PricingLifecycle::new(db.backend());
        let config = scaffold(&service);
        lifecycle.save_draft(&mut service, config).await.unwrap();

        let stored = db.services().get("svc-bond").await.unwrap().unwrap();
        assert!(!stored.is_active);
        assert_eq!(PricingState::of(&stored), PricingState::Draft);
    }

    #[tokio::test]
    async fn test_unknown_service_is_persistence_failure() {
        let db = Database::in_memory().await.unwrap();
        let mut service = bond_paper();

        let lifecycle = PricingLifecycle::new(db.backend());
        let config = scaffold(&service);
        let err = lifecycle
            .save_and_activate(&mut service, config)
            .await
            .unwrap_err();

        match err {
            LifecycleError::Persistence { service_id, source } => {
                assert_eq!(service_id, "svc-bond");
                assert_eq!(source, BackendError::failed("Service not found: svc-bond"));
            }
            other => panic!("expected persistence failure, got {other:?}"),
        }
        assert!(service.pricing_config.is_none());
    }
}
