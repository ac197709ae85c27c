//! # Lifecycle Controller
//!
//! Validates and saves a working config, optionally activating the service.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   UNCONFIGURED ──save_draft──► DRAFT ──save_and_activate──► ACTIVE      │
//! │        │                         ▲                             │        │
//! │        └────save_and_activate────┼─────────────────────────────┘        │
//! │                                  │                                      │
//! │                     activation failed after persist                    │
//! │                                                                         │
//! │   No edge leads back to UNCONFIGURED; the engine never deactivates.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Call Sequence
//! ```text
//! save_and_activate(service, config)
//!   │
//!   ├── validate ──✗──► LifecycleError::Validation   (no backend call)
//!   │
//!   ├── persist_config ──✗──► LifecycleError::Persistence   (no set_active)
//!   │        └── service.pricing_config = config
//!   │
//!   └── set_active(true) ──✗──► LifecycleError::Activation  (draft kept)
//!            └── service.is_active = true
//! ```
//!
//! Backend calls are strictly sequential and never retried. Dropping the
//! returned future drops the in-flight call; nothing further is issued.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use crate::error::{BackendError, LifecycleError, LifecycleResult};
use crate::types::{AgentService, PricingConfig};
use crate::validation::{validate_pricing_config, ValidationMode};

// =============================================================================
// Persistence Collaborator
// =============================================================================

/// Where saved pricing goes.
///
/// Implementations must make `persist_config` all-or-nothing: on `Err`, the
/// previously stored config is still in place.
#[async_trait]
pub trait PricingBackend: Send + Sync {
    /// Replaces the stored config of `service_id`.
    async fn persist_config(
        &self,
        service_id: &str,
        config: &PricingConfig,
    ) -> Result<(), BackendError>;

    /// Sets the customer-facing flag of `service_id`.
    async fn set_active(&self, service_id: &str, active: bool) -> Result<(), BackendError>;
}

// =============================================================================
// State
// =============================================================================

/// Where a service stands in the pricing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PricingState {
    /// No config, or one that would not pass validation.
    Unconfigured,
    /// Valid config saved, not visible to customers.
    Draft,
    /// Valid config saved and the service is live.
    Active,
}

impl PricingState {
    /// Derives the state from a service projection.
    pub fn of(service: &AgentService) -> Self {
        match &service.pricing_config {
            Some(config)
                if validate_pricing_config(config, ValidationMode::Standard).is_ok() =>
            {
                if service.is_active {
                    PricingState::Active
                } else {
                    PricingState::Draft
                }
            }
            _ => PricingState::Unconfigured,
        }
    }
}

impl std::fmt::Display for PricingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingState::Unconfigured => write!(f, "UNCONFIGURED"),
            PricingState::Draft => write!(f, "DRAFT"),
            PricingState::Active => write!(f, "ACTIVE"),
        }
    }
}

/// What a successful save reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaveOutcome {
    pub service_id: String,
    pub state: PricingState,
}

// =============================================================================
// Controller
// =============================================================================

/// Saves pricing through a [`PricingBackend`].
///
/// Holds no mutable state; one controller can serve every service.
#[derive(Debug, Clone)]
pub struct PricingLifecycle<B> {
    backend: B,
    mode: ValidationMode,
}

impl<B: PricingBackend> PricingLifecycle<B> {
    /// Controller with standard validation.
    pub fn new(backend: B) -> Self {
        Self::with_mode(backend, ValidationMode::Standard)
    }

    pub fn with_mode(backend: B, mode: ValidationMode) -> Self {
        PricingLifecycle { backend, mode }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validates and persists `config` without touching the active flag.
    ///
    /// An already-active service stays active and reports `Active`.
    pub async fn save_draft(
        &self,
        service: &mut AgentService,
        config: PricingConfig,
    ) -> LifecycleResult<SaveOutcome> {
        self.check(&service.id, &config)?;
        self.persist(service, config).await?;

        let state = PricingState::of(service);
        info!(service_id = %service.id, %state, "Pricing saved as draft");

        Ok(SaveOutcome {
            service_id: service.id.clone(),
            state,
        })
    }

    /// Validates, persists, then activates.
    ///
    /// If activation fails the persisted draft stays; the error says so via
    /// [`LifecycleError::draft_persisted`].
    pub async fn save_and_activate(
        &self,
        service: &mut AgentService,
        config: PricingConfig,
    ) -> LifecycleResult<SaveOutcome> {
        self.check(&service.id, &config)?;
        self.persist(service, config).await?;

        if let Err(source) = self.backend.set_active(&service.id, true).await {
            warn!(service_id = %service.id, error = %source, "Activation failed; draft kept");
            return Err(LifecycleError::Activation {
                service_id: service.id.clone(),
                source,
            });
        }
        service.is_active = true;

        info!(service_id = %service.id, state = %PricingState::Active, "Pricing activated");

        Ok(SaveOutcome {
            service_id: service.id.clone(),
            state: PricingState::Active,
        })
    }

    fn check(&self, service_id: &str, config: &PricingConfig) -> LifecycleResult<()> {
        validate_pricing_config(config, self.mode).map_err(|err| {
            warn!(service_id, reason = %err, "Pricing rejected by validation");
            LifecycleError::Validation(vec![err])
        })
    }

    async fn persist(&self, service: &mut AgentService, config: PricingConfig) -> LifecycleResult<()> {
        if let Err(source) = self.backend.persist_config(&service.id, &config).await {
            warn!(service_id = %service.id, error = %source, "Persisting pricing failed");
            return Err(LifecycleError::Persistence {
                service_id: service.id.clone(),
                source,
            });
        }
        service.pricing_config = Some(config);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::scaffold::scaffold;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Persist(String),
        SetActive(String, bool),
    }

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<Call>>,
        persist_error: Option<BackendError>,
        activate_error: Option<BackendError>,
    }

    impl RecordingBackend {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PricingBackend for RecordingBackend {
        async fn persist_config(
            &self,
            service_id: &str,
            _config: &PricingConfig,
        ) -> Result<(), BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Persist(service_id.to_string()));
            match &self.persist_error {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        async fn set_active(&self, service_id: &str, active: bool) -> Result<(), BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::SetActive(service_id.to_string(), active));
            match &self.activate_error {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn service() -> AgentService {
        AgentService::new("svc-1", "Document Printing")
            .with_sub_category("Bond Paper")
            .with_capabilities(true, true, false)
    }

    #[tokio::test]
    async fn test_save_draft_persists_without_activating() {
        let lifecycle = PricingLifecycle::new(RecordingBackend::default());
        let mut service = service();
        let config = scaffold(&service);

        let outcome = lifecycle.save_draft(&mut service, config.clone()).await.unwrap();

        assert_eq!(outcome.state, PricingState::Draft);
        assert_eq!(lifecycle.backend().calls(), vec![Call::Persist("svc-1".into())]);
        assert_eq!(service.pricing_config, Some(config));
        assert!(!service.is_active);
    }

    #[tokio::test]
    async fn test_save_and_activate_calls_in_order() {
        let lifecycle = PricingLifecycle::new(RecordingBackend::default());
        let mut service = service();
        let config = scaffold(&service);

        let outcome = lifecycle.save_and_activate(&mut service, config).await.unwrap();

        assert_eq!(outcome.state, PricingState::Active);
        assert_eq!(
            lifecycle.backend().calls(),
            vec![
                Call::Persist("svc-1".into()),
                Call::SetActive("svc-1".into(), true)
            ]
        );
        assert!(service.is_active);
        assert_eq!(PricingState::of(&service), PricingState::Active);
    }

    #[tokio::test]
    async fn test_invalid_config_calls_no_backend() {
        let lifecycle = PricingLifecycle::new(RecordingBackend::default());
        let mut service = service();
        let mut config = scaffold(&service);
        for option in &mut config.options {
            option.is_default = false;
        }

        let err = lifecycle
            .save_and_activate(&mut service, config)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            LifecycleError::Validation(vec![ValidationError::NoDefaultOption])
        );
        assert!(lifecycle.backend().calls().is_empty());
        assert_eq!(service.pricing_config, None);
        assert_eq!(PricingState::of(&service), PricingState::Unconfigured);
    }

    #[tokio::test]
    async fn test_persistence_failure_skips_activation() {
        let backend = RecordingBackend {
            persist_error: Some(BackendError::failed("disk full")),
            ..RecordingBackend::default()
        };
        let lifecycle = PricingLifecycle::new(backend);
        let mut service = service();
        let config = scaffold(&service);

        let err = lifecycle
            .save_and_activate(&mut service, config)
            .await
            .unwrap_err();

        assert!(matches!(err, LifecycleError::Persistence { .. }));
        assert!(!err.draft_persisted());
        assert!(err.to_string().ends_with("disk full"));
        assert_eq!(lifecycle.backend().calls(), vec![Call::Persist("svc-1".into())]);
        assert_eq!(service.pricing_config, None);
    }

    #[tokio::test]
    async fn test_cancelled_persist_is_a_persistence_failure() {
        let backend = RecordingBackend {
            persist_error: Some(BackendError::Cancelled),
            ..RecordingBackend::default()
        };
        let lifecycle = PricingLifecycle::new(backend);
        let mut service = service();
        let config = scaffold(&service);

        let err = lifecycle.save_draft(&mut service, config).await.unwrap_err();

        assert_eq!(
            err,
            LifecycleError::Persistence {
                service_id: "svc-1".to_string(),
                source: BackendError::Cancelled,
            }
        );
    }

    #[tokio::test]
    async fn test_activation_failure_keeps_draft() {
        let backend = RecordingBackend {
            activate_error: Some(BackendError::failed("permission denied")),
            ..RecordingBackend::default()
        };
        let lifecycle = PricingLifecycle::new(backend);
        let mut service = service();
        let config = scaffold(&service);

        let err = lifecycle
            .save_and_activate(&mut service, config.clone())
            .await
            .unwrap_err();

        assert!(err.draft_persisted());
        assert_eq!(service.pricing_config, Some(config));
        assert!(!service.is_active);
        assert_eq!(PricingState::of(&service), PricingState::Draft);
    }

    #[tokio::test]
    async fn test_draft_of_active_service_stays_active() {
        let lifecycle = PricingLifecycle::new(RecordingBackend::default());
        let mut service = service();
        let config = scaffold(&service);
        lifecycle
            .save_and_activate(&mut service, config.clone())
            .await
            .unwrap();

        let outcome = lifecycle.save_draft(&mut service, config).await.unwrap();
        assert_eq!(outcome.state, PricingState::Active);
        assert!(service.is_active);
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_duplicate_ids() {
        let lifecycle =
            PricingLifecycle::with_mode(RecordingBackend::default(), ValidationMode::Strict);
        let mut service = service();
        let mut config = scaffold(&service);
        config.base_configurations[1].id = config.base_configurations[0].id.clone();

        let err = lifecycle.save_draft(&mut service, config).await.unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Validation(ref reasons)
                if matches!(reasons[0], ValidationError::Duplicate { .. })
        ));
        assert!(lifecycle.backend().calls().is_empty());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PricingState::Unconfigured.to_string(), "UNCONFIGURED");
        assert_eq!(PricingState::of(&service()), PricingState::Unconfigured);
    }
}
