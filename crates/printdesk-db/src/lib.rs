//! # printdesk-db: SQLite Backend for PrintDesk Pricing
//!
//! Stores services and their pricing configs and implements
//! [`PricingBackend`](printdesk_core::PricingBackend) on top of them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PrintDesk Data Flow                              │
//! │                                                                         │
//! │  PricingLifecycle::save_and_activate (printdesk-core)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   printdesk-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │ SqliteBackend │───►│ Repositories  │    │  Migrations  │   │   │
//! │  │   │ (backend.rs)  │    │ ServiceRepo   │    │  (embedded)  │   │   │
//! │  │   └───────────────┘    │ PricingRepo   │    │ 001_pricing  │   │   │
//! │  │                        └───────┬───────┘    └──────────────┘   │   │
//! │  │   ┌───────────────┐            │                               │   │
//! │  │   │ EngineConfig  │──► DbConfig ──► Database (pool.rs)         │   │
//! │  │   │ (config.rs)   │                                            │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (pricing.db)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and configuration errors
//! - [`repository`] - Service and pricing repositories
//! - [`backend`] - `PricingBackend` implementation
//! - [`config`] - Engine configuration (TOML + env)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use printdesk_core::{scaffold, PricingLifecycle};
//! use printdesk_db::{Database, DbConfig, EngineConfig};
//!
//! let engine = EngineConfig::load(None)?;
//! let db = Database::new(DbConfig::from(&engine)).await?;
//! let lifecycle = PricingLifecycle::with_mode(db.backend(), engine.validation_mode());
//!
//! let mut service = db.services().get("svc-1").await?.unwrap();
//! let config = scaffold(&service);
//! lifecycle.save_draft(&mut service, config).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::SqliteBackend;
pub use config::EngineConfig;
pub use error::{ConfigError, DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::pricing::PricingRepository;
pub use repository::service::ServiceRepository;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,printdesk=debug,sqlx=warn";

/// Installs the global `tracing` subscriber for binaries.
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`]. Calling twice is harmless.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
