//! # Repository Module
//!
//! SQL access for services and their pricing.
//!
//! ## Repository Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteBackend (PricingBackend)                                        │
//! │       │                                                                 │
//! │       ├── persist_config ──► PricingRepository::replace                │
//! │       └── set_active     ──► ServiceRepository::set_active             │
//! │                                                                         │
//! │  ServiceRepository                  PricingRepository                   │
//! │  ├── insert / get / list            ├── load(service_id)               │
//! │  ├── set_active                     └── replace(service_id, config)    │
//! │  └── pricing_saved_at                                                  │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  services                  base_configurations / pricing_options /     │
//! │                            custom_specifications (ordered by position) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod pricing;
pub mod service;
