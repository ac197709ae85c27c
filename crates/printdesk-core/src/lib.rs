//! # printdesk-core: Pricing Configuration Engine
//!
//! The pricing model for print-shop services and every rule that operates on
//! it. Persistence is reached only through the [`PricingBackend`] trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       PrintDesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Operator Console (host UI)                      │   │
//! │  │   Tier table ──► Option table ──► Preview ──► Save / Activate   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ AgentService + PricingConfig           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ printdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ scaffold │ │ mutation │ │validation│ │ preview  │          │   │
//! │  │   │ defaults │ │ add/upd/ │ │ 3 checks │ │  quote   │          │   │
//! │  │   │          │ │  remove  │ │ + strict │ │          │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                  ┌────────────────────────┐                     │   │
//! │  │                  │ lifecycle: draft/active │                    │   │
//! │  │                  └───────────┬────────────┘                     │   │
//! │  └──────────────────────────────┼──────────────────────────────────┘   │
//! │                                 │ PricingBackend (async trait)          │
//! │  ┌──────────────────────────────▼──────────────────────────────────┐   │
//! │  │                 printdesk-db (SQLite backend)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Pricing entities and the `AgentService` projection
//! - [`money`] - Integer money and currency formatting
//! - [`error`] - Core, validation, backend and lifecycle errors
//! - [`scaffold`] - Default configs per service family
//! - [`mutation`] - Add / update / remove on a working copy
//! - [`validation`] - Save-time checks and field validators
//! - [`preview`] - Read-only display projection
//! - [`quote`] - Order-time price for a selection
//! - [`lifecycle`] - Draft and activation saves
//!
//! ## Example Usage
//!
//! ```rust
//! use printdesk_core::{scaffold, quote, AgentService, Selection};
//!
//! let service = AgentService::new("svc-1", "Document Printing")
//!     .with_sub_category("Bond Paper")
//!     .with_capabilities(true, false, false);
//!
//! let config = scaffold(&service);
//! let selection = Selection::base("a4").with_options(["color"]);
//! let q = quote(&config, &selection, 10).unwrap();
//!
//! // (2.50 + 0.25) x 10
//! assert_eq!(q.total.cents(), 2750);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lifecycle;
pub mod money;
pub mod mutation;
pub mod preview;
pub mod quote;
pub mod scaffold;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{
    BackendError, Collection, CoreError, CoreResult, LifecycleError, LifecycleResult,
    ValidationError,
};
pub use lifecycle::{PricingBackend, PricingLifecycle, PricingState, SaveOutcome};
pub use money::{CurrencyFormat, Money};
pub use mutation::{
    BaseConfigurationPatch, CustomSpecificationPatch, NewBaseConfiguration,
    NewCustomSpecification, NewPricingOption, PricingOptionPatch,
};
pub use preview::{compute_preview, PreviewReport};
pub use quote::{quote, Quote, QuoteLine, Selection};
pub use scaffold::{ensure_pricing_config, scaffold, ScaffoldSource};
pub use types::*;
pub use validation::{collect_issues, validate_pricing_config, ValidationMode};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest display name accepted by strict validation.
pub const MAX_NAME_LEN: usize = 200;

/// Largest unit count a single quote may price.
///
/// ## Business Reason
/// Catches a mistyped quantity (10000 instead of 100) before it reaches an
/// order.
pub const MAX_QUANTITY: i64 = 9999;
