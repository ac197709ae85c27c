//! # Scaffold Generator
//!
//! Builds the starting [`PricingConfig`] for a service that has none.
//!
//! ## Preset Families
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sub_category contains "bond paper" (any case)?                         │
//! │                                                                         │
//! │   YES ─► Short  2.00 │ A4  2.50 │ Long  3.00 │ Legal  3.50 │ Custom 0   │
//! │   NO  ─► Standard Size 0.00 │ Custom Size 0.00                          │
//! │                                                                         │
//! │  Options (always):       Black & White (default), Front Only (default)  │
//! │  Options (per flag):     color +0.25 │ front_back +0.10 │ print_cut +0.15│
//! │  Custom specifications:  none                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scaffolded rows get stable slug identifiers, so two scaffolds of the same
//! service are equal. Rows added later through the mutation API get UUIDs.

use tracing::debug;

use crate::money::Money;
use crate::types::{AgentService, BaseConfiguration, BaseKind, PricingConfig, PricingOption};

/// Sub-category marker selecting the paper-size preset family.
pub const BOND_PAPER_MARKER: &str = "bond paper";

/// Per-unit surcharge for colour printing.
pub const COLOR_SURCHARGE: Money = Money::from_cents(25);

/// Per-unit surcharge for double-sided printing.
pub const FRONT_BACK_SURCHARGE: Money = Money::from_cents(10);

/// Per-unit surcharge for print-and-cut.
pub const PRINT_CUT_SURCHARGE: Money = Money::from_cents(15);

/// Paper-size tiers for bond paper services: (id, name, cents per page).
const BOND_PAPER_SIZES: &[(&str, &str, i64)] = &[
    ("short", "Short (8.5 x 11)", 200),
    ("a4", "A4 (8.27 x 11.69)", 250),
    ("long", "Long (8.5 x 13)", 300),
    ("legal", "Legal (8.5 x 14)", 350),
];

/// Whether `ensure_pricing_config` produced a new config or kept the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldSource {
    /// The service's own config was complete and returned as-is.
    Existing,
    /// A fresh scaffold replaced a missing or incomplete config.
    Generated,
}

/// Returns the config the editor should start from.
///
/// A structurally complete existing config is returned unmodified; anything
/// else gets a fresh scaffold. Operator work is never overwritten.
pub fn scaffold(service: &AgentService) -> PricingConfig {
    ensure_pricing_config(service).0
}

/// Like [`scaffold`], also reporting where the config came from.
pub fn ensure_pricing_config(service: &AgentService) -> (PricingConfig, ScaffoldSource) {
    match &service.pricing_config {
        Some(existing) if existing.is_complete() => (existing.clone(), ScaffoldSource::Existing),
        _ => {
            debug!(service_id = %service.id, "Generating pricing scaffold");
            (generate(service), ScaffoldSource::Generated)
        }
    }
}

/// True when the service belongs to the bond paper preset family.
pub fn is_bond_paper(service: &AgentService) -> bool {
    service
        .sub_category
        .as_deref()
        .map(|s| s.to_lowercase().contains(BOND_PAPER_MARKER))
        .unwrap_or(false)
}

fn generate(service: &AgentService) -> PricingConfig {
    PricingConfig {
        base_configurations: base_tiers(service),
        options: options(service),
        custom_specifications: Vec::new(),
    }
}

fn base_tiers(service: &AgentService) -> Vec<BaseConfiguration> {
    let mut tiers = Vec::new();

    if is_bond_paper(service) {
        tiers.extend(
            BOND_PAPER_SIZES
                .iter()
                .map(|&(id, name, cents)| preset(id, name, cents)),
        );
    } else {
        tiers.push(preset("standard", "Standard Size", 0));
    }

    tiers.push(BaseConfiguration {
        id: "custom".to_string(),
        name: "Custom Size".to_string(),
        kind: BaseKind::Custom,
        unit_price_cents: 0,
        custom_value: None,
    });

    tiers
}

fn preset(id: &str, name: &str, unit_price_cents: i64) -> BaseConfiguration {
    BaseConfiguration {
        id: id.to_string(),
        name: name.to_string(),
        kind: BaseKind::Preset,
        unit_price_cents,
        custom_value: None,
    }
}

fn options(service: &AgentService) -> Vec<PricingOption> {
    let mut options = vec![
        option("black_white", "Black & White", true, Money::zero()),
        option("front_only", "Front Only", true, Money::zero()),
    ];

    if service.supports_color {
        options.push(option("color", "Color", false, COLOR_SURCHARGE));
    }
    if service.supports_front_back {
        options.push(option("front_back", "Front & Back", false, FRONT_BACK_SURCHARGE));
    }
    if service.supports_print_cut {
        options.push(option("print_cut", "Print & Cut", false, PRINT_CUT_SURCHARGE));
    }

    options
}

fn option(id: &str, name: &str, is_default: bool, modifier: Money) -> PricingOption {
    PricingOption {
        id: id.to_string(),
        name: name.to_string(),
        enabled: true,
        is_default,
        price_modifier_cents: modifier.cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
