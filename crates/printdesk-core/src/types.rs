//! # Domain Types
//!
//! Pricing records exchanged with the operator console.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AgentService (external, referenced)                                    │
//! │  ├── category / sub_category  ──► picks the scaffold preset family      │
//! │  ├── supports_color / _front_back / _print_cut ──► scaffold options     │
//! │  ├── is_active ──► set by the lifecycle controller                      │
//! │  └── pricing_config: Option<PricingConfig>                              │
//! │                                                                         │
//! │  PricingConfig (aggregate root, one per service)                        │
//! │  ├── base_configurations: Vec<BaseConfiguration>   mutually exclusive   │
//! │  ├── options: Vec<PricingOption>                   one default          │
//! │  └── custom_specifications: Vec<CustomSpecification>  additive extras   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Vector order is display order only. It carries no pricing meaning but is
//! preserved by every mutation so the console renders rows stably.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Base Configuration
// =============================================================================

/// Whether a tier is a fixed preset or an operator-described custom tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum BaseKind {
    /// Fixed size/format (e.g. "A4").
    #[default]
    Preset,
    /// Free-form tier; `custom_value` describes it.
    Custom,
}

/// A mutually exclusive pricing tier, e.g. a paper size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BaseConfiguration {
    /// Unique within the owning config, stable across edits.
    pub id: String,

    /// Display name shown to the operator and the customer.
    pub name: String,

    pub kind: BaseKind,

    /// Price per billable unit (page, sheet) in cents.
    pub unit_price_cents: i64,

    /// Free-text description, only meaningful for [`BaseKind::Custom`].
    #[serde(default)]
    pub custom_value: Option<String>,
}

impl BaseConfiguration {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        self.kind == BaseKind::Custom
    }
}

// =============================================================================
// Pricing Option
// =============================================================================

/// A togglable production attribute (colour, duplex, cutting).
///
/// At most one option in a collection is default after any mutation; see
/// [`PricingConfig::add_option`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingOption {
    pub id: String,

    pub name: String,

    /// Disabled options stay in the list but cannot be ordered.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Pre-selected for a new order.
    #[serde(default)]
    pub is_default: bool,

    /// Signed per-unit delta added to the base unit price, in cents.
    #[serde(default)]
    pub price_modifier_cents: i64,
}

fn default_true() -> bool {
    true
}

impl PricingOption {
    /// Returns the per-unit modifier as Money.
    #[inline]
    pub fn price_modifier(&self) -> Money {
        Money::from_cents(self.price_modifier_cents)
    }

    /// Enabled and pre-selected; what save-time validation looks for.
    #[inline]
    pub fn is_active_default(&self) -> bool {
        self.enabled && self.is_default
    }
}

// =============================================================================
// Custom Specification
// =============================================================================

/// An independent additive extra (lamination, binding, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomSpecification {
    pub id: String,

    pub name: String,

    /// Signed per-unit delta in cents; usually non-negative but unconstrained.
    #[serde(default)]
    pub price_modifier_cents: i64,
}

impl CustomSpecification {
    #[inline]
    pub fn price_modifier(&self) -> Money {
        Money::from_cents(self.price_modifier_cents)
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// The aggregate root: everything needed to price one service.
///
/// Collections missing on the wire deserialize as empty, which makes the
/// config structurally incomplete (see [`PricingConfig::is_complete`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingConfig {
    #[serde(default)]
    pub base_configurations: Vec<BaseConfiguration>,

    #[serde(default)]
    pub options: Vec<PricingOption>,

    #[serde(default)]
    pub custom_specifications: Vec<CustomSpecification>,
}

impl PricingConfig {
    /// Creates an empty config (not structurally complete).
    pub fn new() -> Self {
        Self::default()
    }

    /// True when both the tier and option collections are populated.
    ///
    /// Incomplete configs are replaced by a scaffold; complete ones are never
    /// touched by scaffolding.
    pub fn is_complete(&self) -> bool {
        !self.base_configurations.is_empty() && !self.options.is_empty()
    }

    /// Enabled options marked default, in display order.
    pub fn default_options(&self) -> impl Iterator<Item = &PricingOption> {
        self.options.iter().filter(|o| o.is_active_default())
    }

    pub fn base_configuration(&self, id: &str) -> Option<&BaseConfiguration> {
        self.base_configurations.iter().find(|b| b.id == id)
    }

    pub fn option(&self, id: &str) -> Option<&PricingOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn custom_specification(&self, id: &str) -> Option<&CustomSpecification> {
        self.custom_specifications.iter().find(|s| s.id == id)
    }
}

// =============================================================================
// Agent Service
// =============================================================================

/// The offering being priced, as projected from the host API.
///
/// The engine reads the metadata and capability flags, and writes only
/// `pricing_config` and `is_active` (see the lifecycle controller).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AgentService {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub category: Option<String>,

    /// Drives the scaffold preset family ("Bond Paper" gets paper sizes).
    #[serde(default)]
    pub sub_category: Option<String>,

    #[serde(default)]
    pub supports_color: bool,

    #[serde(default)]
    pub supports_front_back: bool,

    #[serde(default)]
    pub supports_print_cut: bool,

    /// Customer-facing; only ever set to true by this engine.
    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub pricing_config: Option<PricingConfig>,
}

impl AgentService {
    /// Creates an inactive, unconfigured service with no capabilities.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        AgentService {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style sub-category setter.
    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    /// Builder-style capability setter.
    pub fn with_capabilities(mut self, color: bool, front_back: bool, print_cut: bool) -> Self {
        self.supports_color = color;
        self.supports_front_back = front_back;
        self.supports_print_cut = print_cut;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, enabled: bool, is_default: bool) -> PricingOption {
        PricingOption {
            id: id.to_string(),
            name: id.to_string(),
            enabled,
            is_default,
            price_modifier_cents: 0,
        }
    }

    #[test]
    fn test_is_complete_requires_tiers_and_options() {
        let mut config = PricingConfig::new();
        assert!(!config.is_complete());

        config.options.push(option("bw", true, true));
        assert!(!config.is_complete());

        config.base_configurations.push(BaseConfiguration {
            id: "a4".to_string(),
            name: "A4".to_string(),
            kind: BaseKind::Preset,
            unit_price_cents: 250,
            custom_value: None,
        });
        assert!(config.is_complete());
    }

    #[test]
    fn test_default_options_skip_disabled() {
        let config = PricingConfig {
            options: vec![
                option("a", false, true),
                option("b", true, true),
                option("c", true, false),
            ],
            ..PricingConfig::default()
        };
        let ids: Vec<&str> = config.default_options().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": "svc-1",
            "name": "Bond Paper Printing",
            "subCategory": "Bond Paper",
            "supportsColor": true,
            "pricingConfig": {
                "baseConfigurations": [
                    {"id": "x", "name": "Custom Size", "kind": "CUSTOM", "unitPriceCents": 0}
                ],
                "options": [{"id": "bw", "name": "Black & White", "isDefault": true}]
            }
        }"#;

        let service: AgentService = serde_json::from_str(json).unwrap();
        assert!(service.supports_color);
        assert!(!service.is_active);

        let config = service.pricing_config.unwrap();
        assert_eq!(config.base_configurations[0].kind, BaseKind::Custom);
        assert!(config.options[0].enabled);
        assert!(config.options[0].is_default);
        assert!(config.custom_specifications.is_empty());
    }
}
