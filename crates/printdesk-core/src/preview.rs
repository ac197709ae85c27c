//! # Price Preview
//!
//! Read-only projection of a [`PricingConfig`] for the console's preview
//! panel. Nothing here mutates the config.
//!
//! ```text
//! ┌──────────────────────────── Preview ────────────────────────────┐
//! │  Base                                                           │
//! │    Short (8.5 x 11)        $2.00 / unit                         │
//! │    Custom Size  "5 x 7"    $0.00 / unit                         │
//! │  Options                                                        │
//! │    Black & White  [default]  $0.00                              │
//! │    Color                     +$0.25                             │
//! │  Extras                                                         │
//! │    Lamination                +$5.00                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::money::{CurrencyFormat, Money};
use crate::types::{BaseKind, PricingConfig};

/// One base tier as the preview shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasePreview {
    pub id: String,
    pub name: String,
    pub kind: BaseKind,
    pub custom_value: Option<String>,
    pub unit_price: Money,
    /// e.g. `$2.50`
    pub unit_price_display: String,
}

/// One option row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OptionPreview {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub is_default: bool,
    pub price_delta: Money,
    /// `+$0.25`, `-$0.10`, or the unsigned zero amount.
    pub price_delta_display: String,
}

/// One custom specification row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SpecificationPreview {
    pub id: String,
    pub name: String,
    pub price_delta: Money,
    pub price_delta_display: String,
}

/// Everything the preview panel renders, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PreviewReport {
    pub base_configurations: Vec<BasePreview>,
    pub options: Vec<OptionPreview>,
    pub custom_specifications: Vec<SpecificationPreview>,
}

impl PreviewReport {
    /// Cheapest and most expensive base unit price, if any tier exists.
    pub fn base_price_range(&self) -> Option<(Money, Money)> {
        let prices = self.base_configurations.iter().map(|b| b.unit_price);
        let min = prices.clone().min()?;
        let max = prices.max()?;
        Some((min, max))
    }
}

/// Builds the preview with the default `$` / two-decimal format.
pub fn compute_preview(config: &PricingConfig) -> PreviewReport {
    compute_preview_with(config, &CurrencyFormat::default())
}

/// Builds the preview with a host-supplied currency format.
pub fn compute_preview_with(config: &PricingConfig, format: &CurrencyFormat) -> PreviewReport {
    let base_configurations = config
        .base_configurations
        .iter()
        .map(|b| BasePreview {
            id: b.id.clone(),
            name: b.name.clone(),
            kind: b.kind,
            custom_value: b.custom_value.clone(),
            unit_price: b.unit_price(),
            unit_price_display: format.format(b.unit_price()),
        })
        .collect();

    let options = config
        .options
        .iter()
        .map(|o| OptionPreview {
            id: o.id.clone(),
            name: o.name.clone(),
            enabled: o.enabled,
            is_default: o.is_default,
            price_delta: o.price_modifier(),
            price_delta_display: format.format_delta(o.price_modifier()),
        })
        .collect();

    let custom_specifications = config
        .custom_specifications
        .iter()
        .map(|s| SpecificationPreview {
            id: s.id.clone(),
            name: s.name.clone(),
            price_delta: s.price_modifier(),
            price_delta_display: format.format_delta(s.price_modifier()),
        })
        .collect();

    PreviewReport {
        base_configurations,
        options,
        custom_specifications,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::NewCustomSpecification;
    use crate::scaffold::scaffold;
    use crate::types::AgentService;

    #[test]
    fn test_preview_mirrors_config_order() {
        let service = AgentService::new("svc", "x")
            .with_sub_category("Bond Paper")
            .with_capabilities(true, false, false);
        let config = scaffold(&service);
        let report = compute_preview(&config);

        let names: Vec<&str> = report
            .base_configurations
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names[0], "Short (8.5 x 11)");
        assert_eq!(names[4], "Custom Size");
        assert_eq!(report.base_configurations[1].unit_price_display, "$2.50");
        assert_eq!(report.options.len(), 3);
    }

    #[test]
    fn test_option_deltas() {
        let service = AgentService::new("svc", "x").with_capabilities(true, true, false);
        let report = compute_preview(&scaffold(&service));

        let deltas: Vec<&str> = report
            .options
            .iter()
            .map(|o| o.price_delta_display.as_str())
            .collect();
        assert_eq!(deltas, vec!["$0.00", "$0.00", "+$0.25", "+$0.10"]);
        assert!(report.options[0].is_default);
    }

    #[test]
    fn test_negative_delta_and_custom_symbol() {
        let mut config = scaffold(&AgentService::new("svc", "x"));
        config.options[1].price_modifier_cents = -10;
        config.add_custom_specification(NewCustomSpecification {
            name: "Lamination".to_string(),
            price_modifier_cents: 500,
        });

        let report = compute_preview_with(&config, &CurrencyFormat::new("₱", 2));
        assert_eq!(report.options[1].price_delta_display, "-₱0.10");
        assert_eq!(report.custom_specifications[0].price_delta_display, "+₱5.00");
    }

    #[test]
    fn test_base_price_range() {
        let service = AgentService::new("svc", "x").with_sub_category("Bond Paper");
        let report = compute_preview(&scaffold(&service));
        assert_eq!(
            report.base_price_range(),
            Some((Money::zero(), Money::from_cents(350)))
        );
        assert_eq!(PreviewReport::default().base_price_range(), None);
    }
}
