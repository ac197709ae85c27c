//! # Order-Time Quote
//!
//! Prices a concrete selection against a [`PricingConfig`].
//!
//! ## Formula
//! ```text
//! unit_price = base.unit_price
//!            + Σ selected option modifiers
//!            + Σ selected custom specification modifiers
//! total      = unit_price × quantity
//! ```
//!
//! All arithmetic is on integer cents, so the order in which options or
//! specifications are listed never changes the result. Both id lists are
//! sets: a repeated id is priced once.
//!
//! An empty or absent option selection means "use the enabled defaults".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{Collection, CoreError, CoreResult};
use crate::money::Money;
use crate::types::PricingConfig;
use crate::validation::validate_quantity;

/// What the customer picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Selection {
    pub base_id: String,

    /// `None` or empty selects the enabled default options.
    #[serde(default)]
    pub option_ids: Option<Vec<String>>,

    #[serde(default)]
    pub custom_specification_ids: Vec<String>,
}

impl Selection {
    /// Selects a base tier with default options and no extras.
    pub fn base(base_id: impl Into<String>) -> Self {
        Selection {
            base_id: base_id.into(),
            ..Self::default()
        }
    }

    pub fn with_options<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.option_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_specifications<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_specification_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Which collection a quote line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum QuoteLineKind {
    Base,
    Option,
    CustomSpecification,
}

/// One contributor to the unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteLine {
    pub kind: QuoteLineKind,
    pub id: String,
    pub name: String,
    pub unit_amount: Money,
}

/// A priced selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quote {
    /// Base line first, then options, then specifications.
    pub lines: Vec<QuoteLine>,
    pub unit_price: Money,
    pub quantity: i64,
    pub total: Money,
}

/// Prices `selection` for `quantity` units.
///
/// ## Errors
/// - `UnknownIdentifier` for any id not in the config
/// - `OptionDisabled` when an explicitly selected option is disabled
/// - `Validation` when the quantity is outside `1..=MAX_QUANTITY`
/// - `PriceOverflow` when the unit price or total exceeds `i64` cents
pub fn quote(config: &PricingConfig, selection: &Selection, quantity: i64) -> CoreResult<Quote> {
    validate_quantity(quantity)?;

    let base = config
        .base_configuration(&selection.base_id)
        .ok_or_else(|| CoreError::unknown(Collection::BaseConfigurations, &selection.base_id))?;

    let mut lines = vec![QuoteLine {
        kind: QuoteLineKind::Base,
        id: base.id.clone(),
        name: base.name.clone(),
        unit_amount: base.unit_price(),
    }];

    match selection.option_ids.as_deref() {
        Some(ids) if !ids.is_empty() => {
            let mut seen = HashSet::new();
            for id in ids.iter().filter(|id| seen.insert(id.as_str())) {
                let option = config
                    .option(id)
                    .ok_or_else(|| CoreError::unknown(Collection::Options, id))?;
                if !option.enabled {
                    return Err(CoreError::OptionDisabled { id: id.clone() });
                }
                lines.push(QuoteLine {
                    kind: QuoteLineKind::Option,
                    id: option.id.clone(),
                    name: option.name.clone(),
                    unit_amount: option.price_modifier(),
                });
            }
        }
        _ => {
            lines.extend(config.default_options().map(|o| QuoteLine {
                kind: QuoteLineKind::Option,
                id: o.id.clone(),
                name: o.name.clone(),
                unit_amount: o.price_modifier(),
            }));
        }
    }

    let mut seen = HashSet::new();
    for id in selection
        .custom_specification_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
    {
        let spec = config
            .custom_specification(id)
            .ok_or_else(|| CoreError::unknown(Collection::CustomSpecifications, id))?;
        lines.push(QuoteLine {
            kind: QuoteLineKind::CustomSpecification,
            id: spec.id.clone(),
            name: spec.name.clone(),
            unit_amount: spec.price_modifier(),
        });
    }

    let overflow = || CoreError::PriceOverflow { quantity };
    let unit_price = lines
        .iter()
        .try_fold(Money::zero(), |acc, line| acc.checked_add(line.unit_amount))
        .ok_or_else(overflow)?;
    let total = unit_price
        .checked_multiply_quantity(quantity)
        .ok_or_else(overflow)?;

    Ok(Quote {
        lines,
        unit_price,
        quantity,
        total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::mutation::{BaseConfigurationPatch, NewCustomSpecification};
    use crate::scaffold::scaffold;
    use crate::types::AgentService;
    use crate::MAX_QUANTITY;

    fn bond_paper() -> PricingConfig {
        let service = AgentService::new("svc", "Printing")
            .with_sub_category("Bond Paper")
            .with_capabilities(true, true, true);
        scaffold(&service)
    }

    #[test]
    fn test_quote_with_defaults() {
        let config = bond_paper();
        let q = quote(&config, &Selection::base("short"), 100).unwrap();

        assert_eq!(q.lines.len(), 3);
        assert_eq!(q.lines[0].kind, QuoteLineKind::Base);
        assert_eq!(q.unit_price, Money::from_cents(200));
        assert_eq!(q.total, Money::from_cents(20_000));
    }

    #[test]
    fn test_empty_option_list_means_defaults() {
        let config = bond_paper();
        let explicit_empty = Selection::base("a4").with_options(Vec::<String>::new());
        let absent = Selection::base("a4");
        assert_eq!(
            quote(&config, &explicit_empty, 1).unwrap(),
            quote(&config, &absent, 1).unwrap()
        );
    }

    #[test]
    fn test_quote_sums_options_and_specifications() {
        let mut config = bond_paper();
        let lamination = config.add_custom_specification(NewCustomSpecification {
            name: "Lamination".to_string(),
            price_modifier_cents: 500,
        });

        let selection = Selection::base("legal")
            .with_options(["color", "front_back"])
            .with_specifications([lamination]);
        let q = quote(&config, &selection, 4).unwrap();

        // 3.50 + 0.25 + 0.10 + 5.00
        assert_eq!(q.unit_price.cents(), 885);
        assert_eq!(q.total.cents(), 3540);
        assert_eq!(q.lines.last().unwrap().kind, QuoteLineKind::CustomSpecification);
    }

    #[test]
    fn test_option_order_does_not_change_total() {
        let config = bond_paper();
        let forward = Selection::base("long").with_options(["color", "front_back", "print_cut"]);
        let backward = Selection::base("long").with_options(["print_cut", "front_back", "color"]);

        assert_eq!(
            quote(&config, &forward, 7).unwrap().total,
            quote(&config, &backward, 7).unwrap().total
        );
    }

    #[test]
    fn test_unknown_and_disabled_options() {
        let mut config = bond_paper();
        assert_eq!(
            quote(&config, &Selection::base("tabloid"), 1).unwrap_err(),
            CoreError::unknown(Collection::BaseConfigurations, "tabloid")
        );
        assert_eq!(
            quote(&config, &Selection::base("a4").with_options(["glitter"]), 1).unwrap_err(),
            CoreError::unknown(Collection::Options, "glitter")
        );
        assert!(matches!(
            quote(&config, &Selection::base("a4").with_specifications(["x"]), 1),
            Err(CoreError::UnknownIdentifier { .. })
        ));

        let color = config.position_of_option("color").unwrap();
        config.options[color].enabled = false;
        assert_eq!(
            quote(&config, &Selection::base("a4").with_options(["color"]), 1).unwrap_err(),
            CoreError::OptionDisabled {
                id: "color".to_string()
            }
        );
    }

    #[test]
    fn test_quantity_bounds() {
        let config = bond_paper();
        let selection = Selection::base("a4");

        assert!(matches!(
            quote(&config, &selection, 0),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(quote(&config, &selection, MAX_QUANTITY).is_ok());
        assert!(quote(&config, &selection, MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_repeated_ids_are_priced_once() {
        let mut config = bond_paper();
        let lamination = config.add_custom_specification(NewCustomSpecification {
            name: "Lamination".to_string(),
            price_modifier_cents: 500,
        });

        let once = quote(&config, &Selection::base("a4").with_options(["color"]), 1).unwrap();
        let twice = quote(
            &config,
            &Selection::base("a4").with_options(["color", "color"]),
            1,
        )
        .unwrap();
        assert_eq!(once.unit_price.cents(), 275);
        assert_eq!(twice, once);

        let selection = Selection::base("a4")
            .with_options(["color"])
            .with_specifications([lamination.clone(), lamination]);
        let q = quote(&config, &selection, 2).unwrap();
        assert_eq!(q.lines.len(), 3);
        assert_eq!(q.unit_price.cents(), 775);
    }

    #[test]
    fn test_overflowing_price_is_an_error() {
        let mut config = bond_paper();
        let a4 = config.position_of_base_configuration("a4").unwrap();
        config
            .update_base_configuration(
                a4,
                BaseConfigurationPatch {
                    unit_price_cents: Some(i64::MAX / 2),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(quote(&config, &Selection::base("a4"), 2).is_ok());
        assert_eq!(
            quote(&config, &Selection::base("a4"), 3).unwrap_err(),
            CoreError::PriceOverflow { quantity: 3 }
        );

        config
            .update_base_configuration(
                a4,
                BaseConfigurationPatch {
                    unit_price_cents: Some(i64::MAX),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(
            quote(&config, &Selection::base("a4").with_options(["color"]), 1).unwrap_err(),
            CoreError::PriceOverflow { quantity: 1 }
        );
    }
}
