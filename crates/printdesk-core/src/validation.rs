//! # Validation Module
//!
//! Save-time gate for a [`PricingConfig`] plus field-level validators.
//!
//! ## Save-Time Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_pricing_config(config, mode)                                  │
//! │       │                                                                 │
//! │       ├── 1. base_configurations empty?  → NoBaseConfigurations         │
//! │       ├── 2. options empty?              → NoOptions                    │
//! │       ├── 3. no enabled + default option? → NoDefaultOption             │
//! │       │                                                                 │
//! │       ├── (Strict only) display names, base prices, duplicate ids       │
//! │       │                                                                 │
//! │       └── OK → lifecycle may persist                                    │
//! │                                                                         │
//! │  First failure wins. `collect_issues` runs every check instead.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Standard mode runs only the three structural checks. Unique identifiers
//! and non-negative prices are enforced in strict mode alone.
//!
//! ## Usage
//! ```rust
//! use printdesk_core::validation::{validate_pricing_config, ValidationMode};
//! use printdesk_core::PricingConfig;
//!
//! let empty = PricingConfig::new();
//! assert!(validate_pricing_config(&empty, ValidationMode::Standard).is_err());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::PricingConfig;
use crate::{MAX_NAME_LEN, MAX_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// How much of the rule set a save runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// The three structural checks only.
    #[default]
    Standard,
    /// Structural checks plus field and uniqueness rules.
    Strict,
}

impl ValidationMode {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Standard
        }
    }
}

// =============================================================================
// Config Validators
// =============================================================================

/// Checks a config before it may be saved; the first failure is returned.
pub fn validate_pricing_config(config: &PricingConfig, mode: ValidationMode) -> ValidationResult<()> {
    if config.base_configurations.is_empty() {
        return Err(ValidationError::NoBaseConfigurations);
    }

    if config.options.is_empty() {
        return Err(ValidationError::NoOptions);
    }

    if config.default_options().next().is_none() {
        return Err(ValidationError::NoDefaultOption);
    }

    if mode == ValidationMode::Strict {
        if let Some(err) = strict_issues(config).into_iter().next() {
            return Err(err);
        }
    }

    Ok(())
}

/// Runs every check and returns all failures, in check order.
///
/// The console uses this to highlight every problem at once; saves still go
/// through [`validate_pricing_config`].
pub fn collect_issues(config: &PricingConfig, mode: ValidationMode) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if config.base_configurations.is_empty() {
        issues.push(ValidationError::NoBaseConfigurations);
    }
    if config.options.is_empty() {
        issues.push(ValidationError::NoOptions);
    }
    if config.default_options().next().is_none() {
        issues.push(ValidationError::NoDefaultOption);
    }

    if mode == ValidationMode::Strict {
        issues.extend(strict_issues(config));
    }

    issues
}

fn strict_issues(config: &PricingConfig) -> Vec<ValidationError> {
    let names = config
        .base_configurations
        .iter()
        .map(|b| b.name.as_str())
        .chain(config.options.iter().map(|o| o.name.as_str()))
        .chain(config.custom_specifications.iter().map(|s| s.name.as_str()));

    let mut issues: Vec<ValidationError> = names
        .filter_map(|name| validate_display_name(name).err())
        .collect();

    issues.extend(
        config
            .base_configurations
            .iter()
            .filter_map(|b| validate_price_cents(b.unit_price_cents).err()),
    );

    issues.extend(duplicate_ids(
        "base configuration id",
        config.base_configurations.iter().map(|b| b.id.as_str()),
    ));
    issues.extend(duplicate_ids(
        "option id",
        config.options.iter().map(|o| o.id.as_str()),
    ));
    issues.extend(duplicate_ids(
        "custom specification id",
        config.custom_specifications.iter().map(|s| s.id.as_str()),
    ));

    issues
}

fn duplicate_ids<'a>(
    field: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut issues = Vec::new();

    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            issues.push(ValidationError::Duplicate {
                field: field.to_string(),
                value: id.to_string(),
            });
        }
    }

    issues
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (tier, option or specification).
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_NAME_LEN` characters
///
/// ## Example
/// ```rust
/// use printdesk_core::validation::validate_display_name;
///
/// assert!(validate_display_name("A4 (8.27 x 11.69)").is_ok());
/// assert!(validate_display_name("   ").is_err());
/// ```
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (custom tiers start unpriced)
///
/// ## Example
/// ```rust
/// use printdesk_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(250).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_QUANTITY` (9999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
