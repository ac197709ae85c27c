//! # Mutation Operations
//!
//! Add / update / remove over the three collections of a [`PricingConfig`].
//!
//! ## Editing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Console row action        Operation                 Effect             │
//! │  ──────────────────        ─────────                 ──────             │
//! │  "Add size"           ──►  add_base_configuration ─► push, fresh UUID   │
//! │  Edit price cell      ──►  update_base_configuration(i, patch)          │
//! │  Tick "default"       ──►  update_option(i, is_default: true)           │
//! │                            └─► every other option's default cleared     │
//! │  Delete row           ──►  remove_option(i) ─► later rows shift down    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations work on a caller-owned working copy. They do not reject
//! configs that would fail validation (an empty option list is a legal
//! intermediate state); the only errors are out-of-range indices and unknown
//! identifiers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{Collection, CoreError, CoreResult};
use crate::types::{
    BaseConfiguration, BaseKind, CustomSpecification, PricingConfig, PricingOption,
};

// =============================================================================
// New-Entity Inputs
// =============================================================================

/// Fields for a new tier; the identifier is generated on add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewBaseConfiguration {
    pub name: String,
    #[serde(default)]
    pub kind: BaseKind,
    #[serde(default)]
    pub unit_price_cents: i64,
    #[serde(default)]
    pub custom_value: Option<String>,
}

/// Fields for a new option; the identifier is generated on add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewPricingOption {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub price_modifier_cents: i64,
}

fn default_true() -> bool {
    true
}

/// Fields for a new custom specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewCustomSpecification {
    pub name: String,
    #[serde(default)]
    pub price_modifier_cents: i64,
}

// =============================================================================
// Partial Updates
// =============================================================================

/// Partial tier update; `None` leaves the field unchanged.
///
/// `custom_value: Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BaseConfigurationPatch {
    pub name: Option<String>,
    pub kind: Option<BaseKind>,
    pub unit_price_cents: Option<i64>,
    #[ts(optional)]
    pub custom_value: Option<Option<String>>,
}

/// Partial option update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingOptionPatch {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub is_default: Option<bool>,
    pub price_modifier_cents: Option<i64>,
}

/// Partial custom specification update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomSpecificationPatch {
    pub name: Option<String>,
    pub price_modifier_cents: Option<i64>,
}

impl BaseConfigurationPatch {
    fn apply(self, target: &mut BaseConfiguration) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(kind) = self.kind {
            target.kind = kind;
        }
        if let Some(cents) = self.unit_price_cents {
            target.unit_price_cents = cents;
        }
        if let Some(custom_value) = self.custom_value {
            target.custom_value = custom_value;
        }
    }
}

impl PricingOptionPatch {
    fn apply(self, target: &mut PricingOption) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(is_default) = self.is_default {
            target.is_default = is_default;
        }
        if let Some(cents) = self.price_modifier_cents {
            target.price_modifier_cents = cents;
        }
    }
}

impl CustomSpecificationPatch {
    fn apply(self, target: &mut CustomSpecification) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(cents) = self.price_modifier_cents {
            target.price_modifier_cents = cents;
        }
    }
}

/// Generates an identifier for a newly added entity.
pub fn generate_entity_id() -> String {
    Uuid::new_v4().to_string()
}

fn checked_index(collection: Collection, index: usize, len: usize) -> CoreResult<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(CoreError::out_of_range(collection, index, len))
    }
}

// =============================================================================
// Operations
// =============================================================================

impl PricingConfig {
    // -------------------------------------------------------------------------
    // Base configurations
    // -------------------------------------------------------------------------

    /// Appends a tier and returns its new identifier.
    pub fn add_base_configuration(&mut self, new: NewBaseConfiguration) -> String {
        let id = generate_entity_id();
        self.base_configurations.push(BaseConfiguration {
            id: id.clone(),
            name: new.name,
            kind: new.kind,
            unit_price_cents: new.unit_price_cents,
            custom_value: new.custom_value,
        });
        id
    }

    /// Merges `patch` into the tier at `index`.
    pub fn update_base_configuration(
        &mut self,
        index: usize,
        patch: BaseConfigurationPatch,
    ) -> CoreResult<&BaseConfiguration> {
        let index = checked_index(
            Collection::BaseConfigurations,
            index,
            self.base_configurations.len(),
        )?;
        let target = &mut self.base_configurations[index];
        patch.apply(target);
        Ok(&*target)
    }

    /// Removes and returns the tier at `index`; later tiers shift down by one.
    pub fn remove_base_configuration(&mut self, index: usize) -> CoreResult<BaseConfiguration> {
        let index = checked_index(
            Collection::BaseConfigurations,
            index,
            self.base_configurations.len(),
        )?;
        Ok(self.base_configurations.remove(index))
    }

    pub fn position_of_base_configuration(&self, id: &str) -> CoreResult<usize> {
        self.base_configurations
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CoreError::unknown(Collection::BaseConfigurations, id))
    }

    // -------------------------------------------------------------------------
    // Options
    // -------------------------------------------------------------------------

    /// Appends an option and returns its new identifier.
    ///
    /// A new default option takes the default flag away from every existing
    /// option first.
    pub fn add_option(&mut self, new: NewPricingOption) -> String {
        if new.is_default {
            self.clear_default_options();
        }

        let id = generate_entity_id();
        self.options.push(PricingOption {
            id: id.clone(),
            name: new.name,
            enabled: new.enabled,
            is_default: new.is_default,
            price_modifier_cents: new.price_modifier_cents,
        });
        id
    }

    /// Merges `patch` into the option at `index`.
    ///
    /// `is_default: Some(true)` clears the flag on every other option;
    /// `Some(false)` only touches this option.
    pub fn update_option(
        &mut self,
        index: usize,
        patch: PricingOptionPatch,
    ) -> CoreResult<&PricingOption> {
        let index = checked_index(Collection::Options, index, self.options.len())?;

        if patch.is_default == Some(true) {
            self.clear_default_options();
        }

        let target = &mut self.options[index];
        patch.apply(target);
        Ok(&*target)
    }

    /// Makes the option at `index` the only default.
    pub fn set_default_option(&mut self, index: usize) -> CoreResult<&PricingOption> {
        self.update_option(
            index,
            PricingOptionPatch {
                is_default: Some(true),
                ..PricingOptionPatch::default()
            },
        )
    }

    /// Removes and returns the option at `index`; later options shift down.
    pub fn remove_option(&mut self, index: usize) -> CoreResult<PricingOption> {
        let index = checked_index(Collection::Options, index, self.options.len())?;
        Ok(self.options.remove(index))
    }

    pub fn position_of_option(&self, id: &str) -> CoreResult<usize> {
        self.options
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| CoreError::unknown(Collection::Options, id))
    }

    fn clear_default_options(&mut self) {
        for option in &mut self.options {
            option.is_default = false;
        }
    }

    // -------------------------------------------------------------------------
    // Custom specifications
    // -------------------------------------------------------------------------

    /// Appends a custom specification and returns its new identifier.
    pub fn add_custom_specification(&mut self, new: NewCustomSpecification) -> String {
        let id = generate_entity_id();
        self.custom_specifications.push(CustomSpecification {
            id: id.clone(),
            name: new.name,
            price_modifier_cents: new.price_modifier_cents,
        });
        id
    }

    pub fn update_custom_specification(
        &mut self,
        index: usize,
        patch: CustomSpecificationPatch,
    ) -> CoreResult<&CustomSpecification> {
        let index = checked_index(
            Collection::CustomSpecifications,
            index,
            self.custom_specifications.len(),
        )?;
        let target = &mut self.custom_specifications[index];
        patch.apply(target);
        Ok(&*target)
    }

    pub fn remove_custom_specification(&mut self, index: usize) -> CoreResult<CustomSpecification> {
        let index = checked_index(
            Collection::CustomSpecifications,
            index,
            self.custom_specifications.len(),
        )?;
        Ok(self.custom_specifications.remove(index))
    }

    pub fn position_of_custom_specification(&self, id: &str) -> CoreResult<usize> {
        self.custom_specifications
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::unknown(Collection::CustomSpecifications, id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
