//! # Error Types
//!
//! Error types for printdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  printdesk-core (this file)                                            │
//! │  ├── CoreError        - Programmer errors (bad index, unknown id),     │
//! │  │                      quote selection errors                         │
//! │  ├── ValidationError  - Save-time and field-level rule failures        │
//! │  ├── BackendError     - Persistence collaborator failures              │
//! │  └── LifecycleError   - What a save reports to the caller              │
//! │                                                                         │
//! │  printdesk-db                                                          │
//! │  └── DbError          - SQLite failures, converted into BackendError   │
//! │                                                                         │
//! │  Save flow:  ValidationError ─┐                                        │
//! │              BackendError ────┴──► LifecycleError ──► operator console  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `CoreError` is never folded into a validation failure: an index past
//! the end of a collection is a bug in the caller, not bad operator input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Which collection of a [`PricingConfig`](crate::PricingConfig) an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    BaseConfigurations,
    Options,
    CustomSpecifications,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::BaseConfigurations => write!(f, "base configurations"),
            Collection::Options => write!(f, "options"),
            Collection::CustomSpecifications => write!(f, "custom specifications"),
        }
    }
}

/// Pricing engine errors outside save-time validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Index past the end of a collection.
    ///
    /// ## When This Occurs
    /// - The console kept an index across a remove (indices shift down)
    /// - Update/remove issued against a stale row
    #[error("Index {index} out of range for {collection} (len {len})")]
    IndexOutOfRange {
        collection: Collection,
        index: usize,
        len: usize,
    },

    /// No entity with this identifier in the collection.
    #[error("No entry '{id}' in {collection}")]
    UnknownIdentifier { collection: Collection, id: String },

    /// A quote selected an option the operator disabled.
    #[error("Option '{id}' is disabled")]
    OptionDisabled { id: String },

    /// A quote's unit price or total does not fit in `i64` cents.
    ///
    /// ## When This Occurs
    /// - Modifiers large enough that their sum overflows
    /// - A large unit price multiplied by the quantity
    #[error("Quoted price overflows for {quantity} unit(s)")]
    PriceOverflow { quantity: i64 },

    /// Validation error (field-level checks used by quoting).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn out_of_range(collection: Collection, index: usize, len: usize) -> Self {
        CoreError::IndexOutOfRange {
            collection,
            index,
            len,
        }
    }

    pub(crate) fn unknown(collection: Collection, id: impl Into<String>) -> Self {
        CoreError::UnknownIdentifier {
            collection,
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rule failures reported to the operator.
///
/// The first three variants are the save-time gate; the rest are field-level
/// checks used by strict validation and by quoting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one base configuration is required")]
    NoBaseConfigurations,

    #[error("At least one pricing option is required")]
    NoOptions,

    #[error("At least one enabled option must be marked as default")]
    NoDefaultOption,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g. not a UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two entries in one collection share an identifier.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Backend Error
// =============================================================================

/// Failure reported by the persistence collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The call completed with an error; the reason is surfaced verbatim.
    #[error("{0}")]
    Failed(String),

    /// The host cancelled the call before it completed.
    #[error("operation cancelled")]
    Cancelled,
}

impl BackendError {
    pub fn failed(reason: impl Into<String>) -> Self {
        BackendError::Failed(reason.into())
    }
}

// =============================================================================
// Lifecycle Error
// =============================================================================

/// Why a save did not reach the requested state.
///
/// ## Side Effects per Variant
/// ```text
/// Validation   → nothing persisted, nothing activated
/// Persistence  → nothing persisted (from the caller's view), not activated
/// Activation   → config PERSISTED (service is now DRAFT), not activated
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Pricing configuration is invalid: {}", join_reasons(.0))]
    Validation(Vec<ValidationError>),

    #[error("Failed to save pricing for service {service_id}: {source}")]
    Persistence {
        service_id: String,
        #[source]
        source: BackendError,
    },

    /// Partial success: the draft exists even though activation failed.
    #[error("Pricing saved for service {service_id} but activation failed: {source}")]
    Activation {
        service_id: String,
        #[source]
        source: BackendError,
    },
}

impl LifecycleError {
    /// True when the configuration was persisted despite the error.
    pub fn draft_persisted(&self) -> bool {
        matches!(self, LifecycleError::Activation { .. })
    }

    /// Human-readable reasons for a validation failure, empty otherwise.
    pub fn reasons(&self) -> Vec<String> {
        match self {
            LifecycleError::Validation(errors) => errors.iter().map(|e| e.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

fn join_reasons(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

pub type LifecycleResult<T> = Result<T, LifecycleError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::out_of_range(Collection::BaseConfigurations, 3, 2);
        assert_eq!(
            err.to_string(),
            "Index 3 out of range for base configurations (len 2)"
        );

        let err = CoreError::unknown(Collection::Options, "color");
        assert_eq!(err.to_string(), "No entry 'color' in options");

        let err = CoreError::PriceOverflow { quantity: 3 };
        assert_eq!(err.to_string(), "Quoted price overflows for 3 unit(s)");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::NoDefaultOption.to_string(),
            "At least one enabled option must be marked as default"
        );
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NoOptions.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_lifecycle_error_reasons() {
        let err = LifecycleError::Validation(vec![
            ValidationError::NoBaseConfigurations,
            ValidationError::NoOptions,
        ]);
        assert_eq!(err.reasons().len(), 2);
        assert!(err.to_string().contains("; "));
        assert!(!err.draft_persisted());

        let err = LifecycleError::Activation {
            service_id: "svc-1".to_string(),
            source: BackendError::failed("timeout"),
        };
        assert!(err.draft_persisted());
        assert!(err.reasons().is_empty());
        assert_eq!(
            err.to_string(),
            "Pricing saved for service svc-1 but activation failed: timeout"
        );
    }
}
