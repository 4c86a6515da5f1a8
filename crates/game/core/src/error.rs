//! Common error infrastructure for item-core.
//!
//! Every fallible operation in the crate returns [`ItemError`]. Failures are
//! local and synchronous: the caller (the action layer) decides whether a failed
//! item mutation aborts the enclosing state transition.
//!
//! # Design Principles
//!
//! - **No partial mutation**: operations compute on copies and commit last, so an
//!   instance is unchanged when an error is returned
//! - **Rich Context**: format errors carry the structure and key that failed
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::item::ItemCategory;
use crate::stats::AttributeType;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions that may succeed on retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected numeric or state conditions that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: malformed payload, ratio outside the configured bound
    Validation,

    /// Internal error - unexpected numeric condition.
    ///
    /// Examples: a stat value overflowing the decimal range
    Internal,

    /// Fatal error - state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all item-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while building, mutating, or (de)serializing item stats.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    /// A structure cast or required key lookup failed during deserialization.
    #[error("invalid {context} format at '{key}': {reason}")]
    InvalidFormat {
        /// Structure being decoded (e.g. "stat-option").
        context: &'static str,
        /// Key whose lookup or cast failed.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Serialize or migrate was requested for a version with no implementation.
    #[error("serialize for version {version} is not implemented")]
    UnsupportedVersion {
        /// Requested serialized version.
        version: i64,
    },

    /// A payload carries an explicit version marker this crate cannot read.
    #[error("deserialize for version {version} is not implemented")]
    DeserializeNotImplemented {
        /// Version found in the payload.
        version: i64,
    },

    /// A ratio, level, or index fell outside its accepted domain.
    #[error("{what} {value} is out of range [{min}, {max}]")]
    RangeViolation {
        /// Name of the checked quantity.
        what: &'static str,
        /// Offending value, rendered.
        value: String,
        /// Lower bound, rendered.
        min: String,
        /// Upper bound, rendered.
        max: String,
    },

    /// Scaling a payload overflowed its numeric width.
    #[error("arithmetic overflow while {what}")]
    ArithmeticOverflow {
        /// Operation that overflowed.
        what: &'static str,
    },

    /// A flat stats map has no entry for the designated base attribute.
    #[error("stats map has no entry for base attribute {attribute}")]
    MissingBaseStat {
        /// The base attribute that was expected.
        attribute: AttributeType,
    },

    /// An equipment-only operation was applied to a non-equipment template.
    #[error("item category {category} is not equipment")]
    NotEquipment {
        /// Category of the offending template.
        category: ItemCategory,
    },
}

impl ItemError {
    /// Builds an [`ItemError::InvalidFormat`] and logs it with full context.
    pub(crate) fn invalid_format(
        context: &'static str,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let reason = reason.into();
        tracing::error!(context, key = %key, reason = %reason, "failed to decode item payload");
        Self::InvalidFormat {
            context,
            key,
            reason,
        }
    }

    /// Builds an [`ItemError::ArithmeticOverflow`] and logs it.
    pub(crate) fn overflow(what: &'static str) -> Self {
        tracing::warn!(what, "arithmetic overflow");
        Self::ArithmeticOverflow { what }
    }

    pub(crate) fn out_of_range(
        what: &'static str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::RangeViolation {
            what,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        use ItemError::*;
        match self {
            // Bad payloads and out-of-domain inputs are rejected outright
            InvalidFormat { .. }
            | UnsupportedVersion { .. }
            | DeserializeNotImplemented { .. }
            | RangeViolation { .. }
            | MissingBaseStat { .. }
            | NotEquipment { .. } => ErrorSeverity::Validation,

            ArithmeticOverflow { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ItemError::*;
        match self {
            InvalidFormat { .. } => "ITEM_INVALID_FORMAT",
            UnsupportedVersion { .. } => "ITEM_UNSUPPORTED_VERSION",
            DeserializeNotImplemented { .. } => "ITEM_DESERIALIZE_NOT_IMPLEMENTED",
            RangeViolation { .. } => "ITEM_RANGE_VIOLATION",
            ArithmeticOverflow { .. } => "ITEM_ARITHMETIC_OVERFLOW",
            MissingBaseStat { .. } => "ITEM_MISSING_BASE_STAT",
            NotEquipment { .. } => "ITEM_NOT_EQUIPMENT",
        }
    }
}

/// Convenience alias used throughout the crate.
pub type ItemResult<T> = Result<T, ItemError>;
