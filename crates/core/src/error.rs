//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, ValidationError>;

/// Save-blocking validation failure.
///
/// These are the only two conditions that stop a draft from being turned into
/// a create request. Every other malformed state is tolerated by excluding the
/// offending line instead of failing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Client name is empty after trimming.
    #[error("please enter client name")]
    MissingClientName,

    /// No line satisfies the validity rule (name, quantity > 0, price > 0).
    #[error("please add at least one valid item")]
    NoValidLines,
}

/// Why a numeric field was set aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    NotANumber,
    /// Magnitude above [`crate::money::MAX_AMOUNT`].
    OutOfRange,
}

impl core::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MalformedReason::NotANumber => f.write_str("is not a number"),
            MalformedReason::OutOfRange => f.write_str("is out of range"),
        }
    }
}

/// Warning raised when a numeric field holds text that cannot be priced.
///
/// Never blocks interaction: the field contributes zero to live totals and the
/// line drops out of the save payload through the validity rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field} {reason}: {raw:?}")]
pub struct MalformedField {
    pub field: &'static str,
    pub raw: String,
    pub reason: MalformedReason,
}

impl MalformedField {
    pub fn new(field: &'static str, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
            reason: MalformedReason::NotANumber,
        }
    }

    pub fn out_of_range(field: &'static str, raw: impl Into<String>) -> Self {
        Self {
            reason: MalformedReason::OutOfRange,
            ..Self::new(field, raw)
        }
    }
}
