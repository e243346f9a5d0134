//! Error types for SlotForge

use thiserror::Error;

/// Core error type
///
/// The variants map one-to-one onto the error codes the legacy property
/// surface reports, so a failure anywhere in the engine can be surfaced
/// without translation loss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SfError {
    /// A referenced handle (slot id, source id, effect id) does not exist.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// A scalar is out of its taxonomy range, a buffer is too small, or an
    /// enumerated field is unknown.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// The call would violate a state invariant.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The effect identifier in a load-effect call is not supported.
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    /// A per-effect property was addressed on a slot with no effect loaded.
    #[error("No effect loaded on slot {0}")]
    NoEffectLoaded(u32),

    /// The payload does not line up with the requested API version.
    #[error("Incompatible EAX version: {0}")]
    IncompatibleVersion(String),

    /// The addressed source cannot accept the property.
    #[error("Incompatible source type: {0}")]
    IncompatibleSourceType(String),

    /// Kernel or slot allocation failed.
    #[error("Out of memory: {0}")]
    OutOfMemory(String),
}

/// Result type alias
pub type SfResult<T> = Result<T, SfError>;

impl SfError {
    pub fn invalid_value(what: impl Into<String>) -> Self {
        Self::InvalidValue(what.into())
    }

    pub fn invalid_operation(what: impl Into<String>) -> Self {
        Self::InvalidOperation(what.into())
    }
}
