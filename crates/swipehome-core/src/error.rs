//! Error types for SwipeHome.

use thiserror::Error;

/// Drag axis errors - programmer contract violations.
///
/// Construction errors make the axis (and any coordinator built on it)
/// unusable. `UnknownState` is returned by transition requests and leaves
/// the axis untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AxisError {
    /// Fewer than two anchors were supplied.
    #[error("Axis needs at least two anchors, got {count}")]
    TooFewAnchors { count: usize },

    /// Two anchors share the same offset.
    #[error("Duplicate anchor offset: {offset}")]
    DuplicateOffset { offset: f32 },

    /// An anchor offset is NaN or infinite.
    #[error("Anchor offset is not finite: {offset}")]
    NonFiniteOffset { offset: f32 },

    /// One state is bound to more than one anchor.
    #[error("State '{state}' is bound to more than one anchor")]
    DuplicateState { state: String },

    /// The requested state has no anchor on this axis.
    #[error("State '{state}' is not an anchor of this axis")]
    UnknownState { state: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is outside its allowed range.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
