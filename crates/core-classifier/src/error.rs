//! Error types for core-classifier
//!
//! Two families, split by when they occur:
//! - [`RegistryError`] is raised while a rule table is compiled and is fatal at startup
//! - [`ClassifyError`] is raised for a single request and never affects the registry
//!
//! [`UnknownMethod`] is returned when parsing a [`Method`](crate::Method) from text.

use crate::rule::IdRole;
use thiserror::Error;

/// Result type alias for registry construction
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised while building a [`Registry`](crate::Registry)
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Pattern could not be compiled
    #[error("Invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// Offending pattern text
        pattern: String,
        /// What is wrong with it
        reason: String,
    },

    /// Pattern exceeds maximum length
    #[error("Pattern exceeds maximum {max} characters (length: {length})")]
    PatternTooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual pattern length
        length: usize,
    },

    /// Registry exceeds maximum allowed rules
    #[error("Registry exceeds maximum {max} rules (attempted: {attempted})")]
    TooManyRules {
        /// Maximum allowed rules
        max: usize,
        /// Attempted number of rules
        attempted: usize,
    },

    /// Registry has no stages or no rules
    #[error("Registry must contain at least one stage with at least one rule")]
    EmptyRegistry,

    /// Two stages share a name (or a stage name is empty)
    #[error("Invalid or duplicate stage name: `{0}`")]
    DuplicateStage(String),

    /// Two rules share a name (or a rule name is empty)
    #[error("Invalid or duplicate rule name: `{0}`")]
    DuplicateRule(String),

    /// Recipe points at a segment that cannot hold an identifier
    #[error("Invalid recipe for rule `{rule}`: {reason}")]
    InvalidRecipe {
        /// Rule name
        rule: String,
        /// What is wrong with the recipe
        reason: String,
    },

    /// Two rules can match the same method and path
    #[error("Rules `{first}` and `{second}` can match the same {method} request")]
    OverlappingRules {
        /// Rule registered first
        first: String,
        /// Rule registered later
        second: String,
        /// Method both rules require
        method: String,
    },

    /// Builder was missing a required field
    #[error("Rule definition is missing required field `{0}`")]
    MissingField(&'static str),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Returned when a method name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown HTTP method: {0}")]
pub struct UnknownMethod(pub String);

/// Per-request classification failure
///
/// The caller must treat any `ClassifyError` as "deny the request".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// A rule matched but one of its identifier segments is not a valid integer
    #[error("{operation}, but got invalid {role}: {segment}")]
    InvalidId {
        /// Name of the matched rule
        operation: String,
        /// Which identifier failed
        role: IdRole,
        /// Raw segment text
        segment: String,
    },
}

impl ClassifyError {
    /// Human-readable cause, suitable for an API error body
    #[must_use]
    pub fn cause(&self) -> String {
        self.to_string()
    }

    /// The raw path segment that caused the failure
    #[must_use]
    pub fn bad_segment(&self) -> &str {
        match self {
            Self::InvalidId { segment, .. } => segment,
        }
    }

    /// The identifier role that failed to parse
    #[must_use]
    pub const fn role(&self) -> IdRole {
        match self {
            Self::InvalidId { role, .. } => *role,
        }
    }
}
