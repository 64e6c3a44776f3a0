// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # core-classifier
//!
//! Request-to-resource classifier for process-management API endpoints.
//!
//! Given an HTTP method and path, decides which protected resource the call
//! targets and which action it performs, producing [`ResourceDescriptor`]s
//! for a policy-decision engine. It never evaluates policy itself.
//!
//! - [`Registry`]: immutable, validated rule table built once at startup
//! - [`PathPattern`]: anchored segment matcher (`literal`, `*`, `#`)
//! - [`extract()`]: identifier parsing for a matched rule
//! - [`resource::build`]: descriptor assembly
//! - [`Classifier`]: the ordered stage pipeline
//!
//! ## Security
//!
//! - A registry in which two rules can match the same request is rejected at
//!   construction, so first-match-wins never hides a second mapping.
//! - A matched rule with a malformed identifier is a hard failure, never a
//!   fall-through to "unclassified".
//! - Limits on rule tables:
//!   - MAX_RULES = 1024
//!   - MAX_PATTERN_LENGTH = 256

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod classifier;
pub mod error;
pub mod extract;
pub mod path;
pub mod registry;
pub mod request;
pub mod resource;
pub mod rule;

pub use builder::{RegistryBuilder, RuleBuilder, StageBuilder};
pub use classifier::{Classification, Classifier, Classify, NoObserver, RuleObserver};
/// Re-export commonly used types
pub use error::{ClassifyError, RegistryError, Result, UnknownMethod};
pub use extract::{extract, ExtractedParams};
pub use path::{PathPattern, ReservedWords, Segment};
pub use registry::{Registry, BUILTIN_RULES};
pub use request::{Method, RequestContext};
pub use resource::{Action, ResourceDescriptor, ResourceKind, SubKind};
pub use rule::{IdRole, IdSlot, Recipe, Rule, Stage};

/// Maximum number of rules in one registry
pub const MAX_RULES: usize = 1024;

/// Maximum length for path patterns
pub const MAX_PATTERN_LENGTH: usize = 256;
