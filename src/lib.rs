// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # procgate
//!
//! Authorization front door for process-management API endpoints.
//!
//! Turns an inbound `(method, path)` into the protected resources it touches,
//! ready to be handed to a policy-decision engine:
//!
//! - **Registry**: validated, immutable rule table built once at startup
//! - **Classifier**: ordered stage pipeline, first match wins
//! - **Descriptors**: resource kind, sub-kind, business, instance and action
//!
//! ## Quick Start
//!
//! ```rust
//! use procgate::{Classifier, Method, Registry, RequestContext};
//!
//! let registry = Registry::builtin().unwrap();
//! let classifier = Classifier::new(&registry);
//!
//! let ctx = RequestContext::new(Method::Post, "/api/v3/proc/myapp/123");
//! let resources = classifier.classify(&ctx).unwrap();
//! assert_eq!(resources[0].business_id, 123);
//! assert_eq!(resources[0].instance_id, None);
//! ```
//!
//! ## Architecture
//!
//! This facade crate re-exports the following modules:
//!
//! - [`classifier`] - Rule registry and classification pipeline (from `core-classifier`)
//!
//! ## Security
//!
//! - Overlapping rule tables are rejected before they can serve a request
//! - A matched endpoint with a malformed identifier fails instead of
//!   falling through to "unclassified"

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Classification module.
///
/// Re-exports `core_classifier` for rule tables and request classification.
pub mod classifier {
    pub use core_classifier::*;
}

// Convenience re-exports at root level
pub use core_classifier::{
    Action, Classifier, Classify, ClassifyError, Method, Registry, RegistryError,
    RequestContext, ResourceDescriptor, SubKind,
};
