//! Classification pipeline
//!
//! Walks the registry's stages in order and each stage's rules in order.
//! The first rule whose method and pattern match ends the pipeline:
//! - extraction succeeds → one descriptor is produced
//! - extraction fails → the request fails and no later stage is tried
//!
//! A stage with no matching rule is not a failure; the scan falls through to
//! the next stage. When nothing matches the result is an empty list, which
//! the caller reads as "endpoint not authorization-gated".

use crate::error::ClassifyError;
use crate::extract::extract;
use crate::registry::Registry;
use crate::request::RequestContext;
use crate::resource::{build, ResourceDescriptor};
use crate::rule::{Rule, Stage};

/// Outcome of one classification
pub type Classification = Result<Vec<ResourceDescriptor>, ClassifyError>;

/// Observer notified of every rule evaluation
///
/// Useful for diagnostics and for asserting stage order in tests.
pub trait RuleObserver {
    /// Called once per evaluated rule, in scan order
    fn rule_evaluated(&self, stage: &Stage, rule: &Rule, matched: bool);
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoObserver;

impl RuleObserver for NoObserver {
    fn rule_evaluated(&self, _stage: &Stage, _rule: &Rule, _matched: bool) {}
}

/// Runs requests through a shared [`Registry`]
///
/// ## Example
///
/// ```
/// use core_classifier::{Action, Classifier, Method, Registry, RequestContext};
///
/// let registry = Registry::builtin().unwrap();
/// let classifier = Classifier::new(&registry);
///
/// let ctx = RequestContext::new(Method::Get, "/api/v3/proc/myapp/123/456");
/// let resources = classifier.classify(&ctx).unwrap();
/// assert_eq!(resources[0].business_id, 123);
/// assert_eq!(resources[0].instance_id, Some(456));
/// assert_eq!(resources[0].action, Action::FindMany);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    registry: &'a Registry,
}

impl<'a> Classifier<'a> {
    /// Create a classifier over `registry`
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// The registry being scanned
    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Classify a request
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidId` when a rule matches but one of its
    /// identifier segments is not a valid non-negative integer.
    pub fn classify(&self, ctx: &RequestContext) -> Classification {
        self.classify_observed(ctx, &NoObserver)
    }

    /// Classify a request, reporting every rule evaluation to `observer`
    ///
    /// # Errors
    ///
    /// Same as [`Classifier::classify`].
    pub fn classify_observed(
        &self,
        ctx: &RequestContext,
        observer: &dyn RuleObserver,
    ) -> Classification {
        let Some((stage, rule)) = self.scan(ctx, observer) else {
            tracing::debug!(method = %ctx.method(), path = ctx.path(), "Request unclassified");
            return Ok(Vec::new());
        };

        let params = extract(rule, ctx.segments())?;
        let descriptor = build(rule, &params);

        tracing::debug!(
            stage = stage.name(),
            rule = rule.name(),
            resource = %descriptor,
            "Request classified"
        );

        Ok(vec![descriptor])
    }

    /// The stage and rule that would handle `ctx`, without extracting identifiers
    #[must_use]
    pub fn matching_rule(&self, ctx: &RequestContext) -> Option<(&'a Stage, &'a Rule)> {
        self.scan(ctx, &NoObserver)
    }

    fn scan(
        &self,
        ctx: &RequestContext,
        observer: &dyn RuleObserver,
    ) -> Option<(&'a Stage, &'a Rule)> {
        for stage in self.registry.stages() {
            for rule in stage.rules() {
                let matched = self.registry.rule_matches(rule, ctx.method(), ctx.path());
                tracing::trace!(stage = stage.name(), rule = rule.name(), matched, "Rule evaluated");
                observer.rule_evaluated(stage, rule, matched);
                if matched {
                    return Some((stage, rule));
                }
            }
        }
        None
    }
}

/// Anything that can turn a request into resource descriptors
///
/// Policy-side code should depend on this trait rather than on `Classifier`.
pub trait Classify {
    /// Classify a request
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError` if the request addresses a known endpoint with
    /// malformed identifiers.
    fn classify(&self, ctx: &RequestContext) -> Classification;
}

impl<'a> Classify for Classifier<'a> {
    fn classify(&self, ctx: &RequestContext) -> Classification {
        Classifier::classify(self, ctx)
    }
}
