//! Builder pattern for ergonomic registry construction

use crate::error::{RegistryError, Result};
use crate::path::PathPattern;
use crate::registry::Registry;
use crate::request::Method;
use crate::resource::{Action, ResourceKind, SubKind};
use crate::rule::{IdRole, IdSlot, Recipe, Rule, Stage};

/// Builder for creating `Rule` instances with a fluent API
///
/// # Examples
///
/// ```
/// use core_classifier::builder::RuleBuilder;
/// use core_classifier::{Action, IdRole, Method, SubKind};
///
/// let rule = RuleBuilder::new()
///     .named("update process")
///     .method(Method::Put)
///     .pattern("/api/v3/proc/*/#/#")
///     .resource(SubKind::Process)
///     .action(Action::Update)
///     .business_at(4)
///     .instance_at(IdRole::Process, 5)
///     .build()
///     .unwrap();
///
/// assert_eq!(rule.name(), "update process");
/// ```
#[derive(Debug, Default, Clone)]
pub struct RuleBuilder {
    name: Option<String>,
    method: Option<Method>,
    pattern: Option<String>,
    kind: ResourceKind,
    sub_kind: Option<SubKind>,
    action: Option<Action>,
    business: Option<usize>,
    instance: Option<IdSlot>,
    secondary: Vec<IdSlot>,
}

impl RuleBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the required HTTP method
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the path pattern (compiled on `build`)
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the resource kind (defaults to `Process`)
    #[must_use]
    pub const fn kind(mut self, kind: ResourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the resource sub-kind
    #[must_use]
    pub const fn resource(mut self, sub_kind: SubKind) -> Self {
        self.sub_kind = Some(sub_kind);
        self
    }

    /// Set the action verb
    #[must_use]
    pub const fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Segment index holding the business id
    #[must_use]
    pub const fn business_at(mut self, index: usize) -> Self {
        self.business = Some(index);
        self
    }

    /// Segment index holding the addressed instance
    #[must_use]
    pub const fn instance_at(mut self, role: IdRole, index: usize) -> Self {
        self.instance = Some(IdSlot::new(role, index));
        self
    }

    /// Add a segment index holding an identifier that must be valid but is not the instance
    #[must_use]
    pub fn secondary_at(mut self, role: IdRole, index: usize) -> Self {
        self.secondary.push(IdSlot::new(role, index));
        self
    }

    /// Build the `Rule`
    ///
    /// # Errors
    ///
    /// - `RegistryError::MissingField` if name, method, pattern, resource,
    ///   action or business index was not set
    /// - any pattern or recipe error from [`PathPattern::new`] / [`Rule::new`]
    pub fn build(self) -> Result<Rule> {
        let name = self.name.ok_or(RegistryError::MissingField("name"))?;
        let method = self.method.ok_or(RegistryError::MissingField("method"))?;
        let pattern = self.pattern.ok_or(RegistryError::MissingField("pattern"))?;
        let sub_kind = self.sub_kind.ok_or(RegistryError::MissingField("sub_kind"))?;
        let action = self.action.ok_or(RegistryError::MissingField("action"))?;
        let business = self.business.ok_or(RegistryError::MissingField("business"))?;

        let recipe = Recipe {
            kind: self.kind,
            sub_kind,
            action,
            business,
            instance: self.instance,
            secondary: self.secondary,
        };

        Rule::new(name, method, PathPattern::new(pattern)?, recipe)
    }
}

/// Builder for one stage
#[derive(Debug, Clone)]
pub struct StageBuilder {
    name: String,
    rules: Vec<RuleBuilder>,
}

impl StageBuilder {
    /// Create a stage builder
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule using a builder function
    #[must_use]
    pub fn rule_with<F>(mut self, f: F) -> Self
    where
        F: FnOnce(RuleBuilder) -> RuleBuilder,
    {
        self.rules.push(f(RuleBuilder::new()));
        self
    }

    fn build(self) -> Result<Stage> {
        let rules = self
            .rules
            .into_iter()
            .map(RuleBuilder::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Stage::new(self.name, rules))
    }
}

/// Builder for creating `Registry` instances with a fluent API
///
/// Any rule that fails to build fails the whole registry.
///
/// # Examples
///
/// ```
/// use core_classifier::{Action, Method, RegistryBuilder, SubKind};
///
/// let registry = RegistryBuilder::new()
///     .stage_with("process", |stage| {
///         stage.rule_with(|rule| {
///             rule.named("create process")
///                 .method(Method::Post)
///                 .pattern("/api/v3/proc/*/#")
///                 .resource(SubKind::Process)
///                 .action(Action::Create)
///                 .business_at(4)
///         })
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.rule_count(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RegistryBuilder {
    stages: Vec<StageBuilder>,
}

impl RegistryBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage using a builder function
    #[must_use]
    pub fn stage_with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(StageBuilder) -> StageBuilder,
    {
        self.stages.push(f(StageBuilder::new(name)));
        self
    }

    /// Append a pre-built stage builder
    #[must_use]
    pub fn stage(mut self, stage: StageBuilder) -> Self {
        self.stages.push(stage);
        self
    }

    /// Build and validate the registry
    ///
    /// # Errors
    ///
    /// Returns the first rule-level error, or any validation error from
    /// [`Registry::new`].
    pub fn build(self) -> Result<Registry> {
        let stages = self
            .stages
            .into_iter()
            .map(StageBuilder::build)
            .collect::<Result<Vec<_>>>()?;
        Registry::new(stages)
    }
}
