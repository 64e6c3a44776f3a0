//! Immutable pattern registry
//!
//! A [`Registry`] is an ordered list of [`Stage`]s compiled once at process
//! start. Every way of obtaining one (built-in table, TOML, builder) runs the
//! same validation, so a registry that exists is a registry that is safe to
//! serve with:
//! - every pattern compiled and within `MAX_PATTERN_LENGTH`
//! - at most `MAX_RULES` rules, unique stage and rule names
//! - every recipe slot pointing at a `#` segment of its own pattern
//! - every `#` segment read by exactly one recipe slot
//! - no two rules able to match the same method and path
//!
//! Before the overlap check each rule's `*` segments reserve the literals of
//! sibling rules that would otherwise shadow them (see
//! [`PathPattern::shadowing_literal`](crate::PathPattern::shadowing_literal)).
//! With that in place first-match-wins is independent of stage order for
//! correctly configured tables.

use crate::error::{RegistryError, Result};
use crate::request::Method;
use crate::rule::{Rule, Stage};
use crate::MAX_RULES;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Rule table for the process, process-template and binding endpoints
pub const BUILTIN_RULES: &str = include_str!("../rules/process.toml");

/// Ordered, validated set of stages
///
/// Holds no interior mutability; share it by reference across threads.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RegistryRaw")]
pub struct Registry {
    stages: Vec<Stage>,
}

/// Raw registry structure for deserialization (internal use only)
#[derive(Debug, Clone, Deserialize)]
struct RegistryRaw {
    #[serde(default)]
    stages: Vec<Stage>,
}

impl TryFrom<RegistryRaw> for Registry {
    type Error = RegistryError;

    fn try_from(raw: RegistryRaw) -> Result<Self> {
        Self::new(raw.stages)
    }
}

impl Registry {
    /// Validate `stages` and build a registry
    ///
    /// # Errors
    ///
    /// - `EmptyRegistry` if there are no rules
    /// - `TooManyRules` above `MAX_RULES`
    /// - `DuplicateStage` / `DuplicateRule` for empty or repeated names
    /// - `OverlappingRules` if two rules can match the same request once
    ///   sibling literals are reserved
    pub fn new(mut stages: Vec<Stage>) -> Result<Self> {
        let rule_count: usize = stages.iter().map(|s| s.rules().len()).sum();
        if rule_count == 0 {
            return Err(RegistryError::EmptyRegistry);
        }
        if rule_count > MAX_RULES {
            return Err(RegistryError::TooManyRules {
                max: MAX_RULES,
                attempted: rule_count,
            });
        }

        let mut stage_names = BTreeSet::new();
        for stage in &stages {
            if stage.name().is_empty() || !stage_names.insert(stage.name()) {
                return Err(RegistryError::DuplicateStage(stage.name().to_string()));
            }
        }

        let rules: Vec<&Rule> = stages.iter().flat_map(|s| s.rules()).collect();

        let mut rule_names = BTreeSet::new();
        for rule in &rules {
            if rule.name().is_empty() || !rule_names.insert(rule.name()) {
                return Err(RegistryError::DuplicateRule(rule.name().to_string()));
            }
        }

        let mut reservations: Vec<(usize, usize, String)> = Vec::new();
        for (i, rule) in rules.iter().enumerate() {
            for other in &rules {
                if rule.method() != other.method() {
                    continue;
                }
                if let Some((index, word)) = rule.pattern().shadowing_literal(other.pattern()) {
                    reservations.push((i, index, word.to_string()));
                }
            }
        }

        let flat = stages.iter_mut().flat_map(|s| s.rules_mut().iter_mut());
        for (i, rule) in flat.enumerate() {
            for (_, index, word) in reservations.iter().filter(|(r, _, _)| *r == i) {
                rule.reserve(*index, word);
            }
        }

        let rules: Vec<&Rule> = stages.iter().flat_map(|s| s.rules()).collect();
        for (i, first) in rules.iter().enumerate() {
            if let Some(second) = rules[i + 1..].iter().find(|r| first.may_overlap(r)) {
                return Err(RegistryError::OverlappingRules {
                    first: first.name().to_string(),
                    second: second.name().to_string(),
                    method: first.method().to_string(),
                });
            }
        }

        tracing::info!(
            stages = stages.len(),
            rules = rule_count,
            reserved_words = rules.iter().map(|r| r.reserved_words().len()).sum::<usize>(),
            "Pattern registry built"
        );

        Ok(Self { stages })
    }

    /// Compile the built-in rule table
    ///
    /// # Errors
    ///
    /// Only if the embedded table is broken; callers should treat this as
    /// fatal at startup.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_RULES)
    }

    /// Load and validate a registry from a TOML rule table
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Toml` for syntax errors and for any
    /// validation failure raised while deserializing.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Stages in pipeline order
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stage by name
    #[must_use]
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name() == name)
    }

    /// All rules with their stage, in scan order
    pub fn rules(&self) -> impl Iterator<Item = (&Stage, &Rule)> {
        self.stages
            .iter()
            .flat_map(|stage| stage.rules().iter().map(move |rule| (stage, rule)))
    }

    /// Rule by name
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules().map(|(_, r)| r).find(|r| r.name() == name)
    }

    /// Total number of rules
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.stages.iter().map(|s| s.rules().len()).sum()
    }

    /// Check a request against one rule: method equality plus anchored path match
    #[must_use]
    pub fn rule_matches(&self, rule: &Rule, method: Method, path: &str) -> bool {
        rule.matches(method, path)
    }
}
