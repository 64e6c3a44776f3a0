//! Rules, extraction recipes and stages
//!
//! A [`Rule`] recognises one endpoint shape: a method, a [`PathPattern`] and
//! a [`Recipe`] saying which segments carry identifiers and which resource
//! the endpoint touches. Rules are grouped into ordered [`Stage`]s.

use crate::error::{RegistryError, Result};
use crate::path::{PathPattern, ReservedWords, Segment};
use crate::request::Method;
use crate::resource::{Action, ResourceKind, SubKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meaning of an identifier segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdRole {
    /// Owning business (tenant)
    Business,
    /// A process
    Process,
    /// A process config template
    Template,
    /// A template version
    Version,
}

impl fmt::Display for IdRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Business => "business id",
            Self::Process => "process id",
            Self::Template => "template id",
            Self::Version => "version id",
        })
    }
}

/// Identifier role bound to a segment index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdSlot {
    /// What the identifier means
    pub role: IdRole,
    /// Segment index (0 = first segment after the root)
    pub index: usize,
}

impl IdSlot {
    /// Create a slot
    #[must_use]
    pub const fn new(role: IdRole, index: usize) -> Self {
        Self { role, index }
    }
}

/// Static extraction and build metadata of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Resource kind
    #[serde(default)]
    pub kind: ResourceKind,
    /// Resource sub-kind
    pub sub_kind: SubKind,
    /// Action verb
    pub action: Action,
    /// Segment index of the business id
    pub business: usize,
    /// Segment that addresses a single instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<IdSlot>,
    /// Additional identifiers that must be valid but are not the instance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<IdSlot>,
}

impl Recipe {
    /// All identifier slots in extraction order: business, instance, secondary
    pub fn slots(&self) -> impl Iterator<Item = IdSlot> + '_ {
        std::iter::once(IdSlot::new(IdRole::Business, self.business))
            .chain(self.instance)
            .chain(self.secondary.iter().copied())
    }
}

/// A (method, pattern, recipe) triple
///
/// Reserved words start empty and are assigned when the rule joins a
/// [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RuleRaw")]
pub struct Rule {
    name: String,
    method: Method,
    pattern: PathPattern,
    recipe: Recipe,
    reserved: ReservedWords,
}

/// Raw rule as it appears in a rule table (internal use only)
#[derive(Debug, Clone, Deserialize)]
struct RuleRaw {
    name: String,
    method: Method,
    pattern: PathPattern,
    #[serde(flatten)]
    recipe: Recipe,
}

impl TryFrom<RuleRaw> for Rule {
    type Error = RegistryError;

    fn try_from(raw: RuleRaw) -> Result<Self> {
        Self::new(raw.name, raw.method, raw.pattern, raw.recipe)
    }
}

impl Rule {
    /// Create a rule, checking its recipe against its pattern
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidRecipe` if a slot index does not
    /// address a `#` segment of `pattern`, two slots share an index, or a
    /// `#` segment is read by no slot.
    pub fn new(
        name: impl Into<String>,
        method: Method,
        pattern: PathPattern,
        recipe: Recipe,
    ) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| RegistryError::InvalidRecipe {
            rule: name.clone(),
            reason,
        };

        let mut seen: Vec<usize> = Vec::with_capacity(3);
        for slot in recipe.slots() {
            if pattern.segment(slot.index) != Some(&Segment::Id) {
                return Err(invalid(format!(
                    "{} index {} does not address a '#' segment of `{}`",
                    slot.role, slot.index, pattern
                )));
            }
            if seen.contains(&slot.index) {
                return Err(invalid(format!(
                    "{} reads segment {} which is already used by another identifier",
                    slot.role, slot.index
                )));
            }
            seen.push(slot.index);
        }

        let unread = pattern
            .segments()
            .iter()
            .enumerate()
            .find(|(index, segment)| **segment == Segment::Id && !seen.contains(index));
        if let Some((index, _)) = unread {
            return Err(invalid(format!(
                "'#' segment {index} of `{pattern}` is not read by any identifier"
            )));
        }

        Ok(Self {
            name,
            method,
            pattern,
            recipe,
            reserved: ReservedWords::none(),
        })
    }

    /// Rule name, used as the operation text of failures
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required method
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Compiled pattern
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Extraction and build recipe
    #[must_use]
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Words this rule's `*` segments give way to
    #[must_use]
    pub fn reserved_words(&self) -> &ReservedWords {
        &self.reserved
    }

    pub(crate) fn reserve(&mut self, index: usize, word: &str) {
        self.reserved.insert(index, word);
    }

    /// Method equality plus anchored path match
    #[must_use]
    pub fn matches(&self, method: Method, path: &str) -> bool {
        self.method == method && self.pattern.matches(path, &self.reserved)
    }

    /// Whether some request could match both rules
    #[must_use]
    pub fn may_overlap(&self, other: &Self) -> bool {
        self.method == other.method
            && self
                .pattern
                .may_overlap(&other.pattern, &self.reserved, &other.reserved)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.pattern, self.name)
    }
}

/// Named, ordered group of rules for one resource sub-domain
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stage {
    name: String,
    #[serde(default)]
    rules: Vec<Rule>,
}

impl Stage {
    /// Create a stage
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Stage name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in scan order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn rules_mut(&mut self) -> &mut [Rule] {
        &mut self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(business: usize, instance: Option<IdSlot>) -> Recipe {
        Recipe {
            kind: ResourceKind::Process,
            sub_kind: SubKind::Process,
            action: Action::Find,
            business,
            instance,
            secondary: Vec::new(),
        }
    }

    #[test]
    fn test_recipe_must_address_id_segment() {
        let pattern = PathPattern::new("/api/v3/proc/*/#").unwrap();
        let err = Rule::new("create", Method::Post, pattern, recipe(3, None)).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRecipe { .. }));
    }

    #[test]
    fn test_recipe_rejects_shared_index() {
        let pattern = PathPattern::new("/api/v3/proc/template/*/#/#").unwrap();
        let slot = IdSlot::new(IdRole::Template, 5);
        let err = Rule::new("preview", Method::Get, pattern, recipe(5, Some(slot))).unwrap_err();
        assert!(err.to_string().contains("already used"));
    }

    #[test]
    fn test_every_id_segment_must_be_read() {
        let pattern = PathPattern::new("/api/v3/template/proc/*/#/#/#").unwrap();
        let mut r = recipe(5, None);
        r.secondary = vec![IdSlot::new(IdRole::Process, 6)];
        let err = Rule::new("bind", Method::Put, pattern.clone(), r.clone()).unwrap_err();
        assert!(err.to_string().contains("'#' segment 7"), "{err}");

        r.secondary.push(IdSlot::new(IdRole::Template, 7));
        assert!(Rule::new("bind", Method::Put, pattern, r).is_ok());
    }

    #[test]
    fn test_slots_order() {
        let mut r = recipe(4, Some(IdSlot::new(IdRole::Process, 5)));
        r.secondary = vec![IdSlot::new(IdRole::Template, 6)];
        let roles: Vec<_> = r.slots().map(|s| s.role).collect();
        assert_eq!(roles, [IdRole::Business, IdRole::Process, IdRole::Template]);
    }
}
