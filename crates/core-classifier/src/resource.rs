//! Resource descriptors handed to the policy-decision engine
//!
//! - `Action`: what the request does
//! - `ResourceKind` / `SubKind`: what it does it to
//! - `ResourceDescriptor`: one protected resource, scoped to a business
//!
//! [`build`] is the only constructor used by the pipeline; it is a pure
//! function of a rule's recipe and the identifiers extracted from the path.

use crate::extract::ExtractedParams;
use crate::rule::Rule;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action verb implied by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Create one object
    Create,
    /// Read one object
    Find,
    /// Read a collection
    FindMany,
    /// Update one object
    Update,
    /// Update a collection
    UpdateMany,
    /// Delete one object
    Delete,
    /// Delete a collection
    DeleteMany,
}

impl Action {
    /// Canonical name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Find => "Find",
            Self::FindMany => "FindMany",
            Self::Update => "Update",
            Self::UpdateMany => "UpdateMany",
            Self::Delete => "Delete",
            Self::DeleteMany => "DeleteMany",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level resource kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ResourceKind {
    /// Process management
    #[default]
    Process,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process => f.write_str("Process"),
        }
    }
}

/// Named sub-kind within a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubKind {
    /// A process
    Process,
    /// A process config template
    ProcessConfigTemplate,
    /// A version of a process config template
    ProcessConfigTemplateVersion,
    /// A template bound to a process
    ProcessBoundConfig,
}

impl SubKind {
    /// Name carried in the descriptor
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Process => "Process",
            Self::ProcessConfigTemplate => "ProcessConfigTemplate",
            Self::ProcessConfigTemplateVersion => "ProcessConfigTemplateVersion",
            Self::ProcessBoundConfig => "ProcessBoundConfig",
        }
    }
}

impl fmt::Display for SubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One protected resource targeted by a request
///
/// `instance_id` is `None` for collection-scope actions (create, batch
/// update, search).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Resource kind
    pub kind: ResourceKind,
    /// Sub-kind name
    pub name: SubKind,
    /// Addressed instance, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<i64>,
    /// Owning business
    pub business_id: i64,
    /// Action verb
    pub action: Action,
}

impl ResourceDescriptor {
    /// Whether this descriptor addresses a single instance
    #[must_use]
    pub const fn is_instance_scoped(&self) -> bool {
        self.instance_id.is_some()
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} biz={}",
            self.kind, self.name, self.action, self.business_id
        )?;
        if let Some(id) = self.instance_id {
            write!(f, " instance={id}")?;
        }
        Ok(())
    }
}

/// Assemble the descriptor for a matched rule
#[must_use]
pub fn build(rule: &Rule, params: &ExtractedParams) -> ResourceDescriptor {
    let recipe = rule.recipe();
    ResourceDescriptor {
        kind: recipe.kind,
        name: recipe.sub_kind,
        instance_id: recipe.instance.and(params.instance_id),
        business_id: params.business_id,
        action: recipe.action,
    }
}
