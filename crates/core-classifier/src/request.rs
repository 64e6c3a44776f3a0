//! Per-call request input
//!
//! A [`RequestContext`] is created by the HTTP layer once per inbound call and
//! is read-only to the classifier.

use crate::error::UnknownMethod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP method of an inbound call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl Method {
    /// Upper-case wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Immutable input for one classification
///
/// `segments` is the path split on `/` with empty components removed;
/// index 0 is the first component after the root.
///
/// ```
/// use core_classifier::{Method, RequestContext};
///
/// let ctx = RequestContext::new(Method::Post, "/api/v3/proc/myapp/123");
/// assert_eq!(ctx.segment(0), Some("api"));
/// assert_eq!(ctx.segment(4), Some("123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    method: Method,
    path: String,
    segments: Vec<String>,
}

impl RequestContext {
    /// Build a context from a raw path, splitting it into segments
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let segments = split_segments(&path);
        Self {
            method,
            path,
            segments,
        }
    }

    /// Build a context from segments the HTTP layer has already split
    ///
    /// Empty segments are dropped so the indexing contract holds regardless
    /// of how the caller split the path.
    #[must_use]
    pub fn from_parts(method: Method, path: impl Into<String>, segments: Vec<String>) -> Self {
        let segments = segments.into_iter().filter(|s| !s.is_empty()).collect();
        Self {
            method,
            path: path.into(),
            segments,
        }
    }

    /// Request method
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Full request path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All non-empty path segments
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segment at `index`, if present
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
