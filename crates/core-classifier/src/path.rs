//! Path matching using a small segment-token language instead of regular expressions.
//!
//! A pattern is an absolute, `/`-separated path. Each segment is one of:
//! - a literal (`proc`, `v3`, `search`) - matches exactly that text
//! - `*` - a *name* segment: any non-empty segment whose first character is
//!   not whitespace, one character or longer, minus the words reserved at
//!   that position
//! - `#` - an *identifier* segment: any non-empty segment. Whether it holds a
//!   valid integer is decided later by the extractor, so a malformed id
//!   surfaces as a classification failure instead of a silent miss.
//!
//! Matching is anchored at both ends: extra or missing segments never match,
//! and an empty segment (`//`, trailing `/`) makes a path match nothing.
//!
//! ## Reserved words
//!
//! Two sibling patterns of the same length may differ only where one has a
//! literal and the other a `*`, as `/template/proc/*/#` and `/template/*/#/#`
//! do. At the first such position the literal wins: the `*` side reserves
//! that word at that index ([`PathPattern::shadowing_literal`]). A word is
//! never reserved anywhere else, so `POST /api/v3/proc/search/123` is still
//! a name for `/api/v3/proc/*/#`.
//!
//! ## Examples
//! - `/api/v3/proc/*/#` - create a process under an application
//! - `/api/v3/proc/module/*/#/#/*` - bind a module to a process

use crate::error::{RegistryError, Result};
use crate::MAX_PATTERN_LENGTH;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One compiled pattern segment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Exact text
    Literal(String),
    /// `*`: any name, one character or longer
    Name,
    /// `#`: numeric identifier position
    Id,
}

impl Segment {
    fn accepts(&self, index: usize, part: &str, reserved: &ReservedWords) -> bool {
        if part.is_empty() {
            return false;
        }
        match self {
            Self::Literal(text) => text == part,
            Self::Name => {
                part.chars().next().is_some_and(|c| !c.is_whitespace())
                    && !reserved.contains(index, part)
            }
            Self::Id => true,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Name => f.write_str("*"),
            Self::Id => f.write_str("#"),
        }
    }
}

/// Words a `*` segment must not match, keyed by segment index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedWords(BTreeMap<usize, BTreeSet<String>>);

impl ReservedWords {
    /// No reserved words; `*` accepts any non-blank segment
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Reserve `word` at segment `index`; returns `false` if it already was
    pub fn insert(&mut self, index: usize, word: impl Into<String>) -> bool {
        self.0.entry(index).or_default().insert(word.into())
    }

    /// Whether `word` is reserved at `index`
    #[must_use]
    pub fn contains(&self, index: usize, word: &str) -> bool {
        self.0.get(&index).is_some_and(|words| words.contains(word))
    }

    /// Total number of reserved (index, word) pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    /// Whether nothing is reserved
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// Iterate as (index, word), ordered by index then word
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0
            .iter()
            .flat_map(|(index, words)| words.iter().map(move |w| (*index, w.as_str())))
    }
}

/// Compiled path pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathPattern {
    pattern: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern
    ///
    /// # Errors
    ///
    /// - `RegistryError::PatternTooLong` if the pattern exceeds `MAX_PATTERN_LENGTH`
    /// - `RegistryError::InvalidPattern` if it is not absolute, has an empty
    ///   segment, or a segment is neither a literal, `*` nor `#`
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();

        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(RegistryError::PatternTooLong {
                max: MAX_PATTERN_LENGTH,
                length: pattern.len(),
            });
        }

        let invalid = |reason: &str| RegistryError::InvalidPattern {
            pattern: pattern.clone(),
            reason: reason.to_string(),
        };

        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| invalid("pattern must start with '/'"))?;

        let mut segments = Vec::new();
        for part in rest.split('/') {
            let segment = match part {
                "" => return Err(invalid("empty segment")),
                "*" => Segment::Name,
                "#" => Segment::Id,
                text if text.bytes().all(is_literal_byte) => Segment::Literal(text.to_string()),
                _ => return Err(invalid("segments must be literals, '*' or '#'")),
            };
            segments.push(segment);
        }

        Ok(Self { pattern, segments })
    }

    /// Check if a full request path matches this pattern
    #[must_use]
    pub fn matches(&self, path: &str, reserved: &ReservedWords) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };

        let mut parts = rest.split('/');
        for (index, segment) in self.segments.iter().enumerate() {
            match parts.next() {
                Some(part) if segment.accepts(index, part, reserved) => {}
                _ => return false,
            }
        }

        // anchored: nothing may follow the last pattern segment
        parts.next().is_none()
    }

    /// The literal of `other` that a `*` of `self` must give way to
    ///
    /// Returns `(index, word)` when both patterns have the same length, agree
    /// on every position where both are literals, `other` has no literal
    /// where `self` has a `#`, and the first position where one has a literal
    /// and the other a `*` has the `*` in `self`. Patterns that already
    /// differ on a literal never shadow each other; pairs that cannot be
    /// separated this way are left to the registry's overlap check.
    #[must_use]
    pub fn shadowing_literal<'o>(&self, other: &'o Self) -> Option<(usize, &'o str)> {
        if self.segments.len() != other.segments.len() {
            return None;
        }

        let mut first = None;
        for (index, pair) in self.segments.iter().zip(&other.segments).enumerate() {
            match pair {
                (Segment::Literal(a), Segment::Literal(b)) if a != b => return None,
                (Segment::Id, Segment::Literal(_)) => return None,
                (Segment::Name, Segment::Literal(word)) if first.is_none() => {
                    first = Some(Some((index, word.as_str())));
                }
                (Segment::Literal(_), Segment::Name) if first.is_none() => first = Some(None),
                _ => {}
            }
        }
        first.flatten()
    }

    /// Whether some path could match both patterns under the given reservations
    #[must_use]
    pub fn may_overlap(&self, other: &Self, own: &ReservedWords, theirs: &ReservedWords) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .enumerate()
                .all(|(index, pair)| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Name, Segment::Literal(word)) => !own.contains(index, word),
                    (Segment::Literal(word), Segment::Name) => !theirs.contains(index, word),
                    _ => true,
                })
    }

    /// Compiled segments in order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment at `index`
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Literal segments of this pattern
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Literal(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Get the pattern string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

fn is_literal_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'~' | b'-')
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl TryFrom<String> for PathPattern {
    type Error = RegistryError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for PathPattern {
    type Error = RegistryError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl From<PathPattern> for String {
    fn from(p: PathPattern) -> Self {
        p.pattern
    }
}
