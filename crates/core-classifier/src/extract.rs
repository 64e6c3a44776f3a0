//! Identifier extraction for a matched rule
//!
//! Every slot of the rule's recipe must hold a base-10, non-negative integer
//! that fits in `i64`. There is no default substitution and no partial
//! success: the first bad slot fails the whole classification.

use crate::error::ClassifyError;
use crate::rule::{IdRole, IdSlot, Rule};

/// Identifiers pulled from a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedParams {
    /// Owning business
    pub business_id: i64,
    /// Addressed instance, when the recipe has an instance slot
    pub instance_id: Option<i64>,
    /// Secondary identifiers, in recipe order
    pub secondary_ids: Vec<i64>,
}

/// Extract the recipe's identifiers from `segments`
///
/// Slots are parsed business first, then instance, then each secondary slot.
///
/// # Errors
///
/// Returns `ClassifyError::InvalidId` naming the role and raw segment text
/// when a segment is missing, non-numeric, signed or out of range.
pub fn extract<S: AsRef<str>>(
    rule: &Rule,
    segments: &[S],
) -> Result<ExtractedParams, ClassifyError> {
    let recipe = rule.recipe();

    let business_id = parse_slot(rule, IdSlot::new(IdRole::Business, recipe.business), segments)?;
    let instance_id = recipe
        .instance
        .map(|slot| parse_slot(rule, slot, segments))
        .transpose()?;
    let secondary_ids = recipe
        .secondary
        .iter()
        .map(|slot| parse_slot(rule, *slot, segments))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExtractedParams {
        business_id,
        instance_id,
        secondary_ids,
    })
}

fn parse_slot<S: AsRef<str>>(
    rule: &Rule,
    slot: IdSlot,
    segments: &[S],
) -> Result<i64, ClassifyError> {
    let raw = segments.get(slot.index).map_or("", AsRef::as_ref);

    parse_id(raw).ok_or_else(|| {
        tracing::warn!(
            rule = rule.name(),
            role = %slot.role,
            segment = raw,
            "Malformed identifier in matched request path"
        );
        ClassifyError::InvalidId {
            operation: rule.name().to_string(),
            role: slot.role,
            segment: raw.to_string(),
        }
    })
}

/// Parse a non-negative base-10 integer; `str::parse` alone would accept a sign
fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_digits() {
        assert_eq!(parse_id("0"), Some(0));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id("9223372036854775807"), Some(i64::MAX));
    }

    #[test]
    fn test_parse_id_rejects_non_digits() {
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("+5"), None);
        assert_eq!(parse_id("-5"), None);
        assert_eq!(parse_id("5 "), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1e3"), None);
    }

    #[test]
    fn test_parse_id_rejects_overflow() {
        assert_eq!(parse_id("9223372036854775808"), None);
    }
}
