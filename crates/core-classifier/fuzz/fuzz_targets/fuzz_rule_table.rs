//! Fuzz target for Registry::from_toml
//!
//! Arbitrary rule tables must either be rejected or produce a registry that
//! upholds its construction limits.

#![no_main]

use core_classifier::{Registry, MAX_PATTERN_LENGTH, MAX_RULES};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(registry) = Registry::from_toml(data) else {
        return;
    };

    assert!(registry.rule_count() > 0, "empty registry accepted");
    assert!(registry.rule_count() <= MAX_RULES, "rule limit exceeded");

    let rules: Vec<_> = registry.rules().map(|(_, r)| r).collect();
    for (i, rule) in rules.iter().enumerate() {
        assert!(rule.pattern().as_str().len() <= MAX_PATTERN_LENGTH);
        for other in &rules[i + 1..] {
            assert!(!rule.may_overlap(other), "overlapping rules accepted");
        }
    }
});
