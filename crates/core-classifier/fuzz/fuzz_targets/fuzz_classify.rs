//! Fuzz target for Classifier::classify
//!
//! Feeds arbitrary paths through the built-in registry. Classification must
//! return Ok or Err without panicking, and any error must name a segment
//! that actually occurs in the request.

#![no_main]

use core_classifier::{Classifier, Method, Registry, RequestContext};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

const METHODS: [Method; 5] = [
    Method::Get,
    Method::Post,
    Method::Put,
    Method::Delete,
    Method::Patch,
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(path) = std::str::from_utf8(rest) else {
        return;
    };

    let registry = REGISTRY.get_or_init(|| Registry::builtin().unwrap());
    let method = METHODS[selector as usize % METHODS.len()];
    let ctx = RequestContext::new(method, path);

    match Classifier::new(registry).classify(&ctx) {
        Ok(resources) => {
            assert!(resources.len() <= 1, "more than one descriptor");
            for r in &resources {
                assert!(r.business_id >= 0);
                assert!(r.instance_id.map_or(true, |id| id >= 0));
            }
        }
        Err(err) => {
            assert!(
                ctx.segments().iter().any(|s| s == err.bad_segment()),
                "bad segment not in request"
            );
        }
    }
});
