use core_classifier::{Classifier, Method, Registry, RequestContext, ReservedWords};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Registry whose single stage holds `n` disjoint rules
fn create_wide_registry(n: usize) -> Registry {
    let mut toml = String::from("[[stages]]\nname = \"bulk\"\n");
    for i in 0..n {
        toml.push_str(&format!(
            "\n[[stages.rules]]\nname = \"rule {i}\"\nmethod = \"GET\"\npattern = \"/api/v3/r{i}/*/#\"\nsub_kind = \"Process\"\naction = \"Find\"\nbusiness = 4\n"
        ));
    }
    Registry::from_toml(&toml).unwrap()
}

fn benchmark_builtin_classification(c: &mut Criterion) {
    let registry = Registry::builtin().unwrap();
    let classifier = Classifier::new(&registry);

    let first_rule = RequestContext::new(Method::Post, "/api/v3/proc/myapp/123");
    let last_stage = RequestContext::new(Method::Delete, "/api/v3/template/proc/myapp/5");
    let unclassified = RequestContext::new(Method::Get, "/api/v3/unknown/thing");
    let malformed = RequestContext::new(Method::Put, "/api/v3/proc/myapp/abc/456");

    c.bench_function("classify_first_rule", |b| {
        b.iter(|| classifier.classify(black_box(&first_rule)));
    });

    c.bench_function("classify_last_stage", |b| {
        b.iter(|| classifier.classify(black_box(&last_stage)));
    });

    c.bench_function("classify_unclassified", |b| {
        b.iter(|| classifier.classify(black_box(&unclassified)));
    });

    c.bench_function("classify_malformed_id", |b| {
        b.iter(|| classifier.classify(black_box(&malformed)));
    });
}

fn benchmark_registry_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_registry_width");

    for n in [10, 100, 1000].iter() {
        let registry = create_wide_registry(*n);
        let classifier = Classifier::new(&registry);
        // worst case: the request only matches the last rule
        let ctx = RequestContext::new(Method::Get, format!("/api/v3/r{}/app/7", n - 1));

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| classifier.classify(black_box(&ctx)));
        });
    }

    group.finish();
}

fn benchmark_pattern_matching(c: &mut Criterion) {
    let registry = Registry::builtin().unwrap();
    let rule = registry.rule("update process config template version").unwrap();
    let reserved = rule.reserved_words();
    let pattern = rule.pattern();

    c.bench_function("pattern_match_hit", |b| {
        b.iter(|| pattern.matches(black_box("/api/v3/template/version/myapp/1/2/3"), reserved));
    });

    c.bench_function("pattern_match_reserved_miss", |b| {
        b.iter(|| pattern.matches(black_box("/api/v3/template/version/search/1/2/3"), reserved));
    });

    c.bench_function("pattern_match_no_reserved", |b| {
        let none = ReservedWords::none();
        b.iter(|| pattern.matches(black_box("/api/v3/template/version/myapp/1/2/3"), &none));
    });
}

fn benchmark_registry_build(c: &mut Criterion) {
    c.bench_function("registry_builtin_build", |b| {
        b.iter(|| Registry::builtin().unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_builtin_classification,
    benchmark_registry_width,
    benchmark_pattern_matching,
    benchmark_registry_build
);
criterion_main!(benches);
