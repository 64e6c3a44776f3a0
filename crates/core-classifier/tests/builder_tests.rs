//! Builder API tests

use core_classifier::{
    Action, Classifier, IdRole, Method, RegistryBuilder, RegistryError, RequestContext,
    ResourceKind, RuleBuilder, StageBuilder, SubKind,
};

fn create_process() -> RuleBuilder {
    RuleBuilder::new()
        .named("create process")
        .method(Method::Post)
        .pattern("/api/v3/proc/*/#")
        .resource(SubKind::Process)
        .action(Action::Create)
        .business_at(4)
}

#[test]
fn test_rule_builder_complete() {
    let rule = RuleBuilder::new()
        .named("bind template to process")
        .method(Method::Put)
        .pattern("/api/v3/template/proc/*/#/#/#")
        .kind(ResourceKind::Process)
        .resource(SubKind::ProcessBoundConfig)
        .action(Action::Create)
        .business_at(5)
        .secondary_at(IdRole::Process, 6)
        .secondary_at(IdRole::Template, 7)
        .build()
        .unwrap();

    assert_eq!(rule.name(), "bind template to process");
    assert_eq!(rule.method(), Method::Put);
    let secondary: Vec<_> = rule.recipe().secondary.iter().map(|s| s.index).collect();
    assert_eq!(secondary, [6, 7]);
    assert!(rule.recipe().instance.is_none());
}

#[test]
fn test_rule_builder_missing_fields() {
    let cases: [(RuleBuilder, &str); 6] = [
        (RuleBuilder::new(), "name"),
        (RuleBuilder::new().named("r"), "method"),
        (RuleBuilder::new().named("r").method(Method::Get), "pattern"),
        (
            RuleBuilder::new().named("r").method(Method::Get).pattern("/a/#"),
            "sub_kind",
        ),
        (
            RuleBuilder::new()
                .named("r")
                .method(Method::Get)
                .pattern("/a/#")
                .resource(SubKind::Process),
            "action",
        ),
        (
            RuleBuilder::new()
                .named("r")
                .method(Method::Get)
                .pattern("/a/#")
                .resource(SubKind::Process)
                .action(Action::Find),
            "business",
        ),
    ];

    for (builder, field) in cases {
        match builder.build() {
            Err(RegistryError::MissingField(missing)) => assert_eq!(missing, field),
            other => panic!("expected MissingField({field}), got {other:?}"),
        }
    }
}

#[test]
fn test_rule_builder_rejects_bad_pattern() {
    let err = create_process().pattern("/api/v3/proc/(.*)").build().unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPattern { .. }));
}

#[test]
fn test_rule_builder_rejects_slot_on_literal() {
    let err = create_process().business_at(2).build().unwrap_err();
    assert!(matches!(err, RegistryError::InvalidRecipe { .. }), "{err}");
}

#[test]
fn test_rule_builder_rejects_unread_id_segment() {
    let err = create_process()
        .pattern("/api/v3/proc/*/#/#")
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidRecipe { .. }), "{err}");
}

#[test]
fn test_registry_builder_classifies() {
    let registry = RegistryBuilder::new()
        .stage_with("process", |stage| {
            stage.rule_with(|_| create_process()).rule_with(|rule| {
                rule.named("update process")
                    .method(Method::Put)
                    .pattern("/api/v3/proc/*/#/#")
                    .resource(SubKind::Process)
                    .action(Action::Update)
                    .business_at(4)
                    .instance_at(IdRole::Process, 5)
            })
        })
        .build()
        .unwrap();

    assert_eq!(registry.rule_count(), 2);

    let classifier = Classifier::new(&registry);
    let ctx = RequestContext::new(Method::Put, "/api/v3/proc/myapp/12/34");
    let d = classifier.classify(&ctx).unwrap().remove(0);
    assert_eq!(d.action, Action::Update);
    assert_eq!(d.business_id, 12);
    assert_eq!(d.instance_id, Some(34));
}

#[test]
fn test_registry_builder_propagates_rule_errors() {
    let result = RegistryBuilder::new()
        .stage_with("process", |stage| {
            stage
                .rule_with(|_| create_process())
                .rule_with(|rule| rule.named("incomplete"))
        })
        .build();

    assert!(matches!(result, Err(RegistryError::MissingField("method"))));
}

#[test]
fn test_registry_builder_rejects_overlap() {
    let result = RegistryBuilder::new()
        .stage(StageBuilder::new("first").rule_with(|_| create_process()))
        .stage(StageBuilder::new("second").rule_with(|_| create_process().named("create again")))
        .build();

    match result {
        Err(RegistryError::OverlappingRules { first, second, method }) => {
            assert_eq!(first, "create process");
            assert_eq!(second, "create again");
            assert_eq!(method, "POST");
        }
        other => panic!("expected OverlappingRules, got {other:?}"),
    }
}

#[test]
fn test_registry_builder_empty() {
    assert!(matches!(
        RegistryBuilder::new().build(),
        Err(RegistryError::EmptyRegistry)
    ));
    assert!(matches!(
        RegistryBuilder::new().stage(StageBuilder::new("empty")).build(),
        Err(RegistryError::EmptyRegistry)
    ));
}
