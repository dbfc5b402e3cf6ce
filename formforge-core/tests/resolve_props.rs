//! Property resolution across every registered field kind.

use formforge_core::{
    registry::{self, FieldKind},
    resolve, FieldId, FieldInstance, PropValue, PropertyBag,
};
use rstest::rstest;

fn seeded(kind: FieldKind) -> FieldInstance {
    FieldInstance::from_definition(registry::registry().get(kind))
}

#[rstest]
#[case(FieldKind::Text)]
#[case(FieldKind::Email)]
#[case(FieldKind::Phone)]
#[case(FieldKind::TextArea)]
#[case(FieldKind::DateTime)]
#[case(FieldKind::Dropdown)]
#[case(FieldKind::Checkbox)]
#[case(FieldKind::Radio)]
#[case(FieldKind::Consent)]
#[case(FieldKind::TextBlock)]
#[case(FieldKind::Divider)]
#[case(FieldKind::Submit)]
fn resolve_is_identity_on_fully_populated_instances(#[case] kind: FieldKind) {
    let mut instance = seeded(kind);
    // Overwrite every key with a non-default value of the same shape.
    for value in instance.props.values_mut() {
        *value = match value {
            PropValue::Bool(b) => PropValue::Bool(!*b),
            PropValue::Int(n) => PropValue::Int(*n + 7),
            PropValue::Text(s) => PropValue::Text(format!("{s}-custom")),
            PropValue::Options(opts) => PropValue::Options(opts.iter().rev().cloned().collect()),
        };
    }

    let resolved = resolve(&instance).expect("resolve");
    assert_eq!(resolved.as_bag(), &instance.props);

    let again = FieldInstance {
        props: resolved.clone().into_bag(),
        ..instance.clone()
    };
    assert_eq!(resolve(&again).expect("resolve twice"), resolved);
}

#[rstest]
#[case(FieldKind::Text)]
#[case(FieldKind::Radio)]
#[case(FieldKind::Consent)]
#[case(FieldKind::Submit)]
fn empty_bag_resolves_to_defaults(#[case] kind: FieldKind) {
    let instance = FieldInstance {
        id: FieldId::from("x"),
        type_key: kind.key().to_string(),
        props: PropertyBag::new(),
    };
    let resolved = resolve(&instance).expect("resolve");
    assert_eq!(resolved.as_bag(), &registry::registry().get(kind).defaults);
}

#[test]
fn seeded_instances_never_alias_registry_defaults() {
    let mut a = seeded(FieldKind::Dropdown);
    let b = seeded(FieldKind::Dropdown);
    a.props.insert("options".into(), PropValue::Options(vec![]));

    assert_ne!(a.id, b.id);
    assert_eq!(b.props["options"].as_options().len(), 3);
    assert_eq!(
        registry::registry().get(FieldKind::Dropdown).defaults["options"]
            .as_options()
            .len(),
        3
    );
}
