//! Tests for relative/absolute corresponding properties.

use std::sync::Arc;

use folio_dom::NodeId;
use folio_props::{
    apply_attribute, fo_registry, Component, Compound, Keyword, Length, NoMeasurements, PropertyId,
    PropertyList, PropertyRegistry, Resolver, Value,
};

fn pt(points: f64) -> Value {
    Value::length(Length::from_points(points))
}

fn node(
    resolver: &Resolver<'_>,
    id: usize,
    parent: Option<&Arc<PropertyList>>,
    attrs: &[(&str, &str)],
) -> Arc<PropertyList> {
    let mut list = PropertyList::new(NodeId(id), "fo:block", parent.cloned());
    for (name, text) in attrs {
        apply_attribute(resolver, &mut list, name, text).unwrap();
    }
    Arc::new(list)
}

fn registry() -> PropertyRegistry {
    fo_registry().unwrap()
}

fn component(value: &Value, component: Component) -> Option<Value> {
    value.as_compound().and_then(|c| c.get(component)).cloned()
}

#[test]
fn test_relative_explicit_sets_absolute() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(&resolver, 0, None, &[("padding-before", "4pt")]);

    assert_eq!(resolver.resolve(PropertyId::PaddingTop, &block, true, true), Ok(pt(4.0)));
    assert_eq!(resolver.resolve(PropertyId::PaddingBottom, &block, true, true), Ok(pt(0.0)));
}

#[test]
fn test_absolute_explicit_wins_over_relative() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(
        &resolver,
        0,
        None,
        &[("padding-before", "4pt"), ("padding-top", "2pt")],
    );

    assert_eq!(resolver.resolve(PropertyId::PaddingTop, &block, true, true), Ok(pt(2.0)));
    assert_eq!(
        resolver.resolve(PropertyId::PaddingBefore, &block, true, true),
        Ok(Value::compound(Compound::new([
            (Component::Length, pt(2.0)),
            (Component::Conditionality, Value::keyword(Keyword::Discard)),
        ])))
    );
}

#[test]
fn test_relative_wins_over_absolute_shorthand() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(
        &resolver,
        0,
        None,
        &[("padding", "1pt"), ("padding-start", "6pt")],
    );

    assert_eq!(resolver.resolve(PropertyId::PaddingLeft, &block, true, true), Ok(pt(6.0)));
    assert_eq!(resolver.resolve(PropertyId::PaddingTop, &block, true, true), Ok(pt(1.0)));
    let before = resolver
        .resolve(PropertyId::PaddingBefore, &block, true, true)
        .unwrap();
    assert_eq!(component(&before, Component::Length), Some(pt(1.0)));
}

/// `margin` on the node must not hide an explicit `space-before`.
#[test]
fn test_space_before_beats_margin_shorthand() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(
        &resolver,
        0,
        None,
        &[("margin", "10pt"), ("space-before", "2pt")],
    );

    assert_eq!(resolver.resolve(PropertyId::MarginTop, &block, true, true), Ok(pt(2.0)));
    assert_eq!(resolver.resolve(PropertyId::MarginBottom, &block, true, true), Ok(pt(10.0)));
    let after = resolver
        .resolve(PropertyId::SpaceAfter, &block, true, true)
        .unwrap();
    assert_eq!(component(&after, Component::Optimum), Some(pt(10.0)));
}

#[test]
fn test_margin_converts_to_space() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(&resolver, 0, None, &[("margin-top", "5pt")]);

    let space = resolver
        .resolve(PropertyId::SpaceBefore, &block, true, true)
        .unwrap();
    assert_eq!(component(&space, Component::Minimum), Some(pt(5.0)));
    assert_eq!(component(&space, Component::Maximum), Some(pt(5.0)));
    assert_eq!(
        component(&space, Component::Precedence),
        Some(Value::keyword(Keyword::Force))
    );
    assert_eq!(
        component(&space, Component::Conditionality),
        Some(Value::keyword(Keyword::Retain))
    );
}

#[test]
fn test_mapping_follows_inherited_writing_mode() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, None, &[("writing-mode", "tb-rl")]);
    let block = node(
        &resolver,
        1,
        Some(&root),
        &[("padding-before", "4pt"), ("border-top-width", "3pt")],
    );

    // before is the right side and start the top side in tb-rl.
    assert_eq!(resolver.resolve(PropertyId::PaddingRight, &block, true, true), Ok(pt(4.0)));
    assert_eq!(resolver.resolve(PropertyId::PaddingTop, &block, true, true), Ok(pt(0.0)));
    assert_eq!(
        resolver.resolve(PropertyId::BorderStartWidth, &block, true, true),
        Ok(pt(3.0))
    );
}

#[test]
fn test_unspecified_pair_uses_initial_values() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(&resolver, 0, None, &[]);

    assert_eq!(
        resolver.resolve(PropertyId::BorderEndWidth, &block, true, true),
        Ok(pt(1.0))
    );
    let before = resolver
        .resolve(PropertyId::SpaceBefore, &block, true, true)
        .unwrap();
    assert_eq!(component(&before, Component::Optimum), Some(pt(0.0)));
}
