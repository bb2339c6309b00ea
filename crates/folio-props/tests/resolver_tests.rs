//! Tests for the resolution cascade over the XSL-FO property table.

use std::sync::Arc;

use folio_dom::NodeId;
use folio_props::registry::PropertyEntry;
use folio_props::{
    apply_attribute, fo_registry, Color, FixedMeasurements, Keyword, Length, NoMeasurements,
    PercentBase, PropertyId, PropertyList, PropertyRegistry, RegistryBuilder, ResolutionError,
    Resolver, Value, ValueKind,
};

/// Build a list for `node` from attribute pairs.
fn node(
    resolver: &Resolver<'_>,
    id: usize,
    element: &str,
    parent: Option<&Arc<PropertyList>>,
    attrs: &[(&str, &str)],
) -> Arc<PropertyList> {
    let mut list = PropertyList::new(NodeId(id), element, parent.cloned());
    for (name, text) in attrs {
        apply_attribute(resolver, &mut list, name, text).unwrap();
    }
    Arc::new(list)
}

fn pt(points: f64) -> Value {
    Value::length(Length::from_points(points))
}

fn registry() -> PropertyRegistry {
    fo_registry().unwrap()
}

#[test]
fn test_explicit_beats_inherited() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[("color", "red")]);
    let block = node(&resolver, 1, "fo:block", Some(&root), &[("color", "blue")]);
    let inline = node(&resolver, 2, "fo:inline", Some(&block), &[]);

    let color = |list: &PropertyList| resolver.resolve(PropertyId::Color, list, true, true);
    assert_eq!(color(&root), Ok(Value::color(Color::rgb(255, 0, 0))));
    assert_eq!(color(&block), Ok(Value::color(Color::rgb(0, 0, 255))));
    assert_eq!(color(&inline), Ok(Value::color(Color::rgb(0, 0, 255))));
}

#[test]
fn test_non_inherited_property_uses_initial_value() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[("background-color", "yellow")]);
    let block = node(&resolver, 1, "fo:block", Some(&root), &[]);

    assert_eq!(
        resolver.resolve(PropertyId::BackgroundColor, &block, true, true),
        Ok(Value::color(Color::TRANSPARENT))
    );
}

#[test]
fn test_explicit_beats_shorthand() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(
        &resolver,
        0,
        "fo:block",
        None,
        &[("margin", "4pt"), ("margin-top", "1pt")],
    );

    assert_eq!(resolver.resolve(PropertyId::MarginTop, &block, true, true), Ok(pt(1.0)));
    assert_eq!(resolver.resolve(PropertyId::MarginBottom, &block, true, true), Ok(pt(4.0)));
}

#[test]
fn test_unset_shorthand_has_no_value() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(&resolver, 0, "fo:block", None, &[]);

    assert!(matches!(
        resolver.resolve(PropertyId::Margin, &block, true, true),
        Err(ResolutionError::NoConversion { property: PropertyId::Margin, .. })
    ));
}

#[test]
fn test_without_default_unspecified_property_has_no_value() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[("color", "red")]);
    let block = node(&resolver, 1, "fo:block", Some(&root), &[]);

    assert!(matches!(
        resolver.resolve(PropertyId::Color, &block, false, false),
        Err(ResolutionError::NoConversion { .. })
    ));
    assert_eq!(
        resolver.resolve(PropertyId::Color, &block, true, false),
        Ok(Value::color(Color::rgb(255, 0, 0)))
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[("font-size", "10pt")]);
    let block = node(
        &resolver,
        1,
        "fo:block",
        Some(&root),
        &[("space-before", "2em"), ("border", "thin solid")],
    );

    for id in [
        PropertyId::SpaceBefore,
        PropertyId::MarginTop,
        PropertyId::BorderLeftWidth,
        PropertyId::BorderLeftColor,
        PropertyId::FontSize,
    ] {
        let first = resolver.resolve(id, &block, true, true);
        let second = resolver.resolve(id, &block, true, true);
        assert_eq!(first, second, "{id}");
    }
}

#[test]
fn test_percentage_against_measurements() {
    let registry = registry();
    let measurements = FixedMeasurements::new()
        .with(PercentBase::ContainingBlockWidth, Length::from_points(200.0));
    let measured = Resolver::new(&registry, &measurements);
    let unmeasured = Resolver::new(&registry, &NoMeasurements);
    let block = node(&measured, 0, "fo:block", None, &[("width", "50%")]);

    assert_eq!(measured.resolve(PropertyId::Width, &block, true, true), Ok(pt(100.0)));
    assert_eq!(
        unmeasured.resolve(PropertyId::Width, &block, true, true),
        Ok(Value::length(Length::Percent(50.0)))
    );
}

#[test]
fn test_per_node_measurement_overrides_fallback() {
    let registry = registry();
    let measurements = FixedMeasurements::new()
        .with(PercentBase::ContainingBlockWidth, Length::from_points(200.0))
        .with_node(NodeId(1), PercentBase::ContainingBlockWidth, Length::from_points(80.0));
    let resolver = Resolver::new(&registry, &measurements);
    let root = node(&resolver, 0, "fo:root", None, &[]);
    let block = node(&resolver, 1, "fo:block", Some(&root), &[("margin-left", "25%")]);

    assert_eq!(resolver.resolve(PropertyId::MarginLeft, &block, true, true), Ok(pt(20.0)));
}

#[test]
fn test_font_size_em_uses_parent_font_size() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[("font-size", "10pt")]);
    let block = node(
        &resolver,
        1,
        "fo:block",
        Some(&root),
        &[("font-size", "2em"), ("line-height", "150%")],
    );
    let inline = node(&resolver, 2, "fo:inline", Some(&block), &[]);

    assert_eq!(resolver.resolve(PropertyId::FontSize, &block, true, true), Ok(pt(20.0)));
    assert_eq!(resolver.resolve(PropertyId::LineHeight, &block, true, true), Ok(pt(30.0)));
    // Inherited as the computed length, not re-resolved on the child.
    assert_eq!(resolver.resolve(PropertyId::LineHeight, &inline, true, true), Ok(pt(30.0)));
}

#[test]
fn test_em_on_other_properties_uses_own_font_size() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[("font-size", "10pt")]);
    let block = node(
        &resolver,
        1,
        "fo:block",
        Some(&root),
        &[("font-size", "20pt"), ("padding-left", "0.5em")],
    );

    assert_eq!(resolver.resolve(PropertyId::PaddingLeft, &block, true, true), Ok(pt(10.0)));
}

#[test]
fn test_font_size_keywords() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[("font-size", "large")]);

    assert_eq!(
        resolver.resolve(PropertyId::FontSize, &root, true, true),
        Ok(Value::length(Length::Millipoints(14_400)))
    );
}

#[test]
fn test_border_color_defaults_to_color() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[("color", "green")]);
    let block = node(&resolver, 1, "fo:block", Some(&root), &[]);

    assert_eq!(
        resolver.resolve(PropertyId::BorderTopColor, &block, true, true),
        Ok(Value::color(Color::rgb(0, 128, 0)))
    );
}

#[test]
fn test_default_cycle_is_reported() {
    let mut builder = RegistryBuilder::new();
    let _ = builder
        .register(
            PropertyEntry::builder(PropertyId::BorderTopColor)
                .accepts(&[ValueKind::Color])
                .default_from(PropertyId::BorderLeftColor)
                .build(),
        )
        .register(
            PropertyEntry::builder(PropertyId::BorderLeftColor)
                .accepts(&[ValueKind::Color])
                .default_from(PropertyId::BorderTopColor)
                .build(),
        );
    let registry = builder.seal_partial().unwrap();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let list = PropertyList::new(NodeId::ROOT, "fo:block", None);

    assert!(matches!(
        resolver.resolve(PropertyId::BorderTopColor, &list, true, true),
        Err(ResolutionError::CorrespondingCycle {
            property: PropertyId::BorderTopColor,
            ..
        })
    ));
}

#[test]
fn test_inherited_default_from_other_property_uses_requesting_node() {
    let mut builder = RegistryBuilder::new();
    let _ = builder
        .register(
            PropertyEntry::builder(PropertyId::Color)
                .inherited()
                .accepts(&[ValueKind::Color])
                .default_value(Value::color(Color::BLACK))
                .build(),
        )
        .register(
            PropertyEntry::builder(PropertyId::BorderTopColor)
                .inherited()
                .accepts(&[ValueKind::Color])
                .default_from(PropertyId::Color)
                .build(),
        );
    let registry = builder.seal_partial().unwrap();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = Arc::new(PropertyList::new(NodeId::ROOT, "fo:root", None));
    let mut child = PropertyList::new(NodeId(1), "fo:block", Some(Arc::clone(&root)));
    child
        .set_explicit(&registry, PropertyId::Color, Value::color(Color::rgb(255, 0, 0)))
        .unwrap();

    assert_eq!(
        resolver.resolve(PropertyId::BorderTopColor, &child, true, true),
        Ok(Value::color(Color::rgb(255, 0, 0)))
    );
    assert_eq!(
        resolver.resolve(PropertyId::BorderTopColor, &root, true, true),
        Ok(Value::color(Color::BLACK))
    );
}

#[test]
fn test_inherited_percentage_default_uses_requesting_node() {
    let mut builder = RegistryBuilder::new();
    let _ = builder.register(
        PropertyEntry::builder(PropertyId::StartIndent)
            .inherited()
            .accepts(&[ValueKind::Length])
            .percent_base(PercentBase::ContainingBlockWidth)
            .default_value(Value::length(Length::Percent(10.0)))
            .build(),
    );
    let registry = builder.seal_partial().unwrap();
    let measurements = FixedMeasurements::new()
        .with_node(NodeId::ROOT, PercentBase::ContainingBlockWidth, Length::from_points(500.0))
        .with_node(NodeId(1), PercentBase::ContainingBlockWidth, Length::from_points(100.0));
    let resolver = Resolver::new(&registry, &measurements);
    let root = Arc::new(PropertyList::new(NodeId::ROOT, "fo:root", None));
    let child = PropertyList::new(NodeId(1), "fo:block", Some(Arc::clone(&root)));

    assert_eq!(
        resolver.resolve(PropertyId::StartIndent, &child, true, true),
        Ok(pt(10.0))
    );
    assert_eq!(
        resolver.resolve(PropertyId::StartIndent, &root, true, true),
        Ok(pt(50.0))
    );
}

#[test]
fn test_start_indent_accumulates_margin_padding_and_border() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(&resolver, 0, "fo:root", None, &[]);
    let outer = node(&resolver, 1, "fo:block", Some(&root), &[("margin-left", "10pt")]);
    let inner = node(
        &resolver,
        2,
        "fo:block",
        Some(&outer),
        &[
            ("margin-left", "5pt"),
            ("padding-left", "2pt"),
            ("border-left-style", "solid"),
            ("border-left-width", "1pt"),
        ],
    );
    let text = node(&resolver, 3, "fo:inline", Some(&inner), &[]);

    let start = |list: &PropertyList| resolver.resolve(PropertyId::StartIndent, list, true, true);
    assert_eq!(start(&root), Ok(pt(0.0)));
    assert_eq!(start(&outer), Ok(pt(10.0)));
    assert_eq!(start(&inner), Ok(pt(18.0)));
    assert_eq!(start(&text), Ok(pt(18.0)));
}

#[test]
fn test_invisible_border_does_not_count_towards_indent() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(
        &resolver,
        0,
        "fo:block",
        None,
        &[("margin-left", "5pt"), ("border-left-width", "thick")],
    );

    assert_eq!(resolver.resolve(PropertyId::StartIndent, &block, true, true), Ok(pt(5.0)));
}

#[test]
fn test_end_indent_follows_writing_mode() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let root = node(
        &resolver,
        0,
        "fo:root",
        None,
        &[("writing-mode", "rl-tb"), ("margin", "1pt 6pt 1pt 3pt")],
    );

    // Start is on the right in rl-tb.
    assert_eq!(resolver.resolve(PropertyId::StartIndent, &root, true, true), Ok(pt(6.0)));
    assert_eq!(resolver.resolve(PropertyId::EndIndent, &root, true, true), Ok(pt(3.0)));
}

#[test]
fn test_keyword_values_resolve_to_keywords() {
    let registry = registry();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let block = node(&resolver, 0, "fo:block", None, &[("font-weight", "bold")]);

    assert_eq!(
        resolver.resolve(PropertyId::FontWeight, &block, true, true),
        Ok(Value::keyword(Keyword::Bold))
    );
    assert_eq!(
        resolver.resolve(PropertyId::Width, &block, true, true),
        Ok(Value::keyword(Keyword::Auto))
    );
}
