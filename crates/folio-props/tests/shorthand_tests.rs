//! Tests for shorthand expansion.

use folio_dom::NodeId;
use folio_props::{
    apply_attribute, fo_registry, Color, Component, Keyword, Length, NoMeasurements, PropertyId,
    PropertyList, ResolutionError, Resolver, Value,
};

fn pt(points: f64) -> Value {
    Value::length(Length::from_points(points))
}

fn resolve_all(attrs: &[(&str, &str)], ids: &[PropertyId]) -> Vec<Result<Value, ResolutionError>> {
    let registry = fo_registry().unwrap();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let mut list = PropertyList::new(NodeId::ROOT, "fo:block", None);
    for (name, text) in attrs {
        apply_attribute(&resolver, &mut list, name, text).unwrap();
    }
    ids.iter()
        .map(|id| resolver.resolve(*id, &list, true, true))
        .collect()
}

const MARGINS: [PropertyId; 4] = [
    PropertyId::MarginTop,
    PropertyId::MarginRight,
    PropertyId::MarginBottom,
    PropertyId::MarginLeft,
];

#[test]
fn test_positional_one_value() {
    assert_eq!(
        resolve_all(&[("margin", "3pt")], &MARGINS),
        vec![Ok(pt(3.0)), Ok(pt(3.0)), Ok(pt(3.0)), Ok(pt(3.0))]
    );
}

#[test]
fn test_positional_two_values() {
    assert_eq!(
        resolve_all(&[("margin", "4pt 8pt")], &MARGINS),
        vec![Ok(pt(4.0)), Ok(pt(8.0)), Ok(pt(4.0)), Ok(pt(8.0))]
    );
}

#[test]
fn test_positional_three_values() {
    assert_eq!(
        resolve_all(&[("margin", "4pt 8pt 12pt")], &MARGINS),
        vec![Ok(pt(4.0)), Ok(pt(8.0)), Ok(pt(12.0)), Ok(pt(8.0))]
    );
}

#[test]
fn test_positional_four_values() {
    assert_eq!(
        resolve_all(
            &[("padding", "1pt 2pt 3pt 4pt")],
            &[PropertyId::PaddingLeft, PropertyId::PaddingTop]
        ),
        vec![Ok(pt(4.0)), Ok(pt(1.0))]
    );
}

#[test]
fn test_positional_wrong_count_is_invalid() {
    let results = resolve_all(&[("margin", "1pt 2pt 3pt 4pt 5pt")], &[PropertyId::MarginTop]);
    assert!(matches!(
        results[0],
        Err(ResolutionError::InvalidShorthandComponent {
            shorthand: PropertyId::Margin,
            property: PropertyId::MarginTop,
            ..
        })
    ));
}

#[test]
fn test_positional_unconvertible_token_is_invalid() {
    let results = resolve_all(&[("border-width", "thin wide")], &[PropertyId::BorderRightWidth]);
    assert!(matches!(
        results[0],
        Err(ResolutionError::InvalidShorthandComponent { .. })
    ));
}

#[test]
fn test_border_by_type_in_any_order() {
    let ids = [
        PropertyId::BorderBottomWidth,
        PropertyId::BorderBottomStyle,
        PropertyId::BorderBottomColor,
    ];
    let expected = vec![
        Ok(pt(2.0)),
        Ok(Value::keyword(Keyword::Dashed)),
        Ok(Value::color(Color::rgb(255, 0, 0))),
    ];
    assert_eq!(resolve_all(&[("border", "red dashed 2pt")], &ids), expected);
    assert_eq!(resolve_all(&[("border", "2pt dashed red")], &ids), expected);
}

#[test]
fn test_border_missing_part_falls_back() {
    let results = resolve_all(
        &[("color", "blue"), ("border-top", "solid")],
        &[PropertyId::BorderTopWidth, PropertyId::BorderTopColor, PropertyId::BorderLeftStyle],
    );
    assert_eq!(
        results,
        vec![
            Ok(pt(1.0)),
            Ok(Value::color(Color::rgb(0, 0, 255))),
            Ok(Value::keyword(Keyword::None)),
        ]
    );
}

/// A shorthand that says nothing about a property leaves it to the next,
/// less specific one.
#[test]
fn test_most_specific_shorthand_wins() {
    let results = resolve_all(
        &[("border", "1pt solid"), ("border-left", "3pt")],
        &[PropertyId::BorderLeftWidth, PropertyId::BorderTopWidth, PropertyId::BorderLeftStyle],
    );
    assert_eq!(
        results,
        vec![Ok(pt(3.0)), Ok(pt(1.0)), Ok(Value::keyword(Keyword::Solid))]
    );
}

#[test]
fn test_border_token_without_slot_is_invalid() {
    let results = resolve_all(&[("border", "1pt 2pt")], &[PropertyId::BorderTopStyle]);
    assert!(matches!(
        results[0],
        Err(ResolutionError::InvalidShorthandComponent {
            shorthand: PropertyId::Border,
            ..
        })
    ));
}

#[test]
fn test_page_break_keyword_map() {
    let results = resolve_all(
        &[("page-break-before", "always")],
        &[PropertyId::BreakBefore, PropertyId::KeepWithPrevious],
    );
    assert_eq!(results[0], Ok(Value::keyword(Keyword::Page)));
    let keep = results[1].as_ref().unwrap();
    assert_eq!(
        keep.as_compound().and_then(|c| c.get(Component::WithinPage)),
        Some(&Value::keyword(Keyword::Auto))
    );

    let results = resolve_all(
        &[("page-break-after", "avoid")],
        &[PropertyId::BreakAfter, PropertyId::KeepWithNext],
    );
    assert_eq!(results[0], Ok(Value::keyword(Keyword::Auto)));
    let keep = results[1].as_ref().unwrap();
    assert_eq!(
        keep.as_compound().and_then(|c| c.get(Component::WithinColumn)),
        Some(&Value::keyword(Keyword::Always))
    );
}

#[test]
fn test_page_break_left_and_right() {
    assert_eq!(
        resolve_all(&[("page-break-before", "left")], &[PropertyId::BreakBefore]),
        vec![Ok(Value::keyword(Keyword::EvenPage))]
    );
    assert_eq!(
        resolve_all(&[("page-break-after", "right")], &[PropertyId::BreakAfter]),
        vec![Ok(Value::keyword(Keyword::OddPage))]
    );
}
