//! Property-based tests for inheritance, idempotence and positional
//! shorthand distribution.

use std::sync::Arc;

use folio_dom::NodeId;
use folio_props::{
    apply_attribute, fo_registry, Length, NoMeasurements, PropertyId, PropertyList, Resolver,
    Value,
};
use quickcheck_macros::quickcheck;

/// A chain of `depth` nodes below a root with `font-size` set, every other
/// node scaling it by `percent`.
fn chain(resolver: &Resolver<'_>, depth: u8, percent: u8) -> Vec<Arc<PropertyList>> {
    let mut root = PropertyList::new(NodeId(0), "fo:root", None);
    apply_attribute(resolver, &mut root, "font-size", "10pt").unwrap();
    let mut lists = vec![Arc::new(root)];
    for i in 1..=usize::from(depth) {
        let mut list = PropertyList::new(NodeId(i), "fo:block", lists.last().cloned());
        if i % 2 == 0 {
            let scale = format!("{}%", 50 + u32::from(percent % 100));
            apply_attribute(resolver, &mut list, "font-size", &scale).unwrap();
        }
        lists.push(Arc::new(list));
    }
    lists
}

#[quickcheck]
fn prop_inheritance_terminates_at_any_depth(depth: u8, percent: u8) -> bool {
    let registry = fo_registry().unwrap();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let lists = chain(&resolver, depth % 64, percent);
    lists.iter().all(|list| {
        resolver
            .resolve(PropertyId::FontSize, list, true, true)
            .is_ok_and(|value| value.as_length().is_some_and(|l| l.is_absolute()))
    })
}

#[quickcheck]
fn prop_resolution_is_idempotent(depth: u8, percent: u8) -> bool {
    let registry = fo_registry().unwrap();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let lists = chain(&resolver, depth % 32, percent);
    let Some(leaf) = lists.last() else {
        return true;
    };
    [
        PropertyId::FontSize,
        PropertyId::LineHeight,
        PropertyId::StartIndent,
        PropertyId::BorderLeftColor,
    ]
    .into_iter()
    .all(|id| resolver.resolve(id, leaf, true, true) == resolver.resolve(id, leaf, true, true))
}

#[quickcheck]
fn prop_positional_distribution(values: Vec<u16>) -> bool {
    let registry = fo_registry().unwrap();
    let resolver = Resolver::new(&registry, &NoMeasurements);
    let values: Vec<u16> = values.into_iter().take(4).collect();
    if values.is_empty() {
        return true;
    }
    let text = values
        .iter()
        .map(|v| format!("{v}pt"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut list = PropertyList::new(NodeId::ROOT, "fo:block", None);
    apply_attribute(&resolver, &mut list, "padding", &text).unwrap();

    // [top, right, bottom, left] indices into `values` per token count.
    let layout: [usize; 4] = match values.len() {
        1 => [0, 0, 0, 0],
        2 => [0, 1, 0, 1],
        3 => [0, 1, 2, 1],
        _ => [0, 1, 2, 3],
    };
    let sides = [
        PropertyId::PaddingTop,
        PropertyId::PaddingRight,
        PropertyId::PaddingBottom,
        PropertyId::PaddingLeft,
    ];
    sides.iter().zip(layout).all(|(id, index)| {
        resolver.resolve(*id, &list, true, true)
            == Ok(Value::length(Length::from_points(f64::from(values[index]))))
    })
}
