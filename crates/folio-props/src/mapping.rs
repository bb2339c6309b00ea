//! The XSL-FO property table
//!
//! [XSL 1.1 § 7 Formatting Properties](https://www.w3.org/TR/xsl11/)
//!
//! [`fo_registry`] registers one entry for every
//! [`PropertyId`](crate::property::PropertyId): initial
//! values, inheritance, accepted datatypes and keywords, shorthand
//! membership and the relative/absolute families of padding, border width
//! and margin/space.

use crate::corresponding::{
    conditional_to_length, identity, length_to_conditional, margin_to_space, space_to_margin,
    Correspondence, Edge, EdgeFamily,
};
use crate::error::Result;
use crate::property::PropertyId as Id;
use crate::registry::{
    ComponentSpec, EntryBuilder, PercentBase, PropertyEntry, PropertyRegistry, RegistryBuilder,
};
use crate::resolver::Scope;
use crate::shorthand::{ByTypeSlot, KeywordRule, ShorthandKind};
use crate::values::{Color, Component, Compound, Keyword, Length, Value, ValueKind};
use crate::writing_mode::{PhysicalSide, RelativeEdge};

const LENGTH: &[ValueKind] = &[ValueKind::Length];

const BORDER_STYLES: &[Keyword] = &[
    Keyword::None,
    Keyword::Hidden,
    Keyword::Dotted,
    Keyword::Dashed,
    Keyword::Solid,
    Keyword::Double,
    Keyword::Groove,
    Keyword::Ridge,
    Keyword::Inset,
    Keyword::Outset,
];

const BORDER_WIDTH_KEYWORDS: [(&str, &str); 3] =
    [("thin", "0.5pt"), ("medium", "1pt"), ("thick", "2pt")];

const FONT_SIZE_KEYWORDS: [(&str, &str); 7] = [
    ("xx-small", "6.944pt"),
    ("x-small", "8.333pt"),
    ("small", "10pt"),
    ("medium", "12pt"),
    ("large", "14.4pt"),
    ("x-large", "17.28pt"),
    ("xx-large", "20.736pt"),
];

/// `padding-before` .. `padding-end` against `padding-top` .. `padding-left`.
pub static PADDING: EdgeFamily = EdgeFamily {
    relative: [
        Some(Id::PaddingBefore),
        Some(Id::PaddingAfter),
        Some(Id::PaddingStart),
        Some(Id::PaddingEnd),
    ],
    absolute: [
        Id::PaddingTop,
        Id::PaddingRight,
        Id::PaddingBottom,
        Id::PaddingLeft,
    ],
    to_relative: length_to_conditional,
    to_absolute: conditional_to_length,
};

/// `border-before-width` .. against `border-top-width` ...
pub static BORDER_WIDTH: EdgeFamily = EdgeFamily {
    relative: [
        Some(Id::BorderBeforeWidth),
        Some(Id::BorderAfterWidth),
        Some(Id::BorderStartWidth),
        Some(Id::BorderEndWidth),
    ],
    absolute: [
        Id::BorderTopWidth,
        Id::BorderRightWidth,
        Id::BorderBottomWidth,
        Id::BorderLeftWidth,
    ],
    to_relative: identity,
    to_absolute: identity,
};

/// `space-before`/`space-after` against the margins. The start and end
/// edges have no space property; indents cover them.
pub static MARGIN: EdgeFamily = EdgeFamily {
    relative: [Some(Id::SpaceBefore), Some(Id::SpaceAfter), None, None],
    absolute: [Id::MarginTop, Id::MarginRight, Id::MarginBottom, Id::MarginLeft],
    to_relative: margin_to_space,
    to_absolute: space_to_margin,
};

const BORDER_STYLE_IDS: [Id; 4] = [
    Id::BorderTopStyle,
    Id::BorderRightStyle,
    Id::BorderBottomStyle,
    Id::BorderLeftStyle,
];

const BORDER_COLOR_IDS: [Id; 4] = [
    Id::BorderTopColor,
    Id::BorderRightColor,
    Id::BorderBottomColor,
    Id::BorderLeftColor,
];

const BORDER_SIDE_IDS: [Id; 4] = [
    Id::BorderTop,
    Id::BorderRight,
    Id::BorderBottom,
    Id::BorderLeft,
];

const SPACE_COMPONENTS: &[ComponentSpec] = &[
    ComponentSpec {
        component: Component::Minimum,
        accepts: LENGTH,
        enums: &[],
        from_scalar: true,
    },
    ComponentSpec {
        component: Component::Optimum,
        accepts: LENGTH,
        enums: &[],
        from_scalar: true,
    },
    ComponentSpec {
        component: Component::Maximum,
        accepts: LENGTH,
        enums: &[],
        from_scalar: true,
    },
    ComponentSpec {
        component: Component::Precedence,
        accepts: &[ValueKind::Number, ValueKind::Keyword],
        enums: &[Keyword::Force],
        from_scalar: false,
    },
    ComponentSpec {
        component: Component::Conditionality,
        accepts: &[ValueKind::Keyword],
        enums: &[Keyword::Discard, Keyword::Retain],
        from_scalar: false,
    },
];

const CONDITIONAL_LENGTH_COMPONENTS: &[ComponentSpec] = &[
    ComponentSpec {
        component: Component::Length,
        accepts: LENGTH,
        enums: &[],
        from_scalar: true,
    },
    ComponentSpec {
        component: Component::Conditionality,
        accepts: &[ValueKind::Keyword],
        enums: &[Keyword::Discard, Keyword::Retain],
        from_scalar: false,
    },
];

const KEEP_COMPONENTS: &[ComponentSpec] = &[
    ComponentSpec {
        component: Component::WithinLine,
        accepts: &[ValueKind::Keyword, ValueKind::Number],
        enums: &[Keyword::Auto, Keyword::Always],
        from_scalar: true,
    },
    ComponentSpec {
        component: Component::WithinColumn,
        accepts: &[ValueKind::Keyword, ValueKind::Number],
        enums: &[Keyword::Auto, Keyword::Always],
        from_scalar: true,
    },
    ComponentSpec {
        component: Component::WithinPage,
        accepts: &[ValueKind::Keyword, ValueKind::Number],
        enums: &[Keyword::Auto, Keyword::Always],
        from_scalar: true,
    },
];

const BORDER_TOP_SLOTS: &[ByTypeSlot] = &[
    ByTypeSlot {
        accepts_as: Id::BorderTopWidth,
        targets: &[Id::BorderTopWidth],
    },
    ByTypeSlot {
        accepts_as: Id::BorderTopStyle,
        targets: &[Id::BorderTopStyle],
    },
    ByTypeSlot {
        accepts_as: Id::BorderTopColor,
        targets: &[Id::BorderTopColor],
    },
];

const BORDER_RIGHT_SLOTS: &[ByTypeSlot] = &[
    ByTypeSlot {
        accepts_as: Id::BorderRightWidth,
        targets: &[Id::BorderRightWidth],
    },
    ByTypeSlot {
        accepts_as: Id::BorderRightStyle,
        targets: &[Id::BorderRightStyle],
    },
    ByTypeSlot {
        accepts_as: Id::BorderRightColor,
        targets: &[Id::BorderRightColor],
    },
];

const BORDER_BOTTOM_SLOTS: &[ByTypeSlot] = &[
    ByTypeSlot {
        accepts_as: Id::BorderBottomWidth,
        targets: &[Id::BorderBottomWidth],
    },
    ByTypeSlot {
        accepts_as: Id::BorderBottomStyle,
        targets: &[Id::BorderBottomStyle],
    },
    ByTypeSlot {
        accepts_as: Id::BorderBottomColor,
        targets: &[Id::BorderBottomColor],
    },
];

const BORDER_LEFT_SLOTS: &[ByTypeSlot] = &[
    ByTypeSlot {
        accepts_as: Id::BorderLeftWidth,
        targets: &[Id::BorderLeftWidth],
    },
    ByTypeSlot {
        accepts_as: Id::BorderLeftStyle,
        targets: &[Id::BorderLeftStyle],
    },
    ByTypeSlot {
        accepts_as: Id::BorderLeftColor,
        targets: &[Id::BorderLeftColor],
    },
];

const BORDER_SLOTS: &[ByTypeSlot] = &[
    ByTypeSlot {
        accepts_as: Id::BorderTopWidth,
        targets: &[
            Id::BorderTopWidth,
            Id::BorderRightWidth,
            Id::BorderBottomWidth,
            Id::BorderLeftWidth,
        ],
    },
    ByTypeSlot {
        accepts_as: Id::BorderTopStyle,
        targets: &[
            Id::BorderTopStyle,
            Id::BorderRightStyle,
            Id::BorderBottomStyle,
            Id::BorderLeftStyle,
        ],
    },
    ByTypeSlot {
        accepts_as: Id::BorderTopColor,
        targets: &[
            Id::BorderTopColor,
            Id::BorderRightColor,
            Id::BorderBottomColor,
            Id::BorderLeftColor,
        ],
    },
];

const PAGE_BREAK_BEFORE: &[KeywordRule] = &[
    KeywordRule {
        token: Keyword::Auto,
        property: Id::BreakBefore,
        value: Keyword::Auto,
    },
    KeywordRule {
        token: Keyword::Auto,
        property: Id::KeepWithPrevious,
        value: Keyword::Auto,
    },
    KeywordRule {
        token: Keyword::Always,
        property: Id::BreakBefore,
        value: Keyword::Page,
    },
    KeywordRule {
        token: Keyword::Avoid,
        property: Id::KeepWithPrevious,
        value: Keyword::Always,
    },
    KeywordRule {
        token: Keyword::Left,
        property: Id::BreakBefore,
        value: Keyword::EvenPage,
    },
    KeywordRule {
        token: Keyword::Right,
        property: Id::BreakBefore,
        value: Keyword::OddPage,
    },
];

const PAGE_BREAK_AFTER: &[KeywordRule] = &[
    KeywordRule {
        token: Keyword::Auto,
        property: Id::BreakAfter,
        value: Keyword::Auto,
    },
    KeywordRule {
        token: Keyword::Auto,
        property: Id::KeepWithNext,
        value: Keyword::Auto,
    },
    KeywordRule {
        token: Keyword::Always,
        property: Id::BreakAfter,
        value: Keyword::Page,
    },
    KeywordRule {
        token: Keyword::Avoid,
        property: Id::KeepWithNext,
        value: Keyword::Always,
    },
    KeywordRule {
        token: Keyword::Left,
        property: Id::BreakAfter,
        value: Keyword::EvenPage,
    },
    KeywordRule {
        token: Keyword::Right,
        property: Id::BreakAfter,
        value: Keyword::OddPage,
    },
];

/// The registry of every supported XSL-FO property.
///
/// # Errors
///
/// Only if the table itself is inconsistent, which the crate's tests rule
/// out; see [`RegistryBuilder::seal`].
pub fn fo_registry() -> Result<PropertyRegistry> {
    let mut builder = RegistryBuilder::new();
    for entry in typography()
        .into_iter()
        .chain(box_model())
        .chain(borders())
        .chain(pagination())
    {
        let _ = builder.register(entry);
    }
    builder.seal()
}

fn points(value: f64) -> Value {
    Value::length(Length::from_points(value))
}

fn with_keywords(
    mut builder: EntryBuilder,
    keywords: &[(&'static str, &'static str)],
) -> EntryBuilder {
    for &(alias, text) in keywords {
        builder = builder.keyword(alias, text);
    }
    builder
}

fn typography() -> Vec<PropertyEntry> {
    vec![
        PropertyEntry::builder(Id::Color)
            .inherited()
            .accepts(&[ValueKind::Color])
            .default_value(Value::color(Color::BLACK))
            .build(),
        PropertyEntry::builder(Id::FontFamily)
            .inherited()
            .accepts(&[ValueKind::String, ValueKind::List])
            .default_value(Value::string("sans-serif"))
            .build(),
        with_keywords(
            PropertyEntry::builder(Id::FontSize)
                .inherited()
                .accepts(LENGTH)
                .percent_base(PercentBase::InheritedFontSize),
            &FONT_SIZE_KEYWORDS,
        )
        .default_value(points(12.0))
        .build(),
        PropertyEntry::builder(Id::FontWeight)
            .inherited()
            .accepts(&[ValueKind::Keyword, ValueKind::Number])
            .enums(&[Keyword::Normal, Keyword::Bold])
            .default_value(Value::keyword(Keyword::Normal))
            .build(),
        PropertyEntry::builder(Id::HyphenationCharacter)
            .inherited()
            .accepts(&[ValueKind::Character])
            .default_value(Value::character('-'))
            .build(),
        PropertyEntry::builder(Id::LineHeight)
            .inherited()
            .accepts(&[ValueKind::Keyword, ValueKind::Length, ValueKind::Number])
            .enums(&[Keyword::Normal])
            .percent_base(PercentBase::FontSize)
            .default_value(Value::keyword(Keyword::Normal))
            .build(),
        PropertyEntry::builder(Id::WritingMode)
            .inherited()
            .accepts(&[ValueKind::Keyword])
            .enums(&[Keyword::LrTb, Keyword::RlTb, Keyword::TbRl])
            .default_value(Value::keyword(Keyword::LrTb))
            .build(),
        PropertyEntry::builder(Id::StartIndent)
            .inherited()
            .accepts(LENGTH)
            .percent_base(PercentBase::ContainingBlockWidth)
            .default_value(points(0.0))
            .computed(start_indent)
            .build(),
        PropertyEntry::builder(Id::EndIndent)
            .inherited()
            .accepts(LENGTH)
            .percent_base(PercentBase::ContainingBlockWidth)
            .default_value(points(0.0))
            .computed(end_indent)
            .build(),
        PropertyEntry::builder(Id::BackgroundColor)
            .accepts(&[ValueKind::Color])
            .default_value(Value::color(Color::TRANSPARENT))
            .build(),
        PropertyEntry::builder(Id::TextDecoration)
            .accepts(&[ValueKind::Keyword, ValueKind::List])
            .enums(&[
                Keyword::None,
                Keyword::Underline,
                Keyword::NoUnderline,
                Keyword::Overline,
                Keyword::NoOverline,
                Keyword::LineThrough,
                Keyword::NoLineThrough,
                Keyword::Blink,
                Keyword::NoBlink,
            ])
            .default_value(Value::keyword(Keyword::None))
            .build(),
    ]
}

fn box_model() -> Vec<PropertyEntry> {
    let mut entries = vec![
        PropertyEntry::builder(Id::Width)
            .accepts(&[ValueKind::Length, ValueKind::Keyword])
            .enums(&[Keyword::Auto])
            .percent_base(PercentBase::ContainingBlockWidth)
            .default_value(Value::keyword(Keyword::Auto))
            .build(),
        PropertyEntry::builder(Id::Height)
            .accepts(&[ValueKind::Length, ValueKind::Keyword])
            .enums(&[Keyword::Auto])
            .percent_base(PercentBase::ContainingBlockHeight)
            .default_value(Value::keyword(Keyword::Auto))
            .build(),
        PropertyEntry::builder(Id::Margin)
            .accepts(&[ValueKind::Length, ValueKind::List])
            .percent_base(PercentBase::ContainingBlockWidth)
            .shorthand(ShorthandKind::Positional(MARGIN.absolute))
            .build(),
        PropertyEntry::builder(Id::Padding)
            .accepts(&[ValueKind::Length, ValueKind::List])
            .percent_base(PercentBase::ContainingBlockWidth)
            .shorthand(ShorthandKind::Positional(PADDING.absolute))
            .build(),
    ];

    let space = Value::compound(Compound::new([
        (Component::Minimum, points(0.0)),
        (Component::Optimum, points(0.0)),
        (Component::Maximum, points(0.0)),
        (Component::Precedence, Value::number(0.0)),
        (Component::Conditionality, Value::keyword(Keyword::Discard)),
    ]));
    let conditional = Value::compound(Compound::new([
        (Component::Length, points(0.0)),
        (Component::Conditionality, Value::keyword(Keyword::Discard)),
    ]));

    for side in PhysicalSide::ALL {
        entries.push(
            PropertyEntry::builder(MARGIN.absolute[side.index()])
                .accepts(LENGTH)
                .percent_base(PercentBase::ContainingBlockWidth)
                .default_value(points(0.0))
                .shorthands(&[Id::Margin])
                .corresponding(Correspondence {
                    family: &MARGIN,
                    edge: Edge::Absolute(side),
                })
                .build(),
        );
        entries.push(
            PropertyEntry::builder(PADDING.absolute[side.index()])
                .accepts(LENGTH)
                .percent_base(PercentBase::ContainingBlockWidth)
                .default_value(points(0.0))
                .shorthands(&[Id::Padding])
                .corresponding(Correspondence {
                    family: &PADDING,
                    edge: Edge::Absolute(side),
                })
                .build(),
        );
    }

    for edge in RelativeEdge::ALL {
        if let Some(id) = MARGIN.relative[edge.index()] {
            entries.push(
                PropertyEntry::builder(id)
                    .components(SPACE_COMPONENTS)
                    .percent_base(PercentBase::ContainingBlockWidth)
                    .default_value(space.clone())
                    .corresponding(Correspondence {
                        family: &MARGIN,
                        edge: Edge::Relative(edge),
                    })
                    .build(),
            );
        }
        if let Some(id) = PADDING.relative[edge.index()] {
            entries.push(
                PropertyEntry::builder(id)
                    .components(CONDITIONAL_LENGTH_COMPONENTS)
                    .percent_base(PercentBase::ContainingBlockWidth)
                    .default_value(conditional.clone())
                    .corresponding(Correspondence {
                        family: &PADDING,
                        edge: Edge::Relative(edge),
                    })
                    .build(),
            );
        }
    }
    entries
}

fn borders() -> Vec<PropertyEntry> {
    let mut entries = vec![
        with_keywords(
            PropertyEntry::builder(Id::BorderWidth).accepts(&[ValueKind::Length, ValueKind::List]),
            &BORDER_WIDTH_KEYWORDS,
        )
        .shorthand(ShorthandKind::Positional(BORDER_WIDTH.absolute))
        .build(),
        PropertyEntry::builder(Id::BorderStyle)
            .accepts(&[ValueKind::Keyword, ValueKind::List])
            .enums(BORDER_STYLES)
            .shorthand(ShorthandKind::Positional(BORDER_STYLE_IDS))
            .build(),
        PropertyEntry::builder(Id::BorderColor)
            .accepts(&[ValueKind::Color, ValueKind::List])
            .shorthand(ShorthandKind::Positional(BORDER_COLOR_IDS))
            .build(),
        border_shorthand(Id::Border, BORDER_SLOTS),
    ];

    let side_slots = [
        BORDER_TOP_SLOTS,
        BORDER_RIGHT_SLOTS,
        BORDER_BOTTOM_SLOTS,
        BORDER_LEFT_SLOTS,
    ];
    for side in PhysicalSide::ALL {
        let i = side.index();
        let side_shorthand = BORDER_SIDE_IDS[i];
        entries.push(border_shorthand(side_shorthand, side_slots[i]));
        entries.push(
            border_width(BORDER_WIDTH.absolute[i])
                .shorthands(&[side_shorthand, Id::BorderWidth, Id::Border])
                .corresponding(Correspondence {
                    family: &BORDER_WIDTH,
                    edge: Edge::Absolute(side),
                })
                .build(),
        );
        entries.push(
            PropertyEntry::builder(BORDER_STYLE_IDS[i])
                .accepts(&[ValueKind::Keyword])
                .enums(BORDER_STYLES)
                .default_value(Value::keyword(Keyword::None))
                .shorthands(&[side_shorthand, Id::BorderStyle, Id::Border])
                .build(),
        );
        entries.push(
            PropertyEntry::builder(BORDER_COLOR_IDS[i])
                .accepts(&[ValueKind::Color])
                .default_from(Id::Color)
                .shorthands(&[side_shorthand, Id::BorderColor, Id::Border])
                .build(),
        );
    }

    for edge in RelativeEdge::ALL {
        if let Some(id) = BORDER_WIDTH.relative[edge.index()] {
            entries.push(
                border_width(id)
                    .corresponding(Correspondence {
                        family: &BORDER_WIDTH,
                        edge: Edge::Relative(edge),
                    })
                    .build(),
            );
        }
    }
    entries
}

fn border_width(id: Id) -> EntryBuilder {
    with_keywords(PropertyEntry::builder(id).accepts(LENGTH), &BORDER_WIDTH_KEYWORDS)
        .default_value(points(1.0))
}

fn border_shorthand(id: Id, slots: &'static [ByTypeSlot]) -> PropertyEntry {
    with_keywords(
        PropertyEntry::builder(id)
            .accepts(&[
                ValueKind::Length,
                ValueKind::Keyword,
                ValueKind::Color,
                ValueKind::List,
            ])
            .enums(BORDER_STYLES),
        &BORDER_WIDTH_KEYWORDS,
    )
    .shorthand(ShorthandKind::ByType(slots))
    .build()
}

fn pagination() -> Vec<PropertyEntry> {
    let keep = Value::compound(Compound::uniform(
        &[
            Component::WithinLine,
            Component::WithinColumn,
            Component::WithinPage,
        ],
        &Value::keyword(Keyword::Auto),
    ));
    let breaks = [
        Keyword::Auto,
        Keyword::Column,
        Keyword::Page,
        Keyword::EvenPage,
        Keyword::OddPage,
    ];
    let page_breaks = [
        Keyword::Auto,
        Keyword::Always,
        Keyword::Avoid,
        Keyword::Left,
        Keyword::Right,
    ];

    vec![
        PropertyEntry::builder(Id::KeepTogether)
            .inherited()
            .components(KEEP_COMPONENTS)
            .default_value(keep.clone())
            .build(),
        PropertyEntry::builder(Id::KeepWithNext)
            .components(KEEP_COMPONENTS)
            .default_value(keep.clone())
            .shorthands(&[Id::PageBreakAfter])
            .build(),
        PropertyEntry::builder(Id::KeepWithPrevious)
            .components(KEEP_COMPONENTS)
            .default_value(keep)
            .shorthands(&[Id::PageBreakBefore])
            .build(),
        PropertyEntry::builder(Id::BreakBefore)
            .accepts(&[ValueKind::Keyword])
            .enums(&breaks)
            .default_value(Value::keyword(Keyword::Auto))
            .shorthands(&[Id::PageBreakBefore])
            .build(),
        PropertyEntry::builder(Id::BreakAfter)
            .accepts(&[ValueKind::Keyword])
            .enums(&breaks)
            .default_value(Value::keyword(Keyword::Auto))
            .shorthands(&[Id::PageBreakAfter])
            .build(),
        PropertyEntry::builder(Id::PageBreakBefore)
            .accepts(&[ValueKind::Keyword])
            .enums(&page_breaks)
            .shorthand(ShorthandKind::KeywordMap(PAGE_BREAK_BEFORE))
            .build(),
        PropertyEntry::builder(Id::PageBreakAfter)
            .accepts(&[ValueKind::Keyword])
            .enums(&page_breaks)
            .shorthand(ShorthandKind::KeywordMap(PAGE_BREAK_AFTER))
            .build(),
    ]
}

/// [XSL 1.1 § 5.3.2 Margin, Space, and Indent Properties](https://www.w3.org/TR/xsl11/)
fn start_indent(scope: &Scope<'_>) -> Result<Option<Value>> {
    indent(scope, Id::StartIndent, RelativeEdge::Start)
}

fn end_indent(scope: &Scope<'_>) -> Result<Option<Value>> {
    indent(scope, Id::EndIndent, RelativeEdge::End)
}

/// `inherited indent + margin + padding + border width` on the physical side
/// of `edge`, when that side's margin is specified.
fn indent(scope: &Scope<'_>, id: Id, edge: RelativeEdge) -> Result<Option<Value>> {
    let side = scope.writing_mode()?.physical(edge).index();
    let margin = MARGIN.absolute[side];
    if !scope.is_specified(margin) {
        return Ok(None);
    }
    let inherited = match scope.parent() {
        Some(parent) => millipoints(&parent.resolve(id)?),
        None => 0,
    };
    let style = scope.resolve(BORDER_STYLE_IDS[side])?.as_keyword();
    let border = if matches!(style, Some(Keyword::None | Keyword::Hidden)) {
        0
    } else {
        millipoints(&scope.resolve(BORDER_WIDTH.absolute[side])?)
    };
    let total = [
        millipoints(&scope.resolve(margin)?),
        millipoints(&scope.resolve(PADDING.absolute[side])?),
        border,
    ]
    .into_iter()
    .fold(inherited, i32::saturating_add);
    Ok(Some(Value::length(Length::Millipoints(total))))
}

fn millipoints(value: &Value) -> i32 {
    value.as_length().map_or(0, |length| length.millipoints_or_zero())
}
