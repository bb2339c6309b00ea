//! Property identifiers
//!
//! [XSL 1.1 § 7 Formatting Properties](https://www.w3.org/TR/xsl11/)
//!
//! The closed set of properties this crate knows about. Attribute names map
//! to identifiers through [`std::str::FromStr`] (`"space-before"` →
//! [`PropertyId::SpaceBefore`]).

use serde::Serialize;
use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// A recognized property.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PropertyId {
    // § 7.8 Font Properties, § 7.18 Color
    /// `color`
    Color,
    /// `font-family`
    FontFamily,
    /// `font-size`
    FontSize,
    /// `font-weight`
    FontWeight,
    /// `hyphenation-character`
    HyphenationCharacter,
    /// `line-height`
    LineHeight,
    /// `writing-mode`
    WritingMode,
    /// `start-indent`
    StartIndent,
    /// `end-indent`
    EndIndent,

    /// `background-color`
    BackgroundColor,
    /// `text-decoration`
    TextDecoration,
    /// `width`
    Width,
    /// `height`
    Height,

    // § 7.10 Common Margin Properties - Block
    /// `margin` (shorthand)
    Margin,
    /// `margin-top`
    MarginTop,
    /// `margin-right`
    MarginRight,
    /// `margin-bottom`
    MarginBottom,
    /// `margin-left`
    MarginLeft,
    /// `space-before`
    SpaceBefore,
    /// `space-after`
    SpaceAfter,

    // § 7.7 Common Border, Padding, and Background Properties
    /// `padding` (shorthand)
    Padding,
    /// `padding-top`
    PaddingTop,
    /// `padding-right`
    PaddingRight,
    /// `padding-bottom`
    PaddingBottom,
    /// `padding-left`
    PaddingLeft,
    /// `padding-before`
    PaddingBefore,
    /// `padding-after`
    PaddingAfter,
    /// `padding-start`
    PaddingStart,
    /// `padding-end`
    PaddingEnd,

    /// `border` (shorthand)
    Border,
    /// `border-top` (shorthand)
    BorderTop,
    /// `border-right` (shorthand)
    BorderRight,
    /// `border-bottom` (shorthand)
    BorderBottom,
    /// `border-left` (shorthand)
    BorderLeft,
    /// `border-width` (shorthand)
    BorderWidth,
    /// `border-style` (shorthand)
    BorderStyle,
    /// `border-color` (shorthand)
    BorderColor,
    /// `border-top-width`
    BorderTopWidth,
    /// `border-top-style`
    BorderTopStyle,
    /// `border-top-color`
    BorderTopColor,
    /// `border-right-width`
    BorderRightWidth,
    /// `border-right-style`
    BorderRightStyle,
    /// `border-right-color`
    BorderRightColor,
    /// `border-bottom-width`
    BorderBottomWidth,
    /// `border-bottom-style`
    BorderBottomStyle,
    /// `border-bottom-color`
    BorderBottomColor,
    /// `border-left-width`
    BorderLeftWidth,
    /// `border-left-style`
    BorderLeftStyle,
    /// `border-left-color`
    BorderLeftColor,
    /// `border-before-width`
    BorderBeforeWidth,
    /// `border-after-width`
    BorderAfterWidth,
    /// `border-start-width`
    BorderStartWidth,
    /// `border-end-width`
    BorderEndWidth,

    // § 7.20 Keeps and Breaks Properties
    /// `keep-together`
    KeepTogether,
    /// `keep-with-next`
    KeepWithNext,
    /// `keep-with-previous`
    KeepWithPrevious,
    /// `break-before`
    BreakBefore,
    /// `break-after`
    BreakAfter,
    /// `page-break-before` (shorthand)
    PageBreakBefore,
    /// `page-break-after` (shorthand)
    PageBreakAfter,
}

impl PropertyId {
    /// The attribute name, e.g. `"space-before"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Dense index of the identifier, for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    #[test]
    fn test_attribute_names() {
        assert_eq!(PropertyId::from_str("space-before"), Ok(PropertyId::SpaceBefore));
        assert_eq!(PropertyId::BorderTopWidth.name(), "border-top-width");
        assert!(PropertyId::from_str("font-stretch").is_err());
    }

    #[test]
    fn test_indices_are_dense() {
        for (i, id) in PropertyId::iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        assert_eq!(PropertyId::iter().count(), PropertyId::COUNT);
    }
}
