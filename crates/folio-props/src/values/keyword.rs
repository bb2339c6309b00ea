//! Enumerated keyword values
//!
//! [XSL 1.1 § 5.11 Property Datatypes: enumerated values](https://www.w3.org/TR/xsl11/)
//!
//! Every enumerated token any registered property accepts is interned here as
//! a small integer. Which keywords a particular property accepts is data on
//! its registry entry, not part of this type.

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// An interned enumerated token.
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
    IntoStaticStr,
    Serialize,
)]
#[repr(u16)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Keyword {
    /// `auto`
    Auto,
    /// `none`
    None,
    /// `normal`
    Normal,
    /// `bold`
    Bold,
    /// `italic`
    Italic,

    // writing-mode
    /// `lr-tb`: left-to-right lines stacked top-to-bottom.
    LrTb,
    /// `rl-tb`: right-to-left lines stacked top-to-bottom.
    RlTb,
    /// `tb-rl`: top-to-bottom lines stacked right-to-left.
    TbRl,

    // text-decoration
    /// `underline`
    Underline,
    /// `no-underline`
    NoUnderline,
    /// `overline`
    Overline,
    /// `no-overline`
    NoOverline,
    /// `line-through`
    LineThrough,
    /// `no-line-through`
    NoLineThrough,
    /// `blink`
    Blink,
    /// `no-blink`
    NoBlink,

    // border-style
    /// `hidden`
    Hidden,
    /// `dotted`
    Dotted,
    /// `dashed`
    Dashed,
    /// `solid`
    Solid,
    /// `double`
    Double,
    /// `groove`
    Groove,
    /// `ridge`
    Ridge,
    /// `inset`
    Inset,
    /// `outset`
    Outset,

    // conditionality / precedence
    /// `discard`
    Discard,
    /// `retain`
    Retain,
    /// `force`
    Force,

    // keeps and breaks
    /// `always`
    Always,
    /// `avoid` (only meaningful inside `page-break-*`)
    Avoid,
    /// `page`
    Page,
    /// `column`
    Column,
    /// `even-page`
    EvenPage,
    /// `odd-page`
    OddPage,
    /// `left` (only meaningful inside `page-break-*`)
    Left,
    /// `right` (only meaningful inside `page-break-*`)
    Right,
}

impl Keyword {
    /// Interned id of the keyword.
    #[must_use]
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Canonical token, e.g. `"line-through"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}
