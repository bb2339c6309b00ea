//! Writing modes and the relative/absolute edge mapping
//!
//! [XSL 1.1 § 7.29.7 "writing-mode"](https://www.w3.org/TR/xsl11/)
//! [XSL 1.1 § 5.3 Computing the Values of Corresponding Properties](https://www.w3.org/TR/xsl11/)

use serde::Serialize;
use strum_macros::Display;

use crate::values::Keyword;

/// The writing modes relevant to edge mapping.
///
/// "The writing-mode property specifies ... the direction in which lines
/// progress and the direction in which blocks are stacked."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum WritingMode {
    /// `lr-tb`
    ///
    /// Mapping:
    ///   - before → top
    ///   - after  → bottom
    ///   - start  → left
    ///   - end    → right
    #[default]
    LrTb,

    /// `rl-tb`
    ///
    /// Mapping:
    ///   - before → top
    ///   - after  → bottom
    ///   - start  → right
    ///   - end    → left
    RlTb,

    /// `tb-rl`
    ///
    /// Mapping:
    ///   - before → right
    ///   - after  → left
    ///   - start  → top
    ///   - end    → bottom
    TbRl,
}

/// Writing-mode-relative edge of an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RelativeEdge {
    /// Edge where block progression starts.
    Before,
    /// Edge where block progression ends.
    After,
    /// Edge where inline progression starts.
    Start,
    /// Edge where inline progression ends.
    End,
}

impl RelativeEdge {
    /// All relative edges, in `before, after, start, end` order.
    pub const ALL: [Self; 4] = [Self::Before, Self::After, Self::Start, Self::End];

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Physical side of an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PhysicalSide {
    /// Top edge of the area
    Top,
    /// Right edge of the area
    Right,
    /// Bottom edge of the area
    Bottom,
    /// Left edge of the area
    Left,
}

impl PhysicalSide {
    /// All sides, in `top, right, bottom, left` order (the CSS edge order).
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl WritingMode {
    /// The writing mode named by a `writing-mode` keyword.
    #[must_use]
    pub const fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::LrTb => Some(Self::LrTb),
            Keyword::RlTb => Some(Self::RlTb),
            Keyword::TbRl => Some(Self::TbRl),
            _ => None,
        }
    }

    /// Map a relative edge to the physical side it lies on.
    ///
    /// | Writing Mode | before | after  | start | end    |
    /// |--------------|--------|--------|-------|--------|
    /// | lr-tb        | top    | bottom | left  | right  |
    /// | rl-tb        | top    | bottom | right | left   |
    /// | tb-rl        | right  | left   | top   | bottom |
    #[must_use]
    pub const fn physical(self, edge: RelativeEdge) -> PhysicalSide {
        match (self, edge) {
            (Self::LrTb | Self::RlTb, RelativeEdge::Before) | (Self::TbRl, RelativeEdge::Start) => {
                PhysicalSide::Top
            }
            (Self::LrTb | Self::RlTb, RelativeEdge::After) | (Self::TbRl, RelativeEdge::End) => {
                PhysicalSide::Bottom
            }
            (Self::LrTb, RelativeEdge::Start)
            | (Self::RlTb, RelativeEdge::End)
            | (Self::TbRl, RelativeEdge::After) => PhysicalSide::Left,
            (Self::LrTb, RelativeEdge::End)
            | (Self::RlTb, RelativeEdge::Start)
            | (Self::TbRl, RelativeEdge::Before) => PhysicalSide::Right,
        }
    }

    /// Map a physical side back to the relative edge that lies on it.
    #[must_use]
    pub fn relative(self, side: PhysicalSide) -> RelativeEdge {
        RelativeEdge::ALL
            .into_iter()
            .find(|edge| self.physical(*edge) == side)
            .unwrap_or(RelativeEdge::Before)
    }
}
