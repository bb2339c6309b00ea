//! Length values
//!
//! [XSL 1.1 § 5.9.13 Definitions of Units of Measure](https://www.w3.org/TR/xsl11/)
//!
//! Absolute lengths are normalized to millipoints (1/1000 pt) at parse time,
//! so two lengths that denote the same distance compare equal regardless of
//! the unit the author wrote.

use std::fmt;

use serde::{Serialize, Serializer};

/// Millipoints per typographic point.
pub const MILLIPOINTS_PER_POINT: i32 = 1000;

/// Millipoints per CSS pixel, at the 96dpi reference resolution.
const MILLIPOINTS_PER_PX: f64 = 750.0;

/// A length, either absolute or relative to a base that is only known once
/// the owning node is placed in the tree (or laid out).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute length in millipoints.
    Millipoints(i32),
    /// Percentage of the property's percentage base (`50%` is `Percent(50.0)`).
    Percent(f64),
    /// Multiple of the applicable font size (`1.2em` is `Em(1.2)`).
    Em(f64),
}

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self::Millipoints(0);

    /// An absolute length of `points` typographic points.
    #[must_use]
    pub fn from_points(points: f64) -> Self {
        Self::Millipoints(round_millipoints(points * f64::from(MILLIPOINTS_PER_POINT)))
    }

    /// Build a length from a number and a unit suffix.
    ///
    /// Recognized units are `pt`, `pc`, `in`, `cm`, `mm`, `px`, `em` and `%`.
    /// Returns `None` for any other unit.
    #[must_use]
    pub fn from_unit(value: f64, unit: &str) -> Option<Self> {
        let points_per_unit = match unit.to_ascii_lowercase().as_str() {
            "pt" => 1.0,
            "pc" => 12.0,
            "in" => 72.0,
            "cm" => 72.0 / 2.54,
            "mm" => 72.0 / 25.4,
            "px" => return Some(Self::Millipoints(round_millipoints(value * MILLIPOINTS_PER_PX))),
            "em" => return Some(Self::Em(value)),
            "%" => return Some(Self::Percent(value)),
            _ => return None,
        };
        Some(Self::from_points(value * points_per_unit))
    }

    /// The absolute value in millipoints, or `None` for relative lengths.
    #[must_use]
    pub const fn millipoints(&self) -> Option<i32> {
        match self {
            Self::Millipoints(mpt) => Some(*mpt),
            Self::Percent(_) | Self::Em(_) => None,
        }
    }

    /// The absolute value in millipoints, with 0 for lengths whose base is
    /// not known yet.
    ///
    /// NOTE: Arithmetic over lengths (indent computation) uses this fallback
    /// rather than failing, mirroring how unresolved percentages behave
    /// before layout provides a containing block.
    #[must_use]
    pub fn millipoints_or_zero(&self) -> i32 {
        self.millipoints().unwrap_or(0)
    }

    /// Check whether the length is already absolute.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        matches!(self, Self::Millipoints(_))
    }

    /// Resolve a percentage against `base` millipoints.
    ///
    /// Absolute and em lengths are returned unchanged.
    #[must_use]
    pub fn resolve_percent(self, base: i32) -> Self {
        match self {
            Self::Percent(pct) => {
                Self::Millipoints(round_millipoints(f64::from(base) * pct / 100.0))
            }
            other => other,
        }
    }

    /// Resolve an em length against a font size of `font_size` millipoints.
    ///
    /// Absolute and percentage lengths are returned unchanged.
    #[must_use]
    pub fn resolve_em(self, font_size: i32) -> Self {
        match self {
            Self::Em(factor) => Self::Millipoints(round_millipoints(f64::from(font_size) * factor)),
            other => other,
        }
    }

    /// Sum of two lengths, treating unresolved lengths as zero.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self::Millipoints(
            self.millipoints_or_zero()
                .saturating_add(other.millipoints_or_zero()),
        )
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "lengths beyond ±2^31 millipoints (about 750 m) are clamped by `as`"
)]
fn round_millipoints(value: f64) -> i32 {
    value.round() as i32
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millipoints(mpt) if mpt % MILLIPOINTS_PER_POINT == 0 => {
                write!(f, "{}pt", mpt / MILLIPOINTS_PER_POINT)
            }
            Self::Millipoints(mpt) => {
                let points = format!("{:.3}", f64::from(*mpt) / f64::from(MILLIPOINTS_PER_POINT));
                write!(f, "{}pt", points.trim_end_matches('0'))
            }
            Self::Percent(pct) => write!(f, "{pct}%"),
            Self::Em(factor) => write!(f, "{factor}em"),
        }
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
