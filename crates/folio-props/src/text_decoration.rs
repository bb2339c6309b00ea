//! Text decorations
//!
//! [XSL 1.1 § 7.17.4 "text-decoration"](https://www.w3.org/TR/xsl11/)
//!
//! `text-decoration` is not inherited, but decorations propagate to
//! descendants: a block with `underline` underlines the text of its inlines,
//! in the color of the block. The effective decorations of a node are
//! therefore its parent's, adjusted by the node's own `text-decoration`.

use serde::Serialize;

use crate::error::{ResolutionError, Result};
use crate::property::PropertyId;
use crate::property_list::PropertyList;
use crate::resolver::Resolver;
use crate::values::{Color, Keyword, Value};

/// Decoration lines in effect on a node, each with the color it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextDecorations {
    /// Underline color, if underlined.
    pub underline: Option<Color>,
    /// Overline color, if overlined.
    pub overline: Option<Color>,
    /// Line-through color, if struck through.
    pub line_through: Option<Color>,
    /// Whether the text blinks.
    pub blink: bool,
}

impl TextDecorations {
    /// The decorations in effect on the node owning `list`.
    ///
    /// A line turned on by a node takes that node's computed `color`;
    /// `no-underline` and friends turn a propagated line off again and
    /// `none` clears everything propagated so far.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::InvalidValue`] for a token that is not a
    /// text-decoration keyword, or any error resolving `text-decoration`
    /// or `color`.
    pub fn compute(resolver: &Resolver<'_>, list: &PropertyList) -> Result<Self> {
        let mut decorations = match list.parent() {
            Some(parent) => Self::compute(resolver, parent)?,
            None => Self::default(),
        };
        let specified = match resolver.resolve(PropertyId::TextDecoration, list, false, false) {
            Ok(value) => value,
            Err(ResolutionError::NoConversion { .. }) => return Ok(decorations),
            Err(err) => return Err(err),
        };
        let tokens: Vec<&Value> = match specified.as_list() {
            Some(list) => list.iter().collect(),
            None => vec![&specified],
        };

        let node_color = || -> Result<Color> {
            Ok(resolver
                .resolve(PropertyId::Color, list, true, true)?
                .as_color()
                .unwrap_or(Color::BLACK))
        };
        for token in tokens {
            match token.as_keyword() {
                Some(Keyword::None) => decorations = Self::default(),
                Some(Keyword::Underline) => decorations.underline = Some(node_color()?),
                Some(Keyword::NoUnderline) => decorations.underline = None,
                Some(Keyword::Overline) => decorations.overline = Some(node_color()?),
                Some(Keyword::NoOverline) => decorations.overline = None,
                Some(Keyword::LineThrough) => decorations.line_through = Some(node_color()?),
                Some(Keyword::NoLineThrough) => decorations.line_through = None,
                Some(Keyword::Blink) => decorations.blink = true,
                Some(Keyword::NoBlink) => decorations.blink = false,
                _ => {
                    return Err(ResolutionError::InvalidValue {
                        property: PropertyId::TextDecoration,
                        value: token.to_string(),
                        reason: format!("not a text-decoration keyword on <{}>", list.element()),
                    });
                }
            }
        }
        Ok(decorations)
    }

    /// Check whether no line is drawn and nothing blinks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.underline.is_none()
            && self.overline.is_none()
            && self.line_through.is_none()
            && !self.blink
    }
}
