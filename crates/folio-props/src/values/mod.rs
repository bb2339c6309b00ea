//! Property values
//!
//! [XSL 1.1 § 5.11 Property Datatypes](https://www.w3.org/TR/xsl11/)
//!
//! A [`Value`] is one closed tagged union covering every datatype the
//! registered properties use. Values are immutable: updating one component
//! of a compound builds a new value.

pub mod color;
pub mod compound;
pub mod keyword;
pub mod length;

use std::fmt;

use serde::{Serialize, Serializer};
use strum_macros::Display;

pub use color::Color;
pub use compound::{Component, Compound, ValueList};
pub use keyword::Keyword;
pub use length::Length;

/// The datatype-specific payload of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
    /// `<length>` or `<percentage>`
    Length(Length),
    /// `<color>`
    Color(Color),
    /// `<number>` or `<integer>`
    Number(f64),
    /// An enumerated token.
    Keyword(Keyword),
    /// `<character>`
    Character(char),
    /// `<space>`, `<keep>`, `<length-conditional>`
    Compound(Compound),
    /// Whitespace-separated sequence.
    List(ValueList),
    /// `<string>` or `<name>`
    String(String),
}

/// The tag of a [`ValueData`], used to declare which datatypes a property
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// [`ValueData::Length`]
    Length,
    /// [`ValueData::Color`]
    Color,
    /// [`ValueData::Number`]
    Number,
    /// [`ValueData::Keyword`]
    Keyword,
    /// [`ValueData::Character`]
    Character,
    /// [`ValueData::Compound`]
    Compound,
    /// [`ValueData::List`]
    List,
    /// [`ValueData::String`]
    String,
}

impl ValueData {
    /// The tag of this payload.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Length(_) => ValueKind::Length,
            Self::Color(_) => ValueKind::Color,
            Self::Number(_) => ValueKind::Number,
            Self::Keyword(_) => ValueKind::Keyword,
            Self::Character(_) => ValueKind::Character,
            Self::Compound(_) => ValueKind::Compound,
            Self::List(_) => ValueKind::List,
            Self::String(_) => ValueKind::String,
        }
    }
}

/// A property value, plus the text the author originally wrote for it.
///
/// Equality ignores the specified text.
#[derive(Debug, Clone)]
pub struct Value {
    data: ValueData,
    specified: Option<String>,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl From<ValueData> for Value {
    fn from(data: ValueData) -> Self {
        Self {
            data,
            specified: None,
        }
    }
}

impl Value {
    /// A length value.
    #[must_use]
    pub fn length(length: Length) -> Self {
        ValueData::Length(length).into()
    }

    /// A color value.
    #[must_use]
    pub fn color(color: Color) -> Self {
        ValueData::Color(color).into()
    }

    /// A number value.
    #[must_use]
    pub fn number(number: f64) -> Self {
        ValueData::Number(number).into()
    }

    /// A keyword value.
    #[must_use]
    pub fn keyword(keyword: Keyword) -> Self {
        ValueData::Keyword(keyword).into()
    }

    /// A character value.
    #[must_use]
    pub fn character(character: char) -> Self {
        ValueData::Character(character).into()
    }

    /// A compound value.
    #[must_use]
    pub fn compound(compound: Compound) -> Self {
        ValueData::Compound(compound).into()
    }

    /// A list value.
    #[must_use]
    pub fn list(values: Vec<Self>) -> Self {
        ValueData::List(ValueList::new(values)).into()
    }

    /// A string value.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        ValueData::String(text.into()).into()
    }

    /// Attach the originally specified text.
    #[must_use]
    pub fn with_specified(mut self, text: impl Into<String>) -> Self {
        self.specified = Some(text.into());
        self
    }

    /// The payload.
    #[must_use]
    pub const fn data(&self) -> &ValueData {
        &self.data
    }

    /// The text the author wrote, when this value came from an attribute.
    #[must_use]
    pub fn specified(&self) -> Option<&str> {
        self.specified.as_deref()
    }

    /// The tag of the payload.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.data.kind()
    }

    /// The length payload, if this is a length.
    #[must_use]
    pub const fn as_length(&self) -> Option<Length> {
        match self.data {
            ValueData::Length(length) => Some(length),
            _ => None,
        }
    }

    /// The color payload, if this is a color.
    #[must_use]
    pub const fn as_color(&self) -> Option<Color> {
        match self.data {
            ValueData::Color(color) => Some(color),
            _ => None,
        }
    }

    /// The number payload, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self.data {
            ValueData::Number(number) => Some(number),
            _ => None,
        }
    }

    /// The keyword payload, if this is a keyword.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.data {
            ValueData::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// The character payload, if this is a character.
    #[must_use]
    pub const fn as_character(&self) -> Option<char> {
        match self.data {
            ValueData::Character(character) => Some(character),
            _ => None,
        }
    }

    /// The compound payload, if this is a compound.
    #[must_use]
    pub const fn as_compound(&self) -> Option<&Compound> {
        match &self.data {
            ValueData::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// The list payload, if this is a list.
    #[must_use]
    pub const fn as_list(&self) -> Option<&ValueList> {
        match &self.data {
            ValueData::List(list) => Some(list),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(text) => Some(text),
            _ => None,
        }
    }

    /// The bare name this value was written as, for keywords and names.
    ///
    /// Used to look a token up in a property's enumerated and substitution
    /// tables before treating it as a literal.
    #[must_use]
    pub fn name_token(&self) -> Option<&str> {
        match &self.data {
            ValueData::Keyword(keyword) => Some(keyword.name()),
            ValueData::String(text) => Some(text),
            _ => None,
        }
    }

    /// Rebuild the value with every length inside it (including compound
    /// components and list items) passed through `f`.
    ///
    /// # Errors
    ///
    /// Returns the first error `f` reports.
    pub fn try_map_lengths<E>(
        &self,
        f: &mut impl FnMut(Length) -> Result<Length, E>,
    ) -> Result<Self, E> {
        let data = match &self.data {
            ValueData::Length(length) => ValueData::Length(f(*length)?),
            ValueData::Compound(compound) => {
                ValueData::Compound(compound.try_map(|v| v.try_map_lengths(f))?)
            }
            ValueData::List(list) => ValueData::List(list.try_map(|v| v.try_map_lengths(f))?),
            other => other.clone(),
        };
        Ok(Self {
            data,
            specified: self.specified.clone(),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            ValueData::Length(length) => write!(f, "{length}"),
            ValueData::Color(color) => write!(f, "{color}"),
            ValueData::Number(number) => write!(f, "{number}"),
            ValueData::Keyword(keyword) => f.write_str(keyword.name()),
            ValueData::Character(character) => write!(f, "'{character}'"),
            ValueData::Compound(compound) => {
                f.write_str("[")?;
                for (i, (component, value)) in compound.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{component}={value}")?;
                }
                f.write_str("]")
            }
            ValueData::List(list) => {
                for (i, value) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            ValueData::String(text) => write!(f, "\"{text}\""),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.data {
            ValueData::Length(length) => length.serialize(serializer),
            ValueData::Color(color) => color.serialize(serializer),
            ValueData::Number(number) => serializer.serialize_f64(*number),
            ValueData::Keyword(keyword) => keyword.serialize(serializer),
            ValueData::Character(character) => serializer.serialize_char(*character),
            ValueData::Compound(compound) => compound.serialize(serializer),
            ValueData::List(list) => list.serialize(serializer),
            ValueData::String(text) => serializer.serialize_str(text),
        }
    }
}
