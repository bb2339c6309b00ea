//! XSL-FO property registry, cascade, and value resolution for Folio.
//!
//! # Scope
//!
//! This crate implements:
//! - **Property Registry** ([XSL 1.1 § 7](https://www.w3.org/TR/xsl11/))
//!   - One descriptor per property: initial value, inheritance, datatypes,
//!     enumerated keywords, keyword substitutions
//!   - Sealed, read-only table shared by every node
//!
//! - **Value Resolution** ([XSL 1.1 § 5](https://www.w3.org/TR/xsl11/))
//!   - Explicit, computed, shorthand, inherited and initial values
//!   - Corresponding relative/absolute properties per writing mode
//!   - Em and percentage lengths made absolute against the defining node
//!   - Cycle detection
//!
//! - **Shorthands** ([XSL 1.1 § 7.31](https://www.w3.org/TR/xsl11/))
//!   - Positional (margin, padding, border-width)
//!   - By datatype (border, border-top)
//!   - Keyword maps (page-break-before)
//!
//! - **Attribute Parsing** ([XSL 1.1 § 5.9](https://www.w3.org/TR/xsl11/))
//!   - Literal lengths, numbers, colors, keywords and strings
//!   - Compound component attributes (`space-before.optimum`)
//!
//! # Not Yet Implemented
//!
//! - Expression arithmetic and property-value functions
//! - Layout-dependent percentage bases beyond what a [`Measurements`] source supplies

/// Relative/absolute property families per [XSL 1.1 § 5.3](https://www.w3.org/TR/xsl11/).
pub mod corresponding;
/// Resolution errors.
pub mod error;
/// The XSL-FO property table per [XSL 1.1 § 7](https://www.w3.org/TR/xsl11/).
pub mod mapping;
/// Measurements supplied by layout for percentage bases.
pub mod measure;
/// Attribute parsing per [XSL 1.1 § 5.9](https://www.w3.org/TR/xsl11/).
pub mod parse;
/// Property identifiers.
pub mod property;
/// Per-node property storage.
pub mod property_list;
/// Property descriptors and the sealed registry.
pub mod registry;
/// The resolution cascade per [XSL 1.1 § 5](https://www.w3.org/TR/xsl11/).
pub mod resolver;
/// Shorthand expansion per [XSL 1.1 § 7.31](https://www.w3.org/TR/xsl11/).
pub mod shorthand;
/// Propagated text decorations per [XSL 1.1 § 7.17.4](https://www.w3.org/TR/xsl11/).
pub mod text_decoration;
/// Property lists for a whole formatting-object tree.
pub mod tree;
/// Property value types per [XSL 1.1 § 5.11](https://www.w3.org/TR/xsl11/).
pub mod values;
/// Writing modes per [XSL 1.1 § 7.29.7](https://www.w3.org/TR/xsl11/).
pub mod writing_mode;

// Re-exports for convenience
pub use error::{ResolutionError, Result};
pub use mapping::fo_registry;
pub use measure::{FixedMeasurements, Measurements, NoMeasurements};
pub use parse::{apply_attribute, parse_literal, parse_specified, populate};
pub use property::PropertyId;
pub use property_list::PropertyList;
pub use registry::{DefaultValue, PercentBase, PropertyEntry, PropertyRegistry, RegistryBuilder};
pub use resolver::{Resolver, Scope};
pub use text_decoration::TextDecorations;
pub use tree::{AttributeError, PropertyTree, ResolvedNode};
pub use values::{Color, Component, Compound, Keyword, Length, Value, ValueKind};
pub use writing_mode::{PhysicalSide, RelativeEdge, WritingMode};
