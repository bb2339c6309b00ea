//! Resolution errors

use thiserror::Error;

use crate::property::PropertyId;
use crate::values::ValueKind;

/// Failure to register, parse or resolve a property.
///
/// Per-node variants carry the element name so diagnostics can cite
/// "property X on element Y".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// The registry has no entry for the property.
    #[error("property `{property}` is not registered")]
    UnregisteredProperty {
        /// The missing property.
        property: PropertyId,
    },

    /// The registry builder saw the same property twice.
    #[error("property `{property}` registered more than once")]
    DuplicateRegistration {
        /// The repeated property.
        property: PropertyId,
    },

    /// A registry entry refers to something the registry cannot satisfy.
    #[error("registry entry for `{property}` is inconsistent: {reason}")]
    InconsistentRegistry {
        /// The offending entry.
        property: PropertyId,
        /// What is wrong with it.
        reason: String,
    },

    /// The cascade produced no value.
    #[error("no value for `{property}` on <{element}>")]
    NoConversion {
        /// The property being resolved.
        property: PropertyId,
        /// The element it was resolved on.
        element: String,
    },

    /// A shorthand value cannot be distributed to one of its components.
    #[error("`{shorthand}=\"{value}\"` on <{element}> does not yield a value for `{property}`")]
    InvalidShorthandComponent {
        /// The shorthand that was specified.
        shorthand: PropertyId,
        /// The component being resolved.
        property: PropertyId,
        /// The element the shorthand is on.
        element: String,
        /// The shorthand's value as written.
        value: String,
    },

    /// Corresponding-property resolution re-entered the same node and property.
    #[error("corresponding-property cycle while resolving `{property}` on <{element}>")]
    CorrespondingCycle {
        /// The property that was re-entered.
        property: PropertyId,
        /// The element it was re-entered on.
        element: String,
    },

    /// An explicit value's datatype is not one the property accepts.
    #[error("`{property}` does not accept a {found} value (expected one of: {expected})")]
    MismatchedValueKind {
        /// The property being set.
        property: PropertyId,
        /// The accepted datatypes, comma separated.
        expected: String,
        /// The datatype that was supplied.
        found: ValueKind,
    },

    /// Specified text that cannot be converted to a value of the property.
    #[error("invalid value \"{value}\" for `{property}`: {reason}")]
    InvalidValue {
        /// The property being parsed.
        property: PropertyId,
        /// The text as written.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result alias for this crate.
pub type Result<T, E = ResolutionError> = std::result::Result<T, E>;
