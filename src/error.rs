use thiserror::Error;

use crate::value::{PropertyData, ValueKind};

/// Builds an [`Error::PropertyNotFound`] for the given type, property and access direction.
///
/// ```rust, ignore
/// return Err(not_found!(info.type_name(), name, Access::Read));
/// ```
macro_rules! not_found {
    ($type_name:expr, $property:expr, $access:expr) => {
        crate::Error::PropertyNotFound {
            type_name: $type_name.to_string(),
            property: $property.to_string(),
            access: $access,
        }
    };
}

/// The accessor direction that was required when a property lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Access {
    /// The property name itself is unknown
    #[strum(to_string = "property")]
    Any,
    /// A read accessor was required
    #[strum(to_string = "readable property")]
    Read,
    /// A write accessor was required
    #[strum(to_string = "writable property")]
    Write,
}

/// The generic Error type, which covers every failure this library can return.
///
/// Each variant carries enough context (type name, property name, offending value)
/// to diagnose the failure without re-deriving any state. None of these failures are
/// transient: given the same inputs the same error is produced again, so callers
/// should never retry without changing their inputs.
///
/// # Error Categories
///
/// ## Introspection
/// - [`Error::Introspection`] - A type's registration could not be turned into metadata
/// - [`Error::PropertyNotFound`] - Unknown property, or missing read/write accessor
/// - [`Error::MethodNotFound`] - Unknown method
///
/// ## Property access
/// - [`Error::TypeMismatch`] - A value could not be coerced to the declared property type
/// - [`Error::ConstantNotFound`] - A name does not denote a constant of an enumerated type
/// - [`Error::ArgumentCount`] - A method was invoked with the wrong number of arguments
///
/// ## Copying and instantiation
/// - [`Error::ClassMismatch`] - Source and target of a copy are incompatible
/// - [`Error::NotInstantiable`] - No constructor has been registered for a type
/// - [`Error::ConstructionFailed`] - A registered constructor reported a failure
///
/// ## Definition overlay
/// - [`Error::ParentNotFound`] - A parent definition name could not be resolved
/// - [`Error::ConfigurationCycle`] - A definition is its own transitive ancestor
/// - [`Error::RecursionLimit`] - A parent chain exceeds the configured depth
///
/// # Examples
///
/// ```rust
/// use beanprop::{Error, ErrorKind};
///
/// let error = Error::ParentNotFound { parent: "datasource".to_string() };
/// assert_eq!(error.kind(), ErrorKind::ParentNotFound);
/// assert_eq!(error.to_string(), "No parent definition named [datasource]");
/// ```
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The property metadata for a type could not be computed.
    ///
    /// The failure is recorded by the [`crate::metadata::MetadataCache`] and replayed,
    /// with an identical message, on every later lookup of the same type.
    #[error("Cannot introspect type [{type_name}]: {message}")]
    Introspection {
        /// The type whose registration failed
        type_name: String,
        /// Description of the registration failure
        message: String,
    },

    /// The named property is not known for a type, or lacks the required accessor.
    #[error("No {access} [{property}] in type [{type_name}]")]
    PropertyNotFound {
        /// The type that was searched
        type_name: String,
        /// The requested property
        property: String,
        /// Which accessor direction was required
        access: Access,
    },

    /// The named method is not known for a type.
    #[error("No method [{method}] in type [{type_name}]")]
    MethodNotFound {
        /// The type that was searched
        type_name: String,
        /// The requested method
        method: String,
    },

    /// A value could not be converted to the type a property (or argument) requires.
    ///
    /// This is the dominant user-visible failure. It keeps the rejected value, the
    /// shape it arrived with, the required type, and the property name.
    #[error("Failed to convert property value of type [{actual}] to required type [{required}] for property named [{property}]")]
    TypeMismatch {
        /// The property (or `method(argN)`) being written
        property: String,
        /// The rejected value
        value: PropertyData,
        /// The shape of the rejected value
        actual: ValueKind,
        /// The declared type of the property
        required: ValueKind,
    },

    /// A name does not denote a constant of an enumerated type.
    #[error("Constant [{name}] not found in [{type_name}]")]
    ConstantNotFound {
        /// The enumerated type that was searched
        type_name: String,
        /// The name that was looked up
        name: String,
    },

    /// A method was invoked with the wrong number of arguments.
    #[error("Method [{method}] expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// The invoked method
        method: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// Source and target of a copy are not compatible.
    ///
    /// Raised before any property of the target is touched.
    #[error("Target of type [{target_type}] is not assignable from source of type [{source_type}]")]
    ClassMismatch {
        /// The type of the copy source
        source_type: String,
        /// The type of the copy target
        target_type: String,
    },

    /// No constructor has been registered for a type.
    #[error("Cannot instantiate [{type_name}]; no constructor is registered for it")]
    NotInstantiable {
        /// The type that was requested
        type_name: String,
    },

    /// A registered constructor failed.
    #[error("Construction of [{type_name}] failed: {message}")]
    ConstructionFailed {
        /// The type that was being constructed
        type_name: String,
        /// Failure reported by the constructor
        message: String,
    },

    /// A child definition names a parent that the registry does not know.
    #[error("No parent definition named [{parent}]")]
    ParentNotFound {
        /// The unresolved parent name
        parent: String,
    },

    /// A definition is its own transitive ancestor.
    ///
    /// The chain lists the parent names in resolution order, ending with the
    /// name that closed the cycle.
    #[error("Cycle in parent definitions: {}", chain.join(" -> "))]
    ConfigurationCycle {
        /// Parent names in the order they were resolved
        chain: Vec<String>,
    },

    /// Recursion limit reached.
    ///
    /// A parent chain was longer than the configured maximum depth.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}

/// The closed set of error kinds, one per [`Error`] variant.
///
/// Lets callers branch on the failure category without matching on the variant fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum ErrorKind {
    /// See [`Error::Introspection`]
    Introspection,
    /// See [`Error::PropertyNotFound`]
    PropertyNotFound,
    /// See [`Error::MethodNotFound`]
    MethodNotFound,
    /// See [`Error::TypeMismatch`]
    TypeMismatch,
    /// See [`Error::ConstantNotFound`]
    ConstantNotFound,
    /// See [`Error::ArgumentCount`]
    ArgumentCount,
    /// See [`Error::ClassMismatch`]
    ClassMismatch,
    /// See [`Error::NotInstantiable`]
    NotInstantiable,
    /// See [`Error::ConstructionFailed`]
    ConstructionFailed,
    /// See [`Error::ParentNotFound`]
    ParentNotFound,
    /// See [`Error::ConfigurationCycle`]
    ConfigurationCycle,
    /// See [`Error::RecursionLimit`]
    RecursionLimit,
}

impl Error {
    /// Returns the kind of this error, for programmatic discrimination.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Introspection { .. } => ErrorKind::Introspection,
            Error::PropertyNotFound { .. } => ErrorKind::PropertyNotFound,
            Error::MethodNotFound { .. } => ErrorKind::MethodNotFound,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::ConstantNotFound { .. } => ErrorKind::ConstantNotFound,
            Error::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            Error::ClassMismatch { .. } => ErrorKind::ClassMismatch,
            Error::NotInstantiable { .. } => ErrorKind::NotInstantiable,
            Error::ConstructionFailed { .. } => ErrorKind::ConstructionFailed,
            Error::ParentNotFound { .. } => ErrorKind::ParentNotFound,
            Error::ConfigurationCycle { .. } => ErrorKind::ConfigurationCycle,
            Error::RecursionLimit(_) => ErrorKind::RecursionLimit,
        }
    }

    /// Builds a [`Error::TypeMismatch`] for `value`, which was rejected by `property`.
    pub(crate) fn type_mismatch(property: &str, value: PropertyData, required: &ValueKind) -> Self {
        Error::TypeMismatch {
            property: property.to_string(),
            actual: value.kind(),
            value,
            required: required.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let error = Error::type_mismatch(
            "age",
            PropertyData::String("old".to_string()),
            &ValueKind::I32,
        );

        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            error.to_string(),
            "Failed to convert property value of type [string] to required type [i32] for property named [age]"
        );

        match error {
            Error::TypeMismatch {
                property,
                value,
                actual,
                required,
            } => {
                assert_eq!(property, "age");
                assert_eq!(value, PropertyData::String("old".to_string()));
                assert_eq!(actual, ValueKind::String);
                assert_eq!(required, ValueKind::I32);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_not_found_access_direction() {
        let error = not_found!("Dog", "name", Access::Write);
        assert_eq!(error.kind(), ErrorKind::PropertyNotFound);
        assert_eq!(
            error.to_string(),
            "No writable property [name] in type [Dog]"
        );
    }

    #[test]
    fn test_every_kind_displays_its_name() {
        use strum::IntoEnumIterator;

        let names: Vec<String> = ErrorKind::iter().map(|kind| kind.to_string()).collect();
        assert_eq!(names.len(), 12);
        assert!(names.contains(&"ClassMismatch".to_string()));
        assert!(names.contains(&"RecursionLimit".to_string()));
    }

    #[test]
    fn test_cycle_message() {
        let error = Error::ConfigurationCycle {
            chain: vec!["b".to_string(), "a".to_string(), "b".to_string()],
        };
        assert_eq!(error.to_string(), "Cycle in parent definitions: b -> a -> b");
        assert_eq!(error.kind().to_string(), "ConfigurationCycle");
    }
}
