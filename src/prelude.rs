//! # beanprop Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the beanprop library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all beanprop operations
pub use crate::Error;

/// The closed set of error kinds
pub use crate::ErrorKind;

/// The result type used throughout beanprop
pub use crate::Result;

/// Conversion and resolution settings
pub use crate::BeanConfig;

// ================================================================================================
// Metadata
// ================================================================================================

/// Registration and object-safe bean view
pub use crate::metadata::{Bean, BeanInfoBuilder, Introspect};

/// Cached metadata
pub use crate::metadata::{AccessFlags, BeanInfo, MetadataCache, PropertyDescriptor};

// ================================================================================================
// Values
// ================================================================================================

/// Property values and value sets
pub use crate::value::{PropertyData, PropertyValue, PropertyValueSet, ValueKind};

/// Enumerated constants
pub use crate::value::{ConstantSet, PropertyType};

// ================================================================================================
// Beans
// ================================================================================================

/// Name-based access to one instance
pub use crate::beans::{PropertyAccessor, PropertyReader};

/// Copying between instances
pub use crate::beans::{copy_properties, copy_properties_ignoring, PropertyCopier};

/// Bean definitions
pub use crate::beans::{effective_properties_of, BeanDefinition, DefinitionResolver};
