//! Working with bean instances and bean definitions.
//!
//! Everything in this module sits on top of the [`crate::metadata`] cache: accessors read and
//! write properties of one instance by name, the copier moves property values between instances,
//! and definitions describe (possibly inherited) property values for a bean before it exists.
//!
//! # Key Components
//!
//! - [`PropertyReader`] / [`PropertyAccessor`]: Name-based access to one instance
//! - [`PropertyCopier`], [`copy_properties`], [`copy_properties_ignoring`]: Bean-to-bean copies
//! - [`instantiate`]: Construction through a registered constructor
//! - [`BeanDefinition`], [`DefinitionResolver`], [`effective_properties_of`]: Definition overlay

mod accessor;
mod copier;
mod definition;
mod instantiate;

pub use accessor::{PropertyAccessor, PropertyReader};
pub use copier::{copy_properties, copy_properties_ignoring, PropertyCopier};
pub use definition::{effective_properties_of, BeanDefinition, DefinitionResolver};
pub use instantiate::{instantiate, instantiate_with};
