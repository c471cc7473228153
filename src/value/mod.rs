//! Property values, value sets and value conversion.
//!
//! This module holds everything that travels between beans: the untyped [`PropertyData`], the
//! named [`PropertyValue`], the ordered [`PropertyValueSet`] that represents one update, and the
//! conversion rules applied when a value is written to a property of a different type.
//!
//! # Key Components
//!
//! - [`PropertyData`]: An opaque property value (scalars, strings, constants, shared objects)
//! - [`ValueKind`]: The shape of a value, or the declared type of a property
//! - [`PropertyType`]: Bridges typed Rust values and [`PropertyData`]
//! - [`PropertyValueSet`]: Ordered, name-unique update with a one-directional diff
//! - [`convert`]: Coercion of a value to a declared [`ValueKind`]
//! - [`ConstantSet`]: Named constants of an enumerated type

mod convert;
mod data;
mod property;

pub use convert::{convert, widens};
pub use data::{Constant, ConstantSet, ObjectRef, PropertyData, PropertyType, ValueKind};
pub use property::{PropertyValue, PropertyValueSet};
