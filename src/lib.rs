// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # beanprop
//!
//! Property introspection, caching and copying for plain Rust values.
//!
//! `beanprop` treats arbitrary values as bags of named, typed properties. The metadata of a type
//! (its properties, methods, capabilities and constructor) is declared once, cached per type, and
//! reused by everything that reads, writes, copies or configures instances of that type without
//! knowing the concrete type in advance.
//!
//! ## Features
//!
//! - **Compute-once metadata** - Per-type descriptors in a concurrent cache, failures included
//! - **Name-based access** - Read and write properties by name with configurable conversion
//! - **Value sets** - Ordered, name-unique property updates with a one-directional diff
//! - **Bean copying** - Copy the intersection of accessible properties between compatible types
//! - **Definition overlay** - Child definitions inherit and override a parent's property values
//!
//! ## Quick Start
//!
//! ```rust
//! use beanprop::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct DataSource {
//!     url: String,
//!     pool_size: u32,
//!     read_only: bool,
//! }
//!
//! impl Introspect for DataSource {
//!     fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
//!         info.property("url", |d: &DataSource| d.url.clone(), |d, v| d.url = v)
//!             .property("pool_size", |d: &DataSource| d.pool_size, |d, v| d.pool_size = v)
//!             .property("read_only", |d: &DataSource| d.read_only, |d, v| d.read_only = v)
//!             .default_constructor();
//!         Ok(())
//!     }
//! }
//!
//! // Apply a set of (string) values, converted to the declared property types
//! let values = PropertyValueSet::new()
//!     .with("url", "jdbc:hsqldb:mem")
//!     .with("pool_size", "8")
//!     .with("read_only", "true");
//!
//! let mut primary = DataSource::default();
//! PropertyAccessor::new(&mut primary)?.set_all(&values)?;
//! assert_eq!(primary.pool_size, 8);
//!
//! // Copy everything but the pool size into a second instance
//! let mut replica = DataSource::default();
//! copy_properties_ignoring(&primary, &mut replica, &["pool_size"])?;
//! assert!(replica.read_only);
//! assert_eq!(replica.pool_size, 0);
//! # Ok::<(), beanprop::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - Registration ([`metadata::Introspect`]) and the [`metadata::MetadataCache`]
//! - [`value`] - [`value::PropertyData`], [`value::PropertyValueSet`] and value conversion
//! - [`beans`] - Accessors, the copier, instantiation and bean definitions
//! - [`config`] - [`BeanConfig`], which controls conversion and definition resolution
//!
//! ## Logging
//!
//! Cache population, copies and definition resolution emit [`tracing`] events. Nothing is
//! printed unless the application installs a subscriber.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], with [`Error`] carrying the type, property and
//! offending value involved. [`Error::kind`] maps every error onto the closed [`ErrorKind`] set.

#[macro_use]
pub(crate) mod error;
mod macros;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use beanprop::prelude::*;
///
/// let values = PropertyValueSet::new().with("port", 8080u16);
/// assert_eq!(values.get("port"), Some(&PropertyData::U16(8080)));
/// ```
pub mod prelude;

/// Conversion and resolution settings
///
/// See [`BeanConfig`] and its presets [`BeanConfig::strict`] and [`BeanConfig::lenient`].
pub mod config;

/// Per-type property and method metadata, and the cache holding it
pub mod metadata;

/// Property values, value sets and value conversion
pub mod value;

/// Accessors, copier, instantiation and bean definitions
pub mod beans;

/// `beanprop` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use beanprop::{value::PropertyValueSet, Result};
///
/// fn defaults() -> Result<PropertyValueSet> {
///     Ok(PropertyValueSet::new().with("timeout", 30u32))
/// }
/// # assert_eq!(defaults().unwrap().len(), 1);
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `beanprop` Error type
///
/// # Examples
///
/// ```rust
/// use beanprop::{value::{convert, PropertyData, ValueKind}, BeanConfig, Error};
///
/// match convert("port", PropertyData::from("eighty"), &ValueKind::U16, &BeanConfig::default()) {
///     Err(Error::TypeMismatch { property, value, .. }) => {
///         assert_eq!(property, "port");
///         assert_eq!(value, PropertyData::from("eighty"));
///     }
///     other => panic!("unexpected result {other:?}"),
/// }
/// ```
pub use error::Error;

pub use error::{Access, ErrorKind};

pub use config::BeanConfig;
