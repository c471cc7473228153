//! Property and method metadata for bean types.
//!
//! Rust has no runtime reflection, so a type opts into property access by implementing
//! [`Introspect`] and describing its properties, methods, capabilities and constructor through a
//! [`BeanInfoBuilder`]. The resulting [`BeanInfo`] is computed once per type and shared through
//! the [`MetadataCache`].
//!
//! # Key Components
//!
//! - [`Introspect`]: Registration hook implemented by bean types
//! - [`Bean`]: Object-safe view of any introspectable value
//! - [`BeanInfoBuilder`]: Builder used inside [`Introspect::introspect`]
//! - [`BeanInfo`]: The immutable, cached metadata of one type
//! - [`PropertyDescriptor`] / [`MethodDescriptor`]: Metadata of one property / method
//! - [`MetadataCache`]: Concurrent compute-once cache keyed by [`TypeKey`]
//!
//! # Examples
//!
//! ```rust
//! use beanprop::{metadata::{BeanInfoBuilder, Introspect, MetadataCache}, Result};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Introspect for Server {
//!     fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
//!         info.property("host", |s: &Server| s.host.clone(), |s, v| s.host = v)
//!             .property("port", |s: &Server| s.port, |s, v| s.port = v)
//!             .default_constructor();
//!         Ok(())
//!     }
//! }
//!
//! let info = MetadataCache::global().descriptors_for::<Server>()?;
//! assert_eq!(info.property_names().collect::<Vec<_>>(), ["host", "port"]);
//! assert!(info.property("port")?.is_writable());
//! # Ok::<(), beanprop::Error>(())
//! ```

mod builder;
mod cache;
mod descriptor;

use std::{
    any::{type_name, Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

pub use builder::{BeanInfo, BeanInfoBuilder};
pub use cache::MetadataCache;
pub use descriptor::{AccessFlags, MethodDescriptor, PropertyDescriptor};
pub(crate) use descriptor::WriteFailure;

use crate::Result;

/// Identity of a concrete bean type.
///
/// Equality and hashing use the `TypeId` only; the name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// The key of type `T`
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeKey {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The `TypeId` of the type
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The full name of the type
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Registration hook for bean types.
///
/// `introspect` is called at most once per type and [`MetadataCache`] (more often only when
/// several threads race on the very first lookup). It must be a pure function of the type: the
/// same registrations every time, no side effects. Returning an error, or registering an empty
/// or duplicate name, makes the type permanently un-introspectable for that cache.
pub trait Introspect: Any + Sized {
    /// Describe the properties, methods, capabilities and constructor of this type
    ///
    /// # Errors
    /// Any error marks the type as un-introspectable; it is replayed on every lookup.
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()>;
}

/// Object-safe view of an introspectable value.
///
/// Implemented for every [`Introspect`] type, so `&mut dyn Bean` can stand for any bean when the
/// concrete type is not known in advance.
pub trait Bean: Any {
    /// The key of the concrete type
    fn type_key(&self) -> TypeKey;

    /// Look up the metadata of the concrete type in `cache`
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if the type cannot be introspected.
    fn introspect_with(&self, cache: &MetadataCache) -> Result<Arc<BeanInfo>>;

    /// Look up the metadata of the concrete type in the global cache
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if the type cannot be introspected.
    fn bean_info(&self) -> Result<Arc<BeanInfo>> {
        self.introspect_with(MetadataCache::global())
    }

    /// Upcast to `Any`
    fn as_any(&self) -> &dyn Any;

    /// Upcast to mutable `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcast an owned bean to `Any`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Introspect> Bean for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn introspect_with(&self, cache: &MetadataCache) -> Result<Arc<BeanInfo>> {
        cache.descriptors_for::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
