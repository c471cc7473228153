//! Registration builder and the cached per-type metadata.
//!
//! This module provides the [`BeanInfoBuilder`], a fluent API handed to
//! [`crate::metadata::Introspect::introspect`] to declare the properties, methods, capabilities
//! and constructor of a bean type, and the immutable [`BeanInfo`] it produces.
//!
//! Typed getters and setters are erased into closures over `dyn Any` at registration time, so
//! the accessor can work with a bean whose concrete type it does not know.

use std::{any::Any, fmt, marker::PhantomData, sync::Arc};

use indexmap::{map::Entry, IndexMap};

use crate::{
    error::Access,
    metadata::{
        descriptor::{Invoker, Reader, WriteFailure, Writer},
        Bean, Introspect, MethodDescriptor, PropertyDescriptor, TypeKey,
    },
    value::{PropertyData, PropertyType, ValueKind},
    Error::{self, ConstructionFailed, MethodNotFound, NotInstantiable},
    Result,
};

type Constructor = Arc<dyn Fn() -> std::result::Result<Box<dyn Bean>, String> + Send + Sync>;

/// Provides a fluent API for describing a bean type
///
/// Handed to [`Introspect::introspect`]; the registrations are validated when the cache turns
/// the builder into a [`BeanInfo`]. Property order is registration order.
pub struct BeanInfoBuilder<T> {
    properties: Vec<PropertyDescriptor>,
    methods: Vec<MethodDescriptor>,
    assignable_to: Vec<TypeKey>,
    constructor: Option<Constructor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Introspect> BeanInfoBuilder<T> {
    pub(crate) fn new() -> Self {
        BeanInfoBuilder {
            properties: Vec::new(),
            methods: Vec::new(),
            assignable_to: Vec::new(),
            constructor: None,
            _marker: PhantomData,
        }
    }

    /// Register a readable and writable property
    ///
    /// ## Arguments
    /// * `name` - The property name, unique within the type
    /// * `get`  - Reads the current value
    /// * `set`  - Stores a new value
    pub fn property<V, G, S>(&mut self, name: &str, get: G, set: S) -> &mut Self
    where
        V: PropertyType,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push_property::<V>(
            name,
            Some(erase_reader::<T, V, G>(get)),
            Some(erase_writer::<T, V, S>(set)),
        )
    }

    /// Register a property that can only be read
    pub fn read_only<V, G>(&mut self, name: &str, get: G) -> &mut Self
    where
        V: PropertyType,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.push_property::<V>(name, Some(erase_reader::<T, V, G>(get)), None)
    }

    /// Register a property that can only be written
    pub fn write_only<V, S>(&mut self, name: &str, set: S) -> &mut Self
    where
        V: PropertyType,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push_property::<V>(name, None, Some(erase_writer::<T, V, S>(set)))
    }

    fn push_property<V: PropertyType>(
        &mut self,
        name: &str,
        reader: Option<Reader>,
        writer: Option<Writer>,
    ) -> &mut Self {
        self.properties.push(PropertyDescriptor::new(
            name.to_string(),
            V::value_kind(),
            reader,
            writer,
        ));
        self
    }

    /// Register a method with untyped arguments
    ///
    /// Arguments are converted to `parameters` by the accessor before `invoke` runs.
    ///
    /// ## Arguments
    /// * `name`       - The method name, unique within the type
    /// * `parameters` - The declared parameter types
    /// * `returns`    - The declared return type
    /// * `invoke`     - Runs the method
    pub fn method<F>(
        &mut self,
        name: &str,
        parameters: Vec<ValueKind>,
        returns: ValueKind,
        invoke: F,
    ) -> &mut Self
    where
        F: Fn(&mut T, Vec<PropertyData>) -> Result<PropertyData> + Send + Sync + 'static,
    {
        let type_name = TypeKey::of::<T>().name();
        let invoker: Invoker = Arc::new(move |bean: &mut dyn Any, args: Vec<PropertyData>| {
            let bean = bean
                .downcast_mut::<T>()
                .ok_or_else(|| Error::ClassMismatch {
                    source_type: "dyn Any".to_string(),
                    target_type: type_name.to_string(),
                })?;
            invoke(bean, args)
        });

        self.methods.push(MethodDescriptor::new(
            name.to_string(),
            parameters,
            returns,
            invoker,
        ));
        self
    }

    /// Register a method without arguments
    pub fn method0<R, F>(&mut self, name: &str, f: F) -> &mut Self
    where
        R: PropertyType,
        F: Fn(&mut T) -> R + Send + Sync + 'static,
    {
        self.method(name, Vec::new(), R::value_kind(), move |bean, _| {
            Ok(f(bean).into_data())
        })
    }

    /// Register a method with one argument
    pub fn method1<A, R, F>(&mut self, name: &str, f: F) -> &mut Self
    where
        A: PropertyType,
        R: PropertyType,
        F: Fn(&mut T, A) -> R + Send + Sync + 'static,
    {
        let argument = format!("{name}(arg0)");
        self.method(
            name,
            vec![A::value_kind()],
            R::value_kind(),
            move |bean, mut args| {
                let data = args.pop().unwrap_or_default();
                let arg = A::from_data(data).map_err(|rejected| {
                    Error::type_mismatch(&argument, rejected, &A::value_kind())
                })?;
                Ok(f(bean, arg).into_data())
            },
        )
    }

    /// Declare that instances of this type may be copied into instances of `U`
    ///
    /// This is the capability (or supertype) relation checked by the property copier.
    pub fn assignable_to<U: Any>(&mut self) -> &mut Self {
        self.assignable_to.push(TypeKey::of::<U>());
        self
    }

    /// Register an infallible constructor
    pub fn constructor<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(move || Ok(Box::new(f()) as Box<dyn Bean>)));
        self
    }

    /// Register a constructor that may fail
    pub fn fallible_constructor<E, F>(&mut self, f: F) -> &mut Self
    where
        E: fmt::Display,
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(move || {
            f().map(|bean| Box::new(bean) as Box<dyn Bean>)
                .map_err(|error| error.to_string())
        }));
        self
    }

    /// Register `T::default` as constructor
    pub fn default_constructor(&mut self) -> &mut Self
    where
        T: Default,
    {
        self.constructor(T::default)
    }

    /// Validate the registrations and produce the metadata
    ///
    /// # Errors
    /// Returns a description of the first empty or duplicate property or method name.
    pub(crate) fn build(self) -> std::result::Result<BeanInfo, String> {
        let mut properties = IndexMap::with_capacity(self.properties.len());
        for descriptor in self.properties {
            if descriptor.name().is_empty() {
                return Err("property with an empty name".to_string());
            }
            match properties.entry(descriptor.name().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(format!("duplicate property [{}]", entry.key()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(descriptor);
                }
            }
        }

        let mut methods = IndexMap::with_capacity(self.methods.len());
        for descriptor in self.methods {
            if descriptor.name().is_empty() {
                return Err("method with an empty name".to_string());
            }
            match methods.entry(descriptor.name().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(format!("duplicate method [{}]", entry.key()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(descriptor);
                }
            }
        }

        Ok(BeanInfo {
            key: TypeKey::of::<T>(),
            properties,
            methods,
            assignable_to: self.assignable_to,
            constructor: self.constructor,
        })
    }
}

fn erase_reader<T, V, G>(get: G) -> Reader
where
    T: Any,
    V: PropertyType,
    G: Fn(&T) -> V + Send + Sync + 'static,
{
    Arc::new(move |bean: &dyn Any| bean.downcast_ref::<T>().map(|bean| get(bean).into_data()))
}

fn erase_writer<T, V, S>(set: S) -> Writer
where
    T: Any,
    V: PropertyType,
    S: Fn(&mut T, V) + Send + Sync + 'static,
{
    Arc::new(move |bean: &mut dyn Any, data: PropertyData| {
        let bean = bean
            .downcast_mut::<T>()
            .ok_or(WriteFailure::WrongTarget)?;
        let value = V::from_data(data).map_err(WriteFailure::Rejected)?;
        set(bean, value);
        Ok(())
    })
}

/// The immutable, cached metadata of one bean type.
///
/// Obtained from [`crate::metadata::MetadataCache::descriptors_for`] or
/// [`crate::metadata::Bean::bean_info`]. Holds the property descriptors in registration order,
/// the method descriptors, the types this type may be copied into, and the constructor.
pub struct BeanInfo {
    key: TypeKey,
    properties: IndexMap<String, PropertyDescriptor>,
    methods: IndexMap<String, MethodDescriptor>,
    assignable_to: Vec<TypeKey>,
    constructor: Option<Constructor>,
}

impl BeanInfo {
    /// The key of the described type
    #[must_use]
    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    /// The name of the described type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.key.name()
    }

    /// Property names in registration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Property descriptors in registration order
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.values()
    }

    /// Number of registered properties
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Returns the named property descriptor, if there is one
    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    /// Returns the named property descriptor
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyNotFound`] if the type has no such property.
    pub fn property(&self, name: &str) -> Result<&PropertyDescriptor> {
        self.find_property(name)
            .ok_or_else(|| not_found!(self.type_name(), name, Access::Any))
    }

    /// Method descriptors in registration order
    pub fn methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.values()
    }

    /// Returns the named method descriptor
    ///
    /// # Errors
    /// Returns [`crate::Error::MethodNotFound`] if the type has no such method.
    pub fn method(&self, name: &str) -> Result<&MethodDescriptor> {
        self.methods.get(name).ok_or_else(|| MethodNotFound {
            type_name: self.type_name().to_string(),
            method: name.to_string(),
        })
    }

    /// The types (besides itself) this type has been declared assignable to
    #[must_use]
    pub fn assignable_types(&self) -> &[TypeKey] {
        &self.assignable_to
    }

    /// Returns true if an instance of this type may be copied into an instance of `target`
    #[must_use]
    pub fn is_assignable_to(&self, target: &TypeKey) -> bool {
        self.key == *target || self.assignable_to.contains(target)
    }

    /// Returns true if a constructor has been registered
    #[must_use]
    pub fn is_instantiable(&self) -> bool {
        self.constructor.is_some()
    }

    /// Create a new instance through the registered constructor
    ///
    /// # Errors
    /// Returns [`crate::Error::NotInstantiable`] if no constructor is registered, or
    /// [`crate::Error::ConstructionFailed`] if the constructor failed.
    pub fn instantiate(&self) -> Result<Box<dyn Bean>> {
        let constructor = self.constructor.as_ref().ok_or_else(|| NotInstantiable {
            type_name: self.type_name().to_string(),
        })?;

        constructor().map_err(|message| ConstructionFailed {
            type_name: self.type_name().to_string(),
            message,
        })
    }
}

impl fmt::Debug for BeanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInfo")
            .field("type", &self.key)
            .field("properties", &self.properties)
            .field("methods", &self.methods)
            .field("assignable_to", &self.assignable_to)
            .field("instantiable", &self.constructor.is_some())
            .finish()
    }
}
