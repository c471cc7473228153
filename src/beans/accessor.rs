//! Name-based property access on a single bean instance.
//!
//! [`PropertyReader`] wraps a shared reference and offers the read half, [`PropertyAccessor`]
//! wraps a mutable reference and adds converting writes and method invocation. Both resolve
//! their metadata once, at construction, through a [`MetadataCache`].
//!
//! # Examples
//!
//! ```rust
//! use beanprop::{beans::PropertyAccessor, metadata::{BeanInfoBuilder, Introspect}, Result};
//!
//! #[derive(Default)]
//! struct Pool {
//!     size: u32,
//! }
//!
//! impl Introspect for Pool {
//!     fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
//!         info.property("size", |p: &Pool| p.size, |p, v| p.size = v);
//!         Ok(())
//!     }
//! }
//!
//! let mut pool = Pool::default();
//! let mut accessor = PropertyAccessor::new(&mut pool)?;
//! accessor.set("size", "16")?;
//! assert_eq!(accessor.get("size")?.as_i64(), Some(16));
//! # Ok::<(), beanprop::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    error::Access,
    metadata::{Bean, BeanInfo, MetadataCache, PropertyDescriptor, WriteFailure},
    value::{convert, PropertyData, PropertyValueSet},
    BeanConfig, Error, Result,
};

/// Read-only, name-based view of one bean instance
pub struct PropertyReader<'a> {
    bean: &'a dyn Bean,
    info: Arc<BeanInfo>,
}

impl<'a> PropertyReader<'a> {
    /// Create a reader backed by the global metadata cache
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if the bean's type cannot be introspected.
    pub fn new(bean: &'a dyn Bean) -> Result<Self> {
        Self::with_cache(bean, MetadataCache::global())
    }

    /// Create a reader backed by `cache`
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if the bean's type cannot be introspected.
    pub fn with_cache(bean: &'a dyn Bean, cache: &MetadataCache) -> Result<Self> {
        let info = bean.introspect_with(cache)?;
        Ok(PropertyReader { bean, info })
    }

    /// The metadata of the wrapped bean
    #[must_use]
    pub fn bean_info(&self) -> &Arc<BeanInfo> {
        &self.info
    }

    /// Property names in registration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.info.property_names()
    }

    /// Returns the named property descriptor
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyNotFound`] if there is no such property.
    pub fn descriptor(&self, name: &str) -> Result<&PropertyDescriptor> {
        self.info.property(name)
    }

    /// Returns true if the named property exists and can be read
    #[must_use]
    pub fn is_readable(&self, name: &str) -> bool {
        self.info
            .find_property(name)
            .is_some_and(PropertyDescriptor::is_readable)
    }

    /// Returns true if the named property exists and can be written
    #[must_use]
    pub fn is_writable(&self, name: &str) -> bool {
        self.info
            .find_property(name)
            .is_some_and(PropertyDescriptor::is_writable)
    }

    /// Read the named property
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyNotFound`] if there is no such property or it is
    /// write-only.
    pub fn get(&self, name: &str) -> Result<PropertyData> {
        read(self.bean, &self.info, name)
    }

    /// Read every readable property, in registration order
    ///
    /// # Errors
    /// Only fails if a registered reader rejects the bean, which indicates a broken registration.
    pub fn snapshot(&self) -> Result<PropertyValueSet> {
        let mut values = PropertyValueSet::new();
        for descriptor in self.info.properties().filter(|d| d.is_readable()) {
            values.add(descriptor.name(), read(self.bean, &self.info, descriptor.name())?);
        }
        Ok(values)
    }
}

/// Name-based, converting property access on one bean instance.
///
/// Values written through [`PropertyAccessor::set`] are converted to the declared type of the
/// property according to the accessor's [`BeanConfig`]. The accessor does not synchronize; a
/// bean shared between threads has to be guarded by the caller.
pub struct PropertyAccessor<'a> {
    bean: &'a mut dyn Bean,
    info: Arc<BeanInfo>,
    config: BeanConfig,
}

impl<'a> PropertyAccessor<'a> {
    /// Create an accessor backed by the global metadata cache, using the default configuration
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if the bean's type cannot be introspected.
    pub fn new(bean: &'a mut dyn Bean) -> Result<Self> {
        Self::with_cache(bean, MetadataCache::global())
    }

    /// Create an accessor backed by `cache`, using the default configuration
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if the bean's type cannot be introspected.
    pub fn with_cache(bean: &'a mut dyn Bean, cache: &MetadataCache) -> Result<Self> {
        let info = bean.introspect_with(cache)?;
        Ok(PropertyAccessor {
            bean,
            info,
            config: BeanConfig::default(),
        })
    }

    /// Replace the conversion configuration
    #[must_use]
    pub fn with_config(mut self, config: BeanConfig) -> Self {
        self.config = config;
        self
    }

    /// The conversion configuration in use
    #[must_use]
    pub fn config(&self) -> &BeanConfig {
        &self.config
    }

    /// The metadata of the wrapped bean
    #[must_use]
    pub fn bean_info(&self) -> &Arc<BeanInfo> {
        &self.info
    }

    /// Borrow the read half of this accessor
    #[must_use]
    pub fn reader(&self) -> PropertyReader<'_> {
        PropertyReader {
            bean: &*self.bean,
            info: Arc::clone(&self.info),
        }
    }

    /// Property names in registration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.info.property_names()
    }

    /// Returns the named property descriptor
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyNotFound`] if there is no such property.
    pub fn descriptor(&self, name: &str) -> Result<&PropertyDescriptor> {
        self.info.property(name)
    }

    /// Returns true if the named property exists and can be read
    #[must_use]
    pub fn is_readable(&self, name: &str) -> bool {
        self.info
            .find_property(name)
            .is_some_and(PropertyDescriptor::is_readable)
    }

    /// Returns true if the named property exists and can be written
    #[must_use]
    pub fn is_writable(&self, name: &str) -> bool {
        self.info
            .find_property(name)
            .is_some_and(PropertyDescriptor::is_writable)
    }

    /// Read the named property
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyNotFound`] if there is no such property or it is
    /// write-only.
    pub fn get(&self, name: &str) -> Result<PropertyData> {
        read(&*self.bean, &self.info, name)
    }

    /// Convert `value` to the declared type of the named property and write it
    ///
    /// ## Arguments
    /// * `name`  - The property to write
    /// * `value` - The new value, converted according to [`BeanConfig`] if necessary
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyNotFound`] if there is no such property or it is
    /// read-only, and [`crate::Error::TypeMismatch`] if the value cannot be converted.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyData>) -> Result<()> {
        let descriptor = self
            .info
            .find_property(name)
            .filter(|d| d.is_writable())
            .ok_or_else(|| not_found!(self.info.type_name(), name, Access::Write))?;

        let value = convert(name, value.into(), descriptor.kind(), &self.config)?;
        match descriptor.write(self.bean.as_any_mut(), value) {
            Ok(()) => {
                tracing::trace!(
                    type_name = self.info.type_name(),
                    property = name,
                    "property written"
                );
                Ok(())
            }
            Err(WriteFailure::Rejected(value)) => {
                Err(Error::type_mismatch(name, value, descriptor.kind()))
            }
            Err(WriteFailure::WrongTarget) => Err(Error::ClassMismatch {
                source_type: self.info.type_name().to_string(),
                target_type: self.bean.type_key().name().to_string(),
            }),
        }
    }

    /// Write every value of `values`, in set order
    ///
    /// The first failure stops the remaining writes. Writes that happened before it stay
    /// applied; this is not a transaction.
    ///
    /// # Errors
    /// Returns the first error raised by [`PropertyAccessor::set`].
    pub fn set_all(&mut self, values: &PropertyValueSet) -> Result<()> {
        for value in values {
            self.set(value.name(), value.value().clone())?;
        }
        Ok(())
    }

    /// Invoke the named method with `args`, converted to the declared parameter types
    ///
    /// # Errors
    /// Returns [`crate::Error::MethodNotFound`] if there is no such method,
    /// [`crate::Error::ArgumentCount`] if the number of arguments is wrong,
    /// [`crate::Error::TypeMismatch`] if an argument cannot be converted, or whatever the method
    /// itself returns.
    pub fn invoke(&mut self, name: &str, args: Vec<PropertyData>) -> Result<PropertyData> {
        let method = self.info.method(name)?;
        let parameters = method.parameters();
        if args.len() != parameters.len() {
            return Err(Error::ArgumentCount {
                method: name.to_string(),
                expected: parameters.len(),
                actual: args.len(),
            });
        }

        let args = args
            .into_iter()
            .zip(parameters)
            .enumerate()
            .map(|(index, (arg, kind))| {
                convert(&format!("{name}(arg{index})"), arg, kind, &self.config)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::trace!(
            type_name = self.info.type_name(),
            method = name,
            "invoking method"
        );
        method.invoke(self.bean.as_any_mut(), args)
    }
}

fn read(bean: &dyn Bean, info: &BeanInfo, name: &str) -> Result<PropertyData> {
    let descriptor = info
        .find_property(name)
        .filter(|d| d.is_readable())
        .ok_or_else(|| not_found!(info.type_name(), name, Access::Read))?;

    descriptor
        .read(bean.as_any())
        .ok_or_else(|| Error::ClassMismatch {
            source_type: info.type_name().to_string(),
            target_type: bean.type_key().name().to_string(),
        })
}
