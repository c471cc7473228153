//! Copying properties between compatible beans.
//!
//! A copy reads every readable property of the source, keeps those the target can write and
//! that are not ignored, stages them in a [`PropertyValueSet`] and applies that set to the target
//! in one [`PropertyAccessor::set_all`]. Properties that exist on one side only, or lack the
//! needed accessor, are skipped without error.

use crate::{
    beans::{PropertyAccessor, PropertyReader},
    metadata::{Bean, MetadataCache},
    value::PropertyValueSet,
    BeanConfig, Error, Result,
};

/// Copies properties from a source bean into a target bean of a compatible type.
///
/// The target's type must be the source's type, or one the source type declared itself
/// assignable to through [`crate::metadata::BeanInfoBuilder::assignable_to`].
///
/// # Examples
///
/// ```rust
/// use beanprop::{beans::PropertyCopier, metadata::{BeanInfoBuilder, Introspect}, Result};
///
/// #[derive(Default)]
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl Introspect for Endpoint {
///     fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
///         info.property("host", |e: &Endpoint| e.host.clone(), |e, v| e.host = v)
///             .property("port", |e: &Endpoint| e.port, |e, v| e.port = v);
///         Ok(())
///     }
/// }
///
/// let source = Endpoint { host: "db".into(), port: 5432 };
/// let mut target = Endpoint::default();
///
/// PropertyCopier::new().ignore("port").copy(&source, &mut target)?;
/// assert_eq!(target.host, "db");
/// assert_eq!(target.port, 0);
/// # Ok::<(), beanprop::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PropertyCopier<'c> {
    ignored: Vec<String>,
    config: BeanConfig,
    cache: &'c MetadataCache,
}

impl PropertyCopier<'static> {
    /// Create a copier backed by the global metadata cache
    #[must_use]
    pub fn new() -> Self {
        PropertyCopier {
            ignored: Vec::new(),
            config: BeanConfig::default(),
            cache: MetadataCache::global(),
        }
    }
}

impl Default for PropertyCopier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> PropertyCopier<'c> {
    /// Skip the named property
    #[must_use]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored.push(name.into());
        self
    }

    /// Skip all of the named properties
    #[must_use]
    pub fn ignore_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Use `config` for the writes on the target
    #[must_use]
    pub fn with_config(mut self, config: BeanConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve metadata through `cache` instead of the global one
    #[must_use]
    pub fn with_cache<'n>(self, cache: &'n MetadataCache) -> PropertyCopier<'n> {
        PropertyCopier {
            ignored: self.ignored,
            config: self.config,
            cache,
        }
    }

    /// Returns true if the named property is skipped by this copier
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|ignored| ignored == name)
    }

    /// Copy the properties of `source` into `target`
    ///
    /// ## Arguments
    /// * `source` - The bean to read from
    /// * `target` - The bean to write to; its type must be assignable from the source's type
    ///
    /// # Errors
    /// Returns [`crate::Error::ClassMismatch`] before touching the target if the types are not
    /// compatible. Otherwise the first error of the final [`PropertyAccessor::set_all`]; writes
    /// before that error stay applied.
    pub fn copy(&self, source: &dyn Bean, target: &mut dyn Bean) -> Result<()> {
        let reader = PropertyReader::with_cache(source, self.cache)?;
        let source_info = reader.bean_info();
        let target_key = target.type_key();

        if !source_info.is_assignable_to(&target_key) {
            return Err(Error::ClassMismatch {
                source_type: source_info.type_name().to_string(),
                target_type: target_key.name().to_string(),
            });
        }

        let mut accessor = PropertyAccessor::with_cache(target, self.cache)?.with_config(self.config);
        let mut staged = PropertyValueSet::new();

        for descriptor in source_info.properties() {
            let name = descriptor.name();
            if self.is_ignored(name) {
                tracing::trace!(property = name, "ignored");
                continue;
            }
            if !descriptor.is_readable() || !accessor.is_writable(name) {
                tracing::trace!(property = name, "not transferable, skipped");
                continue;
            }
            staged.add(name, reader.get(name)?);
        }

        accessor.set_all(&staged)?;

        tracing::debug!(
            source = source_info.type_name(),
            target = target_key.name(),
            copied = staged.len(),
            "copied properties"
        );
        Ok(())
    }

    /// Create a new instance of the source's type and copy the properties of `source` into it
    ///
    /// # Errors
    /// Returns [`crate::Error::NotInstantiable`] or [`crate::Error::ConstructionFailed`] if the
    /// instance cannot be created, otherwise the errors of [`PropertyCopier::copy`].
    pub fn copy_to_new(&self, source: &dyn Bean) -> Result<Box<dyn Bean>> {
        let mut target = source.introspect_with(self.cache)?.instantiate()?;
        self.copy(source, target.as_mut())?;
        Ok(target)
    }
}

/// Copy every transferable property of `source` into `target`
///
/// # Errors
/// See [`PropertyCopier::copy`].
pub fn copy_properties(source: &dyn Bean, target: &mut dyn Bean) -> Result<()> {
    PropertyCopier::new().copy(source, target)
}

/// Copy every transferable property of `source` into `target`, except the ones in `ignore`
///
/// # Errors
/// See [`PropertyCopier::copy`].
pub fn copy_properties_ignoring(
    source: &dyn Bean,
    target: &mut dyn Bean,
    ignore: &[&str],
) -> Result<()> {
    PropertyCopier::new()
        .ignore_all(ignore.iter().copied())
        .copy(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::{Car, Dog, Labrador, Puppy},
        ErrorKind,
    };

    #[test]
    fn test_copy_same_type() {
        let source = Dog::named("Rex", 5);
        let mut target = Dog::default();

        copy_properties(&source, &mut target).unwrap();

        assert_eq!(target.name, "Rex");
        assert_eq!(target.age, 5);
        assert!(target.good);
        // read-only on the target
        assert_eq!(target.id, 0);
    }

    #[test]
    fn test_copy_ignoring() {
        let source = Dog::named("Rex", 5);
        let mut target = Dog {
            age: 1,
            ..Dog::default()
        };

        copy_properties_ignoring(&source, &mut target, &["age"]).unwrap();

        assert_eq!(target.name, "Rex");
        assert_eq!(target.age, 1);
        assert!(target.good);
    }

    #[test]
    fn test_copy_into_assignable_type() {
        let source = Labrador {
            name: "Goldie".to_string(),
            age: 4,
            good: true,
            retrieves: true,
        };
        let mut target = Dog::default();

        copy_properties(&source, &mut target).unwrap();

        assert_eq!(target.name, "Goldie");
        assert_eq!(target.age, 4);
        assert!(target.good);
    }

    #[test]
    fn test_write_only_source_property_is_skipped() {
        let source = Puppy {
            name: "Bit".to_string(),
            age: 1,
        };
        let mut target = Dog::named("Old", 9);

        copy_properties(&source, &mut target).unwrap();

        assert_eq!(target.name, "Bit");
        assert_eq!(target.age, 9);
    }

    #[test]
    fn test_class_mismatch_touches_nothing() {
        let source = Dog::named("Rex", 5);
        let mut target = Car {
            name: "Beetle".to_string(),
            wheels: 4,
        };

        let error = copy_properties(&source, &mut target).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ClassMismatch);
        assert_eq!(target.name, "Beetle");
        assert_eq!(target.wheels, 4);

        // assignability is one-directional
        let mut labrador = Labrador::default();
        assert_eq!(
            copy_properties(&source, &mut labrador).unwrap_err().kind(),
            ErrorKind::ClassMismatch
        );
    }

    #[test]
    fn test_copy_to_new() {
        let cache = MetadataCache::new();
        let source = Dog::named("Rex", 5);

        let copy = PropertyCopier::new()
            .with_cache(&cache)
            .copy_to_new(&source)
            .unwrap();
        let copy = copy.as_any().downcast_ref::<Dog>().unwrap();
        assert_eq!(copy.name, "Rex");
        assert_eq!(copy.age, 5);

        let puppy = Puppy::default();
        assert_eq!(
            PropertyCopier::new()
                .copy_to_new(&puppy)
                .err()
                .map(|e| e.kind()),
            Some(ErrorKind::NotInstantiable)
        );
    }
}
