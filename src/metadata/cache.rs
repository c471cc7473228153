//! Process-wide cache of bean metadata.
//!
//! Turning a type's registrations into a [`BeanInfo`] is done once per type and cache; every later
//! lookup returns the same shared result. Failed introspection is cached just as well, so an
//! un-introspectable type fails fast and identically on every lookup instead of retrying.
//!
//! # Thread Safety
//!
//! The cache is a [`DashMap`] keyed by [`TypeKey`]:
//! - Lookups only take a shard read lock for the duration of an `Arc` clone
//! - Introspection runs outside of any lock
//! - The finished entry is published with a single insert; if another thread published first,
//!   its entry is kept and returned, and the duplicate computation is dropped
//!
//! Introspection is a pure function of the type, so a duplicate computation under a race costs
//! time but never changes the result. A partially built entry is never visible.

use std::{
    fmt,
    sync::{Arc, OnceLock},
    time::Instant,
};

use dashmap::DashMap;

use crate::{
    metadata::{
        BeanInfo, BeanInfoBuilder, Introspect, MethodDescriptor, PropertyDescriptor, TypeKey,
    },
    Error, Result,
};

/// A cached introspection result
#[derive(Clone)]
enum CacheEntry {
    /// The type was introspected successfully
    Ready(Arc<BeanInfo>),
    /// The type could not be introspected; the message is replayed verbatim
    Failed {
        type_name: &'static str,
        message: String,
    },
}

impl CacheEntry {
    fn to_result(&self) -> Result<Arc<BeanInfo>> {
        match self {
            CacheEntry::Ready(info) => Ok(Arc::clone(info)),
            CacheEntry::Failed { type_name, message } => Err(Error::Introspection {
                type_name: (*type_name).to_string(),
                message: message.clone(),
            }),
        }
    }
}

/// Concurrent compute-once cache of [`BeanInfo`] keyed by type.
///
/// Entries live as long as the cache; there is no eviction. Most code uses the process-wide
/// [`MetadataCache::global`] instance, separate instances are useful for isolation.
pub struct MetadataCache {
    entries: DashMap<TypeKey, CacheEntry>,
}

impl MetadataCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        MetadataCache {
            entries: DashMap::new(),
        }
    }

    /// The process-wide cache
    pub fn global() -> &'static MetadataCache {
        static GLOBAL: OnceLock<MetadataCache> = OnceLock::new();
        GLOBAL.get_or_init(MetadataCache::new)
    }

    /// Returns the metadata of `T`, introspecting it on first use
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if `T` cannot be introspected. The same error is
    /// returned on every later call for `T` without introspecting again.
    pub fn descriptors_for<T: Introspect>(&self) -> Result<Arc<BeanInfo>> {
        let key = TypeKey::of::<T>();

        if let Some(entry) = self.entries.get(&key) {
            tracing::trace!(type_name = key.name(), "using cached introspection results");
            return entry.to_result();
        }

        let entry = Self::introspect::<T>(key);
        let published = self.entries.entry(key).or_insert(entry).clone();
        published.to_result()
    }

    /// Returns the descriptor of property `name` of `T`
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if `T` cannot be introspected, or
    /// [`crate::Error::PropertyNotFound`] if `T` has no such property.
    pub fn descriptor_for<T: Introspect>(&self, name: &str) -> Result<PropertyDescriptor> {
        self.descriptors_for::<T>()?.property(name).cloned()
    }

    /// Returns the descriptor of method `name` of `T`
    ///
    /// # Errors
    /// Returns [`crate::Error::Introspection`] if `T` cannot be introspected, or
    /// [`crate::Error::MethodNotFound`] if `T` has no such method.
    pub fn method_descriptor_for<T: Introspect>(&self, name: &str) -> Result<MethodDescriptor> {
        self.descriptors_for::<T>()?.method(name).cloned()
    }

    /// Returns true if a result (success or failure) for `T` is cached
    #[must_use]
    pub fn contains<T: Introspect>(&self) -> bool {
        self.entries.contains_key(&TypeKey::of::<T>())
    }

    /// Number of cached types
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn introspect<T: Introspect>(key: TypeKey) -> CacheEntry {
        let started = Instant::now();
        let mut builder = BeanInfoBuilder::<T>::new();

        let outcome = T::introspect(&mut builder)
            .map_err(|error| error.to_string())
            .and_then(|()| builder.build());

        match outcome {
            Ok(info) => {
                tracing::debug!(
                    type_name = key.name(),
                    properties = info.property_count(),
                    methods = info.methods().count(),
                    elapsed_us = started.elapsed().as_micros(),
                    "cached introspection results"
                );
                CacheEntry::Ready(Arc::new(info))
            }
            Err(message) => {
                tracing::warn!(
                    type_name = key.name(),
                    error = %message,
                    "cannot introspect type, caching failure"
                );
                CacheEntry::Failed {
                    type_name: key.name(),
                    message,
                }
            }
        }
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Barrier,
    };

    use super::*;
    use crate::{
        test::{Dog, Labrador},
        ErrorKind,
    };

    static BROKEN_CALLS: AtomicUsize = AtomicUsize::new(0);

    struct Broken;

    impl Introspect for Broken {
        fn introspect(_: &mut BeanInfoBuilder<Self>) -> Result<()> {
            BROKEN_CALLS.fetch_add(1, Ordering::SeqCst);
            Err(Error::Introspection {
                type_name: "Broken".to_string(),
                message: "getter and setter disagree on type".to_string(),
            })
        }
    }

    static COUNTED_CALLS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Introspect for Counted {
        fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
            COUNTED_CALLS.fetch_add(1, Ordering::SeqCst);
            info.read_only("value", |_: &Counted| 7i32);
            Ok(())
        }
    }

    #[test]
    fn test_computed_once_and_shared() {
        let cache = MetadataCache::new();
        assert!(cache.is_empty());

        let first = cache.descriptors_for::<Counted>().unwrap();
        let second = cache.descriptors_for::<Counted>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(COUNTED_CALLS.load(Ordering::SeqCst), 1);
        assert!(cache.contains::<Counted>());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_descriptors_are_idempotent() {
        let cache = MetadataCache::new();
        let first = cache.descriptors_for::<Dog>().unwrap();
        let other = MetadataCache::new();
        let second = other.descriptors_for::<Dog>().unwrap();

        let describe = |info: &BeanInfo| {
            info.properties()
                .map(|p| (p.name().to_string(), p.kind().clone(), p.access()))
                .collect::<Vec<_>>()
        };
        assert_eq!(describe(&first), describe(&second));
    }

    #[test]
    fn test_failure_is_cached_and_replayed() {
        let cache = MetadataCache::new();

        let first = cache.descriptors_for::<Broken>().unwrap_err();
        let second = cache.descriptors_for::<Broken>().unwrap_err();

        assert_eq!(first.kind(), ErrorKind::Introspection);
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(BROKEN_CALLS.load(Ordering::SeqCst), 1);
        assert!(cache.contains::<Broken>());
        assert_eq!(
            cache.descriptor_for::<Broken>("anything").unwrap_err().kind(),
            ErrorKind::Introspection
        );
    }

    #[test]
    fn test_descriptor_lookups() {
        let cache = MetadataCache::new();

        let age = cache.descriptor_for::<Dog>("age").unwrap();
        assert!(age.is_readable() && age.is_writable());

        assert_eq!(
            cache.descriptor_for::<Dog>("wings").unwrap_err().kind(),
            ErrorKind::PropertyNotFound
        );
        assert_eq!(
            cache.method_descriptor_for::<Dog>("bark").unwrap().name(),
            "bark"
        );
        assert_eq!(
            cache
                .method_descriptor_for::<Labrador>("bark")
                .unwrap_err()
                .kind(),
            ErrorKind::MethodNotFound
        );
    }

    #[test]
    fn test_concurrent_first_access() {
        const THREADS: usize = 8;

        let cache = MetadataCache::new();
        let barrier = Barrier::new(THREADS);

        let results: Vec<Arc<BeanInfo>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        cache.descriptors_for::<Dog>().unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let published = cache.descriptors_for::<Dog>().unwrap();
        for info in &results {
            assert!(Arc::ptr_eq(info, &published));
            assert_eq!(info.property_count(), published.property_count());
        }
        assert_eq!(cache.len(), 1);
    }
}
