use crate::{
    metadata::{Introspect, MetadataCache, TypeKey},
    Error, Result,
};

/// Create a new `T` through its registered constructor
///
/// # Errors
/// Returns [`crate::Error::NotInstantiable`] if `T` registered no constructor,
/// [`crate::Error::ConstructionFailed`] if the constructor failed, or
/// [`crate::Error::Introspection`] if `T` cannot be introspected.
pub fn instantiate<T: Introspect>() -> Result<T> {
    instantiate_with::<T>(MetadataCache::global())
}

/// Create a new `T` through its registered constructor, resolving metadata through `cache`
///
/// # Errors
/// See [`instantiate`].
pub fn instantiate_with<T: Introspect>(cache: &MetadataCache) -> Result<T> {
    let bean = cache.descriptors_for::<T>()?.instantiate()?;
    let key = bean.type_key();

    match bean.into_any().downcast::<T>() {
        Ok(bean) => {
            tracing::trace!(type_name = key.name(), "instantiated");
            Ok(*bean)
        }
        Err(_) => Err(Error::ClassMismatch {
            source_type: key.name().to_string(),
            target_type: TypeKey::of::<T>().name().to_string(),
        }),
    }
}
