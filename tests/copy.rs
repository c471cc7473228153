//! Integration tests for property access and bean-to-bean copies.
//!
//! The beans in this file model a small configuration domain: data sources which can be copied
//! into each other, a pooled variant declared assignable to the plain one, and an unrelated
//! mail server.

use std::sync::Arc;

use beanprop::{
    beans::{copy_properties, copy_properties_ignoring, PropertyAccessor, PropertyCopier},
    metadata::{BeanInfoBuilder, Introspect, MetadataCache},
    property_constants,
    value::{PropertyData, PropertyValueSet},
    BeanConfig, Error, ErrorKind, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Isolation {
    #[default]
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

property_constants!(Isolation {
    ReadCommitted,
    RepeatableRead,
    Serializable
});

#[derive(Debug)]
struct Credentials {
    user: String,
}

#[derive(Debug, Clone, Default)]
struct DataSource {
    a: i32,
    b: String,
    c: bool,
    isolation: Isolation,
    timeout: Option<u64>,
    credentials: Option<Arc<Credentials>>,
}

impl Introspect for DataSource {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.property("a", |d: &DataSource| d.a, |d, v| d.a = v)
            .property("b", |d: &DataSource| d.b.clone(), |d, v| d.b = v)
            .property("c", |d: &DataSource| d.c, |d, v| d.c = v)
            .property("isolation", |d: &DataSource| d.isolation, |d, v| d.isolation = v)
            .property("timeout", |d: &DataSource| d.timeout, |d, v| d.timeout = v)
            .property(
                "credentials",
                |d: &DataSource| d.credentials.clone(),
                |d, v| d.credentials = v,
            )
            .default_constructor();
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
struct PooledDataSource {
    a: i32,
    b: String,
    max_idle: u32,
}

impl Introspect for PooledDataSource {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.property("a", |d: &PooledDataSource| d.a, |d, v| d.a = v)
            .property("b", |d: &PooledDataSource| d.b.clone(), |d, v| d.b = v)
            .property("max_idle", |d: &PooledDataSource| d.max_idle, |d, v| d.max_idle = v)
            .assignable_to::<DataSource>();
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
struct MailServer {
    b: String,
    port: u16,
}

impl Introspect for MailServer {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.property("b", |m: &MailServer| m.b.clone(), |m, v| m.b = v)
            .property("port", |m: &MailServer| m.port, |m, v| m.port = v);
        Ok(())
    }
}

fn source() -> DataSource {
    DataSource {
        a: 1,
        b: "x".to_string(),
        c: true,
        ..DataSource::default()
    }
}

#[test]
fn test_copy_round_trip() -> Result<()> {
    let source = source();
    let mut target = DataSource::default();

    copy_properties(&source, &mut target)?;

    let accessor = PropertyAccessor::new(&mut target)?;
    assert_eq!(accessor.get("a")?, PropertyData::I32(1));
    assert_eq!(accessor.get("b")?, PropertyData::from("x"));
    assert_eq!(accessor.get("c")?, PropertyData::Bool(true));
    Ok(())
}

#[test]
fn test_ignore_list_respected() -> Result<()> {
    let source = source();
    let mut target = DataSource {
        b: "unchanged".to_string(),
        ..DataSource::default()
    };

    copy_properties_ignoring(&source, &mut target, &["b"])?;

    assert_eq!(target.a, 1);
    assert_eq!(target.b, "unchanged");
    assert!(target.c);
    Ok(())
}

#[test]
fn test_class_mismatch_mutates_nothing() {
    let source = source();
    let mut target = MailServer {
        b: "smtp".to_string(),
        port: 25,
    };

    let error = copy_properties(&source, &mut target).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ClassMismatch);
    assert!(error.to_string().contains("MailServer"));
    assert_eq!(target.b, "smtp");
    assert_eq!(target.port, 25);
}

#[test]
fn test_copy_into_declared_capability() -> Result<()> {
    let source = PooledDataSource {
        a: 9,
        b: "pool".to_string(),
        max_idle: 4,
    };
    let mut target = DataSource::default();

    copy_properties(&source, &mut target)?;

    assert_eq!(target.a, 9);
    assert_eq!(target.b, "pool");
    Ok(())
}

#[test]
fn test_objects_are_shared_not_cloned() -> Result<()> {
    let credentials = Arc::new(Credentials {
        user: "sa".to_string(),
    });
    let source = DataSource {
        credentials: Some(Arc::clone(&credentials)),
        timeout: Some(30),
        isolation: Isolation::Serializable,
        ..source()
    };
    let mut target = DataSource::default();

    copy_properties(&source, &mut target)?;

    let copied = target.credentials.as_ref().map(Arc::clone);
    assert!(copied.is_some_and(|c| Arc::ptr_eq(&c, &credentials)));
    assert_eq!(target.timeout, Some(30));
    assert_eq!(target.isolation, Isolation::Serializable);
    assert_eq!(credentials.user, "sa");
    Ok(())
}

#[test]
fn test_copy_to_new_uses_isolated_cache() -> Result<()> {
    let cache = MetadataCache::new();
    let copier = PropertyCopier::new().with_cache(&cache).ignore("c");

    let copy = copier.copy_to_new(&source())?;
    let copy = copy
        .as_any()
        .downcast_ref::<DataSource>()
        .expect("copy has the source's type");

    assert_eq!(copy.a, 1);
    assert!(!copy.c);
    assert!(cache.contains::<DataSource>());
    Ok(())
}

#[test]
fn test_apply_string_values() -> Result<()> {
    let values = PropertyValueSet::new()
        .with("a", " 42 ")
        .with("c", "TRUE")
        .with("isolation", "RepeatableRead")
        .with("timeout", "15");
    let mut target = DataSource::default();

    PropertyAccessor::new(&mut target)?.set_all(&values)?;

    assert_eq!(target.a, 42);
    assert!(target.c);
    assert_eq!(target.isolation, Isolation::RepeatableRead);
    assert_eq!(target.timeout, Some(15));
    Ok(())
}

#[test]
fn test_unknown_constant_is_a_type_mismatch() {
    let mut target = DataSource::default();
    let mut accessor = PropertyAccessor::new(&mut target).unwrap();

    match accessor.set("isolation", "Chaos") {
        Err(Error::TypeMismatch {
            property, value, ..
        }) => {
            assert_eq!(property, "isolation");
            assert_eq!(value, PropertyData::from("Chaos"));
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(
        Isolation::CONSTANTS.lookup("Chaos").unwrap_err().kind(),
        ErrorKind::ConstantNotFound
    );
}

#[test]
fn test_lenient_config_narrows_lossless_values() -> Result<()> {
    let mut target = DataSource::default();
    let mut accessor = PropertyAccessor::new(&mut target)?.with_config(BeanConfig::lenient());

    accessor.set("a", 7i64)?;
    assert_eq!(
        accessor.set("a", i64::MAX).unwrap_err().kind(),
        ErrorKind::TypeMismatch
    );
    accessor.set("timeout", 3.0f64)?;

    assert_eq!(target.a, 7);
    assert_eq!(target.timeout, Some(3));
    Ok(())
}
