//! Concurrent use of the metadata cache.
//!
//! Many threads race on the first lookup of the same types. Every thread must observe the same
//! complete metadata, and the cache must end up with exactly one entry per type.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Barrier,
};

use beanprop::{
    beans::{copy_properties, PropertyAccessor},
    metadata::{BeanInfo, BeanInfoBuilder, Introspect, MetadataCache},
    ErrorKind, Result,
};

const THREADS: usize = 16;

static WIDE_INTROSPECTIONS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Default)]
struct Wide {
    values: [i64; 32],
}

impl Introspect for Wide {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        WIDE_INTROSPECTIONS.fetch_add(1, Ordering::SeqCst);
        for index in 0..32 {
            info.property(
                &format!("v{index}"),
                move |w: &Wide| w.values[index],
                move |w, v| w.values[index] = v,
            );
        }
        info.default_constructor();
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq)]
struct Pair {
    left: i64,
    right: String,
}

impl Introspect for Pair {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.property("left", |p: &Pair| p.left, |p, v| p.left = v)
            .property("right", |p: &Pair| p.right.clone(), |p, v| p.right = v);
        Ok(())
    }
}

struct Unintrospectable;

impl Introspect for Unintrospectable {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.read_only("twin", |_: &Unintrospectable| 1u8)
            .read_only("twin", |_: &Unintrospectable| 2u8);
        Ok(())
    }
}

#[test]
fn test_concurrent_first_access_publishes_complete_metadata() {
    let cache = MetadataCache::new();
    let barrier = Barrier::new(THREADS);

    let results: Vec<Arc<BeanInfo>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    cache.descriptors_for::<Wide>().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let published = cache.descriptors_for::<Wide>().unwrap();
    for info in &results {
        assert!(Arc::ptr_eq(info, &published));
        assert_eq!(info.property_count(), 32);
    }
    assert_eq!(cache.len(), 1);

    // racing threads may compute more than once, but never more than once per thread
    let computed = WIDE_INTROSPECTIONS.load(Ordering::SeqCst);
    assert!((1..=THREADS).contains(&computed));
}

#[test]
fn test_concurrent_failures_are_identical() {
    let cache = MetadataCache::new();

    let messages: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    let error = cache.descriptors_for::<Unintrospectable>().unwrap_err();
                    assert_eq!(error.kind(), ErrorKind::Introspection);
                    error.to_string()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(messages.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(messages[0].contains("duplicate property [twin]"));
}

#[test]
fn test_independent_beans_on_many_threads() {
    std::thread::scope(|scope| {
        for thread in 0..THREADS {
            scope.spawn(move || {
                let mut source = Pair::default();
                {
                    let mut accessor = PropertyAccessor::new(&mut source).unwrap();
                    accessor.set("left", thread.to_string()).unwrap();
                    accessor.set("right", format!("thread-{thread}")).unwrap();
                }

                let mut target = Pair::default();
                copy_properties(&source, &mut target).unwrap();
                assert_eq!(target, source);
                assert_eq!(target.left, thread as i64);
            });
        }
    });
}
