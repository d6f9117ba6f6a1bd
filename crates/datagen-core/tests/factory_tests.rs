mod common;

use common::{fixture_factory, init_tracing};
use datagen_core::{create_object, FactoryConfig, ObjectFactory, SizePolicy, SynthesisError};
use datagen_model::{TypeDescriptor, Value};
use datagen_supplier::IncrementalInt;
use datagen_test_utils::{fixture_catalog, names, ty};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn int() -> TypeDescriptor {
    TypeDescriptor::of("i32")
}

fn answering_factory() -> ObjectFactory {
    init_tracing();
    ObjectFactory::builder()
        .with_catalog(fixture_catalog())
        .with_supplier_fn("i32", || Value::from(42))
        .build()
        .unwrap()
}

#[test]
fn test_list_of_registered_leaf() {
    let factory = answering_factory();
    assert_eq!(
        factory.list_of_n(&int(), 3).unwrap(),
        vec![Value::Int(42), Value::Int(42), Value::Int(42)]
    );
}

#[test]
fn test_registered_leaf_is_authoritative() {
    let factory = ObjectFactory::builder()
        .with_catalog(fixture_catalog())
        .with_supplier_fn(names::TEST_CLASS_A, || Value::from("stub"))
        .build()
        .unwrap();
    assert_eq!(factory.create(&ty(names::TEST_CLASS_A)).unwrap(), Value::from("stub"));
}

#[test]
fn test_leaf_supplier_covers_parameterizations() {
    let factory = ObjectFactory::builder()
        .with_supplier_fn("List", || Value::List(Vec::new()))
        .build()
        .unwrap();
    assert_eq!(
        factory.create(&ty("List<String>")).unwrap(),
        Value::List(Vec::new())
    );
}

#[test]
fn test_default_list_size_range() {
    let factory = fixture_factory(21);
    for _ in 0..50 {
        let len = factory.list_of(&TypeDescriptor::of("String")).unwrap().len();
        assert!((1..11).contains(&len), "length {len} out of range");
    }
}

#[test]
fn test_negative_counts_rejected() {
    let factory = fixture_factory(22);
    let err = factory.list_of_n(&int(), -1).unwrap_err();
    assert_eq!(
        err,
        SynthesisError::Precondition("count cannot be negative: -1".to_string())
    );
    assert!(factory.set_of_n(&int(), -1).unwrap_err().is_precondition());
    assert!(factory.map_of_n(&int(), &int(), -3).unwrap_err().is_precondition());
}

#[test]
fn test_set_of_bool_bounded_by_domain() {
    let factory = fixture_factory(23);
    let set = factory.set_of_n(&TypeDescriptor::of("bool"), 10).unwrap();
    assert!(!set.is_empty() && set.len() <= 2);
}

#[test]
fn test_map_of_collapses_equal_keys() {
    let factory = answering_factory();
    let map = factory
        .map_of_n(&int(), &TypeDescriptor::of("String"), 5)
        .unwrap();
    assert_eq!(map.len(), 1);
    assert!(map.contains_key(&Value::Int(42)));
}

#[test]
fn test_map_of_default_size() {
    let factory = ObjectFactory::builder()
        .with_supplier("i32", IncrementalInt::starting_at(0))
        .with_size_policy(SizePolicy::fixed(4))
        .build()
        .unwrap();
    let map = factory.map_of(&int(), &int()).unwrap();
    let keys: Vec<_> = map.keys().cloned().collect();
    assert_eq!(keys, vec![Value::Int(0), Value::Int(2), Value::Int(4), Value::Int(6)]);
}

#[test]
fn test_unsupported_type_in_strict_mode() {
    let factory = fixture_factory(24);
    let err = factory.create(&ty(names::UNKNOWN)).unwrap_err();
    assert_eq!(
        err,
        SynthesisError::Unsupported {
            ty: names::UNKNOWN.to_string()
        }
    );
    assert_eq!(factory.try_create(&ty(names::UNKNOWN)).unwrap(), None);
}

#[test]
fn test_abstract_type_with_arguments_rejected() {
    let factory = fixture_factory(25);
    let err = factory.create(&ty(names::ABSTRACT_CLASS_B)).unwrap_err();
    assert!(matches!(err, SynthesisError::UnsupportedConstruction { ref ty, .. } if ty == names::ABSTRACT_CLASS_B));

    // Lenient mode still raises it
    assert!(factory.try_create(&ty(names::ABSTRACT_CLASS_B)).is_err());
}

#[test]
fn test_chain_order() {
    let factory = fixture_factory(26);
    assert_eq!(
        factory.chain_names(),
        vec!["leaf", "array", "enum", "record", "implementation", "proxy"]
    );
}

#[test]
fn test_config_drives_factory() {
    let config = FactoryConfig::from_toml_str(
        "seed = 5\nmin_size = 3\nmax_size = 4\nstring_length = 6\n",
    )
    .unwrap();
    let factory = ObjectFactory::builder().with_config(config).build().unwrap();

    let strings = factory.list_of(&TypeDescriptor::of("String")).unwrap();
    assert_eq!(strings.len(), 3);
    assert!(strings.iter().all(|s| s.as_str().unwrap().len() == 6));
}

#[test]
fn test_create_object_one_shot() {
    let value = create_object(fixture_catalog(), &ty(names::ENUM_CLASS)).unwrap();
    assert!(value.as_enum().is_some());
}

#[test]
fn test_factory_shared_across_threads() {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    let factory = ObjectFactory::builder()
        .with_catalog(fixture_catalog())
        .with_supplier_fn("i32", move || {
            Value::from(seen.fetch_add(1, Ordering::SeqCst) as i64)
        })
        .build()
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let factory = factory.clone();
            std::thread::spawn(move || factory.list_of_n(&int(), 25).unwrap())
        })
        .collect();
    let total: usize = handles.into_iter().map(|h| h.join().unwrap().len()).sum();

    assert_eq!(total, 100);
    assert_eq!(counter.load(Ordering::SeqCst), 100);
}

proptest! {
    #[test]
    fn prop_list_count_exact(count in 0i64..40, seed: u64) {
        let factory = ObjectFactory::builder().with_seed(seed).build().unwrap();
        let list = factory.list_of_n(&TypeDescriptor::of("u8"), count).unwrap();
        prop_assert_eq!(list.len() as i64, count);
    }

    #[test]
    fn prop_set_and_map_bounded(count in 0i64..40, seed: u64) {
        let factory = ObjectFactory::builder().with_seed(seed).build().unwrap();
        let set = factory.set_of_n(&TypeDescriptor::of("u8"), count).unwrap();
        let map = factory
            .map_of_n(&TypeDescriptor::of("bool"), &TypeDescriptor::of("u8"), count)
            .unwrap();
        prop_assert!(set.len() as i64 <= count);
        prop_assert!(map.len() as i64 <= count.min(2));
    }

    #[test]
    fn prop_negative_count_is_precondition(count in i64::MIN..0) {
        let factory = ObjectFactory::default();
        prop_assert!(factory.list_of_n(&TypeDescriptor::of("u8"), count).unwrap_err().is_precondition());
    }

    #[test]
    fn prop_array_length_follows_policy(n in 0usize..20) {
        let factory = ObjectFactory::builder()
            .with_size_policy(SizePolicy::fixed(n))
            .build()
            .unwrap();
        let value = factory.create(&TypeDescriptor::array_of(TypeDescriptor::of("i64"))).unwrap();
        let Value::Array(items) = value else {
            return Err(TestCaseError::fail("expected array"));
        };
        prop_assert_eq!(items.len(), n);
    }
}
