mod common;

use common::{fixture_factory, init_tracing};
use datagen_core::ObjectFactory;
use datagen_model::Value;
use datagen_test_utils::{fixture_catalog, names, ty, ABSTRACT_CLASS_A_STRING};
use pretty_assertions::assert_eq;

#[test]
fn test_interface_without_implementation_is_proxied() {
    let factory = fixture_factory(31);
    let value = factory.create(&ty(names::INTERFACE_A)).unwrap();
    let proxy = value.as_proxy().unwrap();

    assert_eq!(proxy.target().as_str(), names::INTERFACE_A);
    assert!(proxy.call("getInt").unwrap().as_i64().is_some());
    assert_eq!(proxy.call("getString").unwrap().as_str().unwrap().len(), 50);

    let nested = proxy.call("getTestClassA").unwrap();
    assert_eq!(nested.as_record().unwrap().ty().as_str(), names::TEST_CLASS_A);
}

#[test]
fn test_undeclared_accessor_is_none() {
    let factory = fixture_factory(32);
    let value = factory.create(&ty(names::INTERFACE_A)).unwrap();
    assert_eq!(value.as_proxy().unwrap().call("getMissing"), None);
}

#[test]
fn test_self_referential_interface_terminates() {
    let factory = fixture_factory(33);
    let value = factory.create(&ty(names::NODE)).unwrap();

    let mut current = value.as_proxy().unwrap().clone();
    for _ in 0..5 {
        let next = current.call("next").unwrap();
        current = next.as_proxy().unwrap().clone();
        assert_eq!(current.target().as_str(), names::NODE);
    }
    assert!(current.call("label").unwrap().as_str().is_some());
}

#[test]
fn test_accessor_supplier_overrides_return_type() {
    init_tracing();
    let factory = ObjectFactory::builder()
        .with_catalog(fixture_catalog())
        .with_accessor_supplier("getString", |_: &mut dyn rand::RngCore| Value::from("override"))
        .build()
        .unwrap();
    let value = factory.create(&ty(names::INTERFACE_A)).unwrap();
    let proxy = value.as_proxy().unwrap();

    assert_eq!(proxy.call("getString"), Some(Value::from("override")));
    assert!(proxy.call("getInt").unwrap().as_i64().is_some());
}

#[test]
fn test_accessor_supplier_does_not_touch_leaf_types() {
    let factory = ObjectFactory::builder()
        .with_accessor_supplier("String", |_: &mut dyn rand::RngCore| Value::from("nope"))
        .build()
        .unwrap();
    let value = factory.create(&ty("String")).unwrap();
    assert_ne!(value, Value::from("nope"));
}

#[test]
fn test_abstract_type_with_zero_argument_constructor() {
    let factory = fixture_factory(34);
    let value = factory.create(&ty(names::ABSTRACT_CLASS_A)).unwrap();
    let proxy = value.as_proxy().unwrap();

    assert!(proxy.base().is_some());
    assert_eq!(
        proxy.call("getString"),
        Some(Value::from(ABSTRACT_CLASS_A_STRING))
    );
    assert!(proxy.call("getAbstractDouble").unwrap().as_f64().is_some());
}

#[test]
fn test_proxy_answers_each_call_afresh() {
    let factory = fixture_factory(35);
    let value = factory.create(&ty(names::INTERFACE_A)).unwrap();
    let proxy = value.as_proxy().unwrap();

    let first = proxy.call("getString").unwrap();
    let second = proxy.call("getString").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_proxies_compare_by_identity() {
    let factory = fixture_factory(36);
    let a = factory.create(&ty(names::NODE)).unwrap();
    let b = factory.create(&ty(names::NODE)).unwrap();

    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_eq!(
        serde_json::to_value(&a).unwrap(),
        serde_json::json!({ "$proxy": names::NODE })
    );
}

#[test]
fn test_proxy_answers_inherited_accessors() {
    let factory = fixture_factory(37);
    let value = factory.create(&ty(names::PERSON)).unwrap();
    let proxy = value.as_proxy().unwrap();

    let surface: Vec<&str> = proxy.methods().iter().map(|m| m.name()).collect();
    assert_eq!(surface, vec!["getAge", "getName"]);
    assert!(proxy.call("getAge").unwrap().as_i64().is_some());
    assert_eq!(proxy.call("getName").unwrap().as_str().unwrap().len(), 50);
}

#[test]
fn test_accessor_supplier_overrides_concrete_base_method() {
    let factory = ObjectFactory::builder()
        .with_catalog(fixture_catalog())
        .with_accessor_supplier("getString", |_: &mut dyn rand::RngCore| Value::from("override"))
        .build()
        .unwrap();
    let value = factory.create(&ty(names::ABSTRACT_CLASS_A)).unwrap();
    let proxy = value.as_proxy().unwrap();

    assert_eq!(proxy.call("getString"), Some(Value::from("override")));
    assert!(proxy.call("getAbstractDouble").unwrap().as_f64().is_some());
}
