//! Testing utilities for Datagen workspace
//!
//! Shared fixture type graph and descriptor helpers.

#![allow(missing_docs)]

use datagen_model::{
    Catalog, Constructor, InvocationError, Method, Param, Record, TypeDef, TypeDescriptor, Value,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Fixture type names
pub mod names {
    pub const TEST_CLASS_A: &str = "fixtures.TestClassA";
    pub const TEST_CLASS_B: &str = "fixtures.TestClassB";
    pub const ENUM_CLASS: &str = "fixtures.EnumClass";
    pub const EMPTY_ENUM: &str = "fixtures.EmptyEnum";
    pub const INTERFACE_A: &str = "fixtures.InterfaceA";
    pub const FOO: &str = "fixtures.Foo";
    pub const CIRCULAR_FOO: &str = "fixtures.CircularFoo";
    pub const BAZ: &str = "fixtures.Baz";
    pub const DEFAULT_BAZ: &str = "fixtures.DefaultBaz";
    pub const LEGACY_BAZ: &str = "fixtures.LegacyBaz";
    pub const HIDDEN_BAZ: &str = "fixtures.internal.HiddenBaz";
    pub const SECRET: &str = "fixtures.Secret";
    pub const SECRET_IMPL: &str = "fixtures.internal.SecretImpl";
    pub const ABSTRACT_CLASS_A: &str = "fixtures.AbstractClassA";
    pub const ABSTRACT_CLASS_B: &str = "fixtures.AbstractClassB";
    pub const NODE: &str = "fixtures.Node";
    pub const FRAGILE: &str = "fixtures.Fragile";
    pub const PICKY: &str = "fixtures.Picky";
    pub const NEEDS_UNKNOWN: &str = "fixtures.NeedsUnknown";
    pub const UNKNOWN: &str = "fixtures.Unknown";
    pub const NAMED: &str = "fixtures.Named";
    pub const PERSON: &str = "fixtures.Person";
    pub const ENTITY: &str = "fixtures.Entity";
    pub const CUSTOMER: &str = "fixtures.Customer";
    pub const BAZ_PAIR: &str = "fixtures.BazPair";
    pub const FLAKY: &str = "fixtures.Flaky";
    pub const FLAKY_IMPL: &str = "fixtures.FlakyImpl";
    pub const FLAKY_PAIR: &str = "fixtures.FlakyPair";
}

/// Constant returned by `AbstractClassA::getString`
pub const ABSTRACT_CLASS_A_STRING: &str = "abstract class A";

/// Parse a descriptor, panicking on malformed input
pub fn ty(text: &str) -> TypeDescriptor {
    text.parse()
        .unwrap_or_else(|e| panic!("bad descriptor {text:?}: {e}"))
}

fn param(name: &str, text: &str) -> Param {
    Param::new(name, ty(text))
}

/// Record with one field per supported leaf kind plus nested containers
pub fn test_class_a() -> TypeDef {
    TypeDef::record(names::TEST_CLASS_A)
        .constructor(Constructor::new(vec![
            param("boolean_field", "bool"),
            param("byte_field", "i8"),
            param("char_field", "char"),
            param("double_field", "f64"),
            param("float_field", "f32"),
            param("int_field", "i32"),
            param("long_field", "i64"),
            param("short_field", "i16"),
            param("string_field", "String"),
            param("optional_field", "Optional<i32>"),
            param("list", "List<List<i32>>"),
            param("double_set", "Set<f64>"),
            param("map_field", "Map<Set<i32>, List<String>>"),
        ]))
        .method(Method::getter("getIntField", "int_field", ty("i32")))
        .method(Method::getter("getStringField", "string_field", ty("String")))
}

/// Record populated only through array setters
pub fn test_class_b() -> TypeDef {
    [
        ("setS", "s", "String[]"),
        ("setBooleans", "booleans", "bool[]"),
        ("setBytes", "bytes", "i8[]"),
        ("setChars", "chars", "char[]"),
        ("setDoubles", "doubles", "f64[]"),
        ("setFloats", "floats", "f32[]"),
        ("setInts", "ints", "i32[]"),
        ("setLongs", "longs", "i64[]"),
        ("setShorts", "shorts", "i16[]"),
    ]
    .into_iter()
    .fold(
        TypeDef::record(names::TEST_CLASS_B).constructor(Constructor::no_args()),
        |def, (name, field, text)| def.method(Method::setter(name, field, ty(text))),
    )
}

/// Interface whose accessors return a leaf, a string and a record
pub fn interface_a() -> TypeDef {
    TypeDef::interface(names::INTERFACE_A)
        .method(Method::accessor("getInt", ty("i32")))
        .method(Method::accessor("getString", ty("String")))
        .method(Method::accessor("getTestClassA", ty(names::TEST_CLASS_A)))
}

/// Implementation of `Flaky` whose first construction fails
pub fn flaky_impl() -> TypeDef {
    let tripped = AtomicBool::new(false);
    TypeDef::record(names::FLAKY_IMPL)
        .implements(names::FLAKY)
        .constructor(Constructor::no_args().with_body(move |ty, _| {
            if tripped.swap(true, Ordering::SeqCst) {
                Ok(Record::new(ty.clone()))
            } else {
                Err(InvocationError::failed("first construction fails"))
            }
        }))
}

/// Full fixture catalog
///
/// # Graph
/// - `Foo` is implemented only by `CircularFoo`, whose constructor needs a `Foo`
/// - `Baz` has a private, a deprecated and a public implementation, in that
///   registration order
/// - `Secret` has only a private implementation in a nested scope
/// - `Node` is an interface whose `next` accessor returns `Node`
/// - `Fragile` always fails to construct; `Picky` rejects its setter
/// - `Person` extends `Named`; `Customer` inherits `setId` from `Entity`
/// - `BazPair` and `FlakyPair` take two arguments of the same interface;
///   `FlakyImpl` fails only on its first construction
pub fn fixture_catalog() -> Catalog {
    Catalog::new()
        .with(test_class_a())
        .with(test_class_b())
        .with(TypeDef::enumeration(names::ENUM_CLASS, ["ONE", "TWO", "THREE"]))
        .with(TypeDef::enumeration(names::EMPTY_ENUM, Vec::<&str>::new()))
        .with(interface_a())
        .with(TypeDef::interface(names::FOO))
        .with(
            TypeDef::record(names::CIRCULAR_FOO)
                .implements(names::FOO)
                .constructor(Constructor::new(vec![param("foo", names::FOO)]))
                .method(Method::getter("getFoo", "foo", ty(names::FOO))),
        )
        .with(TypeDef::interface(names::BAZ).method(Method::accessor("getType", ty("String"))))
        .with(
            TypeDef::record(names::HIDDEN_BAZ)
                .private()
                .implements(names::BAZ)
                .constructor(Constructor::no_args()),
        )
        .with(
            TypeDef::record(names::LEGACY_BAZ)
                .deprecated()
                .implements(names::BAZ)
                .constructor(Constructor::no_args()),
        )
        .with(
            TypeDef::record(names::DEFAULT_BAZ)
                .implements(names::BAZ)
                .constructor(Constructor::new(vec![param("type", "String")]))
                .method(Method::getter("getType", "type", ty("String"))),
        )
        .with(TypeDef::interface(names::SECRET))
        .with(
            TypeDef::record(names::SECRET_IMPL)
                .private()
                .implements(names::SECRET)
                .constructor(Constructor::no_args()),
        )
        .with(
            TypeDef::abstract_type(names::ABSTRACT_CLASS_A)
                .constructor(Constructor::no_args())
                .method(Method::accessor("getAbstractDouble", ty("f64")))
                .method(
                    Method::new("getString")
                        .returns(ty("String"))
                        .body(|_, _| Ok(Some(Value::from(ABSTRACT_CLASS_A_STRING)))),
                ),
        )
        .with(
            TypeDef::abstract_type(names::ABSTRACT_CLASS_B)
                .constructor(Constructor::new(vec![param("value", "String")])),
        )
        .with(
            TypeDef::interface(names::NODE)
                .method(Method::accessor("next", ty(names::NODE)))
                .method(Method::accessor("label", ty("String"))),
        )
        .with(
            TypeDef::record(names::FRAGILE).constructor(
                Constructor::no_args()
                    .with_body(|_, _| Err(InvocationError::failed("always fails"))),
            ),
        )
        .with(
            TypeDef::record(names::PICKY)
                .constructor(Constructor::no_args())
                .method(
                    Method::new("setAge")
                        .param(ty("i32"))
                        .body(|_, _| Err(InvocationError::failed("age rejected"))),
                )
                .method(Method::setter("setName", "name", ty("String"))),
        )
        .with(
            TypeDef::record(names::NEEDS_UNKNOWN)
                .constructor(Constructor::new(vec![param("unknown", names::UNKNOWN)])),
        )
        .with(TypeDef::interface(names::NAMED).method(Method::accessor("getName", ty("String"))))
        .with(
            TypeDef::interface(names::PERSON)
                .implements(names::NAMED)
                .method(Method::accessor("getAge", ty("i32"))),
        )
        .with(
            TypeDef::abstract_type(names::ENTITY)
                .constructor(Constructor::no_args())
                .method(Method::setter("setId", "id", ty("i64"))),
        )
        .with(
            TypeDef::record(names::CUSTOMER)
                .implements(names::ENTITY)
                .constructor(Constructor::no_args())
                .method(Method::setter("setEmail", "email", ty("String"))),
        )
        .with(TypeDef::record(names::BAZ_PAIR).constructor(Constructor::new(vec![
            param("first", names::BAZ),
            param("second", names::BAZ),
        ])))
        .with(TypeDef::interface(names::FLAKY))
        .with(flaky_impl())
        .with(TypeDef::record(names::FLAKY_PAIR).constructor(Constructor::new(vec![
            param("first", names::FLAKY),
            param("second", names::FLAKY),
        ])))
}
