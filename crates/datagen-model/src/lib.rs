//! Datagen Model
//!
//! Vocabulary shared by every synthesis component.
//!
//! # Core Concepts
//!
//! - [`TypeDescriptor`]: Normalized "what to build" (raw type, arguments, array-ness)
//! - [`Value`]: Dynamic value produced by synthesis
//! - [`Record`]: Instance of a constructible type, fields by name
//! - [`TypeCatalog`]: Introspection capability (kinds, constructors, methods, subtypes)
//! - [`Proxy`]: Lazily answering stand-in for interface and abstract types
//!
//! # Example
//!
//! ```rust,ignore
//! use datagen_model::{Catalog, Constructor, Param, TypeDef, TypeDescriptor};
//!
//! let catalog = Catalog::new().with(
//!     TypeDef::record("com.acme.Point").constructor(Constructor::new(vec![
//!         Param::new("x", TypeDescriptor::of("i32")),
//!         Param::new("y", TypeDescriptor::of("i32")),
//!     ])),
//! );
//! let list: TypeDescriptor = "List<com.acme.Point>".parse()?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod catalog;
mod descriptor;
mod proxy;
mod scope;
mod value;

pub use catalog::{
    Catalog, Constructor, ConstructorBody, InvocationError, Method, MethodBody, Param,
    TypeCatalog, TypeDef, TypeKind, Visibility,
};
pub use descriptor::{well_known, DescriptorParseError, RawType, TypeDescriptor};
pub use proxy::{InvocationHandler, Proxy};
pub use scope::ScopePath;
pub use value::{EnumConstant, Record, Value};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    #[test]
    fn catalog_serves_proxy_definitions() {
        let catalog = Catalog::new().with(
            TypeDef::interface("com.acme.Clock")
                .method(Method::accessor("now", TypeDescriptor::of("DateTime"))),
        );
        let def = catalog.lookup(&RawType::new("com.acme.Clock")).unwrap();
        let proxy = Proxy::new(
            &catalog,
            def,
            Arc::new(|_: &TypeDef, _: &Method| Some(Value::from(0_i64))),
        );

        let value = Value::Proxy(proxy.clone());
        assert_eq!(value.as_proxy(), Some(&proxy));
        assert_eq!(proxy.call("now"), Some(Value::Int(0)));
    }

    #[test]
    fn enum_constants_in_declaration_order() {
        let def = TypeDef::enumeration("Role", ["ADMIN", "USER", "GUEST"]);
        let names: Vec<&str> = def
            .enum_constants()
            .unwrap()
            .iter()
            .map(AsRef::as_ref)
            .collect();
        assert_eq!(names, vec!["ADMIN", "USER", "GUEST"]);
        assert!(def.is_enum());
    }

    fn descriptor() -> impl Strategy<Value = TypeDescriptor> {
        let leaf = prop_oneof![
            Just(TypeDescriptor::of("i32")),
            Just(TypeDescriptor::of("String")),
            Just(TypeDescriptor::of("com.acme.Person")),
        ];
        leaf.prop_recursive(4, 16, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(TypeDescriptor::list_of),
                inner.clone().prop_map(TypeDescriptor::set_of),
                inner.clone().prop_map(TypeDescriptor::array_of),
                inner.clone().prop_map(TypeDescriptor::optional_of),
                (inner.clone(), inner).prop_map(|(k, v)| TypeDescriptor::map_of(k, v)),
            ]
        })
    }

    proptest! {
        #[test]
        fn descriptor_text_form_parses_back(d in descriptor()) {
            let parsed: TypeDescriptor = d.to_string().parse().unwrap();
            prop_assert_eq!(parsed, d);
        }
    }
}
