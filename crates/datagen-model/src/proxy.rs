//! Capability proxies for interface and abstract types
//!
//! A [`Proxy`] stands in for a value of a type that cannot be constructed
//! directly. Its capability surface is every method the type declares or
//! inherits. Calls are answered lazily: concrete methods run against the
//! base record (abstract types only), abstract methods are delegated to the
//! proxy's [`InvocationHandler`] each time they are called.

use crate::catalog::{Method, TypeCatalog, TypeDef};
use crate::descriptor::RawType;
use crate::value::{Record, Value};
use parking_lot::Mutex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Answers abstract method calls on a [`Proxy`]
pub trait InvocationHandler: Send + Sync {
    /// Produce the result of calling `method` on a proxy for `target`
    fn invoke(&self, target: &TypeDef, method: &Method) -> Option<Value>;

    /// Whether `method` goes to the handler even when the base has a body
    fn intercepts(&self, _target: &TypeDef, _method: &Method) -> bool {
        false
    }
}

impl<F> InvocationHandler for F
where
    F: Fn(&TypeDef, &Method) -> Option<Value> + Send + Sync,
{
    fn invoke(&self, target: &TypeDef, method: &Method) -> Option<Value> {
        self(target, method)
    }
}

struct ProxyInner {
    def: Arc<TypeDef>,
    methods: Vec<Method>,
    base: Option<Mutex<Record>>,
    handler: Arc<dyn InvocationHandler>,
}

/// Lazily answering stand-in for an interface or abstract type
///
/// Cloning shares the underlying proxy. Equality and hashing are by identity.
#[derive(Clone)]
pub struct Proxy {
    inner: Arc<ProxyInner>,
}

impl Proxy {
    /// Proxy for an interface; every call goes to `handler`
    #[must_use]
    pub fn new(
        catalog: &dyn TypeCatalog,
        def: Arc<TypeDef>,
        handler: Arc<dyn InvocationHandler>,
    ) -> Self {
        Self::build(catalog, def, None, handler)
    }

    /// Proxy for an abstract type backed by an already constructed base
    #[must_use]
    pub fn with_base(
        catalog: &dyn TypeCatalog,
        def: Arc<TypeDef>,
        base: Record,
        handler: Arc<dyn InvocationHandler>,
    ) -> Self {
        Self::build(catalog, def, Some(base), handler)
    }

    fn build(
        catalog: &dyn TypeCatalog,
        def: Arc<TypeDef>,
        base: Option<Record>,
        handler: Arc<dyn InvocationHandler>,
    ) -> Self {
        let methods = catalog.methods_of(&def);
        Self {
            inner: Arc::new(ProxyInner {
                def,
                methods,
                base: base.map(Mutex::new),
                handler,
            }),
        }
    }

    /// Type this proxy stands in for
    #[inline]
    #[must_use]
    pub fn target(&self) -> &RawType {
        self.inner.def.name()
    }

    #[inline]
    #[must_use]
    pub fn definition(&self) -> &TypeDef {
        &self.inner.def
    }

    /// Declared and inherited methods the proxy answers
    #[inline]
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.inner.methods
    }

    /// Snapshot of the base record, for abstract-type proxies
    #[must_use]
    pub fn base(&self) -> Option<Record> {
        self.inner.base.as_ref().map(|b| b.lock().clone())
    }

    /// Call the accessor named `accessor`
    ///
    /// Returns `None` if the type neither declares nor inherits such a
    /// method, if a concrete method fails or returns nothing, or if the
    /// handler declines.
    #[must_use]
    pub fn call(&self, accessor: &str) -> Option<Value> {
        let inner = &self.inner;
        let method = inner.methods.iter().find(|m| m.name() == accessor)?;

        if !method.is_abstract() && !inner.handler.intercepts(&inner.def, method) {
            if let Some(base) = &inner.base {
                let mut record = base.lock();
                return method.invoke(&mut record, Vec::new()).ok().flatten();
            }
        }

        inner.handler.invoke(&inner.def, method)
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Proxy {}

impl Hash for Proxy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("target", self.target())
            .field("base", &self.inner.base.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Constructor};
    use crate::descriptor::TypeDescriptor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn greeter() -> Arc<TypeDef> {
        Arc::new(
            TypeDef::interface("Greeter")
                .method(Method::accessor("greeting", TypeDescriptor::of("String")))
                .method(Method::accessor("volume", TypeDescriptor::of("i32"))),
        )
    }

    fn constant_handler() -> Arc<dyn InvocationHandler> {
        Arc::new(|_: &TypeDef, method: &Method| match method.name() {
            "greeting" => Some(Value::from("hello")),
            _ => None,
        })
    }

    fn account() -> Arc<TypeDef> {
        Arc::new(
            TypeDef::abstract_type("Account")
                .constructor(Constructor::no_args())
                .method(Method::getter("owner", "owner", TypeDescriptor::of("String")))
                .method(Method::accessor("balance", TypeDescriptor::of("i64"))),
        )
    }

    #[test]
    fn interface_calls_go_to_handler() {
        let proxy = Proxy::new(&Catalog::new(), greeter(), constant_handler());
        assert_eq!(proxy.target().as_str(), "Greeter");
        assert_eq!(proxy.call("greeting"), Some(Value::from("hello")));
        assert_eq!(proxy.call("volume"), None);
    }

    #[test]
    fn undeclared_method_is_none() {
        let proxy = Proxy::new(&Catalog::new(), greeter(), constant_handler());
        assert_eq!(proxy.call("missing"), None);
    }

    #[test]
    fn inherited_accessors_are_answered() {
        let catalog = Catalog::new().with(
            TypeDef::interface("Named")
                .method(Method::accessor("name", TypeDescriptor::of("String"))),
        );
        let def = Arc::new(
            TypeDef::interface("Pet")
                .implements("Named")
                .method(Method::accessor("legs", TypeDescriptor::of("i32"))),
        );
        let handler = Arc::new(|_: &TypeDef, method: &Method| match method.name() {
            "name" => Some(Value::from("rex")),
            _ => Some(Value::Int(4)),
        });
        let proxy = Proxy::new(&catalog, def, handler);

        assert_eq!(proxy.methods().len(), 2);
        assert_eq!(proxy.call("name"), Some(Value::from("rex")));
        assert_eq!(proxy.call("legs"), Some(Value::Int(4)));
    }

    #[test]
    fn handler_invoked_on_every_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handler = Arc::new(move |_: &TypeDef, _: &Method| {
            Some(Value::from(counter.fetch_add(1, Ordering::SeqCst) as i64))
        });
        let proxy = Proxy::new(&Catalog::new(), greeter(), handler);

        assert_eq!(proxy.call("volume"), Some(Value::Int(0)));
        assert_eq!(proxy.call("volume"), Some(Value::Int(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn abstract_type_runs_concrete_methods_on_base() {
        let def = account();
        let base = Record::new(def.name().clone()).with("owner", "ada");
        let handler = Arc::new(|_: &TypeDef, _: &Method| Some(Value::Int(7)));
        let proxy = Proxy::with_base(&Catalog::new(), def, base, handler);

        assert_eq!(proxy.call("owner"), Some(Value::from("ada")));
        assert_eq!(proxy.call("balance"), Some(Value::Int(7)));
        assert!(proxy.base().is_some());
    }

    struct Intercepting;

    impl InvocationHandler for Intercepting {
        fn invoke(&self, _: &TypeDef, method: &Method) -> Option<Value> {
            Some(Value::from(format!("intercepted {}", method.name())))
        }

        fn intercepts(&self, _: &TypeDef, method: &Method) -> bool {
            method.name() == "owner"
        }
    }

    #[test]
    fn intercepted_concrete_method_goes_to_handler() {
        let def = account();
        let base = Record::new(def.name().clone()).with("owner", "ada");
        let proxy = Proxy::with_base(&Catalog::new(), def, base, Arc::new(Intercepting));

        assert_eq!(proxy.call("owner"), Some(Value::from("intercepted owner")));
        assert_eq!(proxy.base().unwrap().get("owner"), Some(&Value::from("ada")));
    }

    #[test]
    fn identity_equality() {
        let a = Proxy::new(&Catalog::new(), greeter(), constant_handler());
        let b = Proxy::new(&Catalog::new(), greeter(), constant_handler());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
