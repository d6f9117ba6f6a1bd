//! Type introspection capability
//!
//! Synthesis never inspects Rust types directly. Everything it needs to know
//! about a type (its kind, constructors, methods, declared supertypes) comes
//! from a [`TypeCatalog`]. [`Catalog`] is the in-memory implementation.

use crate::descriptor::{RawType, TypeDescriptor};
use crate::scope::ScopePath;
use crate::value::{Record, Value};
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

/// Invocable constructor body
pub type ConstructorBody =
    Arc<dyn Fn(&RawType, Vec<Value>) -> Result<Record, InvocationError> + Send + Sync>;

/// Invocable method body, run against the receiver record
pub type MethodBody =
    Arc<dyn Fn(&mut Record, Vec<Value>) -> Result<Option<Value>, InvocationError> + Send + Sync>;

/// Source of type definitions consulted during synthesis
pub trait TypeCatalog: Send + Sync + fmt::Debug {
    /// Definition of a raw type, if known
    fn lookup(&self, name: &RawType) -> Option<Arc<TypeDef>>;

    /// Transitive subtypes of `name` declared within its declaring scope
    ///
    /// Returned in discovery order. The supertype itself is never included.
    fn subtypes_of(&self, name: &RawType) -> Vec<Arc<TypeDef>>;

    /// Methods of `def`, declared and inherited
    ///
    /// Own methods come first, then those of each supertype breadth-first in
    /// declaration order. A method whose signature was already collected is
    /// shadowed. Unknown supertypes contribute nothing.
    fn methods_of(&self, def: &TypeDef) -> Vec<Method> {
        let mut methods = Vec::new();
        inherit(&mut methods, def);

        let mut seen = HashSet::from([def.name().clone()]);
        let mut pending: VecDeque<RawType> = def.supertypes().iter().cloned().collect();
        while let Some(name) = pending.pop_front() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(parent) = self.lookup(&name) {
                inherit(&mut methods, &parent);
                pending.extend(parent.supertypes().iter().cloned());
            }
        }
        methods
    }
}

fn inherit(methods: &mut Vec<Method>, owner: &TypeDef) {
    for method in owner.methods() {
        if !methods.iter().any(|m| m.same_signature(method)) {
            methods.push(method.clone());
        }
    }
}

/// Accessibility of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Publicly accessible
    #[default]
    Public,

    /// Accessible only within its declaring scope
    Private,
}

/// Category of a catalogued type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Concretely constructible type
    Record,

    /// Enumeration with its declared constants, in declaration order
    Enum {
        /// Declared constants
        constants: Vec<Arc<str>>,
    },

    /// Pure capability surface with no construction path of its own
    Interface,

    /// Partially implemented type; abstract methods have no body
    Abstract,
}

/// Definition of one type
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: RawType,
    kind: TypeKind,
    scope: ScopePath,
    visibility: Visibility,
    deprecated: bool,
    supertypes: Vec<RawType>,
    constructors: Vec<Constructor>,
    methods: Vec<Method>,
}

impl TypeDef {
    fn new(name: RawType, kind: TypeKind) -> Self {
        let scope = scope_of(&name);
        Self {
            name,
            kind,
            scope,
            visibility: Visibility::Public,
            deprecated: false,
            supertypes: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Concretely constructible type
    #[must_use]
    pub fn record(name: impl Into<RawType>) -> Self {
        Self::new(name.into(), TypeKind::Record)
    }

    /// Enumeration with the given constants
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<RawType>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let constants = constants
            .into_iter()
            .map(|c| Arc::from(c.as_ref()))
            .collect();
        Self::new(name.into(), TypeKind::Enum { constants })
    }

    /// Interface type
    #[must_use]
    pub fn interface(name: impl Into<RawType>) -> Self {
        Self::new(name.into(), TypeKind::Interface)
    }

    /// Abstract type
    #[must_use]
    pub fn abstract_type(name: impl Into<RawType>) -> Self {
        Self::new(name.into(), TypeKind::Abstract)
    }

    /// Mark as accessible only within its scope
    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Mark as deprecated; implementation lookup skips deprecated types
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Declare a direct supertype
    #[must_use]
    pub fn implements(mut self, supertype: impl Into<RawType>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Add a constructor
    #[must_use]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Add a method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &RawType {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline]
    #[must_use]
    pub fn scope(&self) -> &ScopePath {
        &self.scope
    }

    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    #[inline]
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    #[inline]
    #[must_use]
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    #[inline]
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Abstract)
    }

    #[inline]
    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum { .. })
    }

    /// Declared constants, for enumerations
    #[inline]
    #[must_use]
    pub fn enum_constants(&self) -> Option<&[Arc<str>]> {
        match &self.kind {
            TypeKind::Enum { constants } => Some(constants),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn supertypes(&self) -> &[RawType] {
        &self.supertypes
    }

    #[inline]
    #[must_use]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    #[inline]
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Constructor with the fewest parameters; the first declared wins a tie
    #[must_use]
    pub fn minimal_constructor(&self) -> Option<&Constructor> {
        self.constructors.iter().fold(None, |best: Option<&Constructor>, c| match best {
            Some(b) if b.arity() <= c.arity() => Some(b),
            _ => Some(c),
        })
    }
}

/// Declaring scope implied by a dotted type name: `com.acme.Foo` → `com.acme`
fn scope_of(name: &RawType) -> ScopePath {
    name.as_str()
        .rsplit_once('.')
        .map_or_else(ScopePath::root, |(scope, _)| {
            ScopePath::new(scope.split('.').map(str::to_string).collect())
        })
}

/// Named constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    ty: TypeDescriptor,
}

impl Param {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
}

/// Constructor: parameters plus an invocable body
///
/// The default body stores each argument in the field named after its
/// parameter.
#[derive(Clone)]
pub struct Constructor {
    params: Vec<Param>,
    body: ConstructorBody,
}

impl Constructor {
    /// Constructor with the default field-assigning body
    #[must_use]
    pub fn new(params: Vec<Param>) -> Self {
        let names: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
        let body: ConstructorBody = Arc::new(move |ty: &RawType, args: Vec<Value>| {
            let mut record = Record::new(ty.clone());
            for (name, value) in names.iter().zip(args) {
                record.set(name.clone(), value);
            }
            Ok(record)
        });
        Self { params, body }
    }

    /// Zero-argument constructor
    #[must_use]
    pub fn no_args() -> Self {
        Self::new(Vec::new())
    }

    /// Replace the body
    #[must_use]
    pub fn with_body<F>(mut self, body: F) -> Self
    where
        F: Fn(&RawType, Vec<Value>) -> Result<Record, InvocationError> + Send + Sync + 'static,
    {
        self.body = Arc::new(body);
        self
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Construct an instance of `ty`
    ///
    /// # Errors
    /// Arity mismatch, or whatever the body rejects
    pub fn invoke(&self, ty: &RawType, args: Vec<Value>) -> Result<Record, InvocationError> {
        if args.len() != self.params.len() {
            return Err(InvocationError::ArityMismatch {
                expected: self.params.len(),
                actual: args.len(),
            });
        }
        (self.body)(ty, args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Method: signature plus an optional body
///
/// A method without a body is abstract; proxies answer it through their
/// invocation handler.
#[derive(Clone)]
pub struct Method {
    name: String,
    params: Vec<TypeDescriptor>,
    returns: Option<TypeDescriptor>,
    body: Option<MethodBody>,
}

impl Method {
    /// Abstract method with no parameters and no return type
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            body: None,
        }
    }

    /// Abstract accessor returning `returns`
    #[must_use]
    pub fn accessor(name: impl Into<String>, returns: TypeDescriptor) -> Self {
        Self::new(name).returns(returns)
    }

    /// Concrete single-argument method assigning `field`
    #[must_use]
    pub fn setter(name: impl Into<String>, field: impl Into<String>, ty: TypeDescriptor) -> Self {
        let field = field.into();
        Self::new(name).param(ty).body(move |target, mut args| {
            let value = args.pop().ok_or(InvocationError::ArityMismatch {
                expected: 1,
                actual: 0,
            })?;
            target.set(field.clone(), value);
            Ok(None)
        })
    }

    /// Concrete accessor reading `field`
    #[must_use]
    pub fn getter(name: impl Into<String>, field: impl Into<String>, ty: TypeDescriptor) -> Self {
        let field = field.into();
        Self::new(name)
            .returns(ty)
            .body(move |target, _args| Ok(target.get(&field).cloned()))
    }

    /// Append a parameter
    #[must_use]
    pub fn param(mut self, ty: TypeDescriptor) -> Self {
        self.params.push(ty);
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, ty: TypeDescriptor) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Set the body
    #[must_use]
    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(&mut Record, Vec<Value>) -> Result<Option<Value>, InvocationError>
            + Send
            + Sync
            + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    #[inline]
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeDescriptor> {
        self.returns.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.body.is_none()
    }

    /// Same name and parameter types
    #[inline]
    #[must_use]
    pub fn same_signature(&self, other: &Method) -> bool {
        self.name == other.name && self.params == other.params
    }

    /// Run the body against `target`
    ///
    /// # Errors
    /// Abstract method, arity mismatch, or whatever the body rejects
    pub fn invoke(
        &self,
        target: &mut Record,
        args: Vec<Value>,
    ) -> Result<Option<Value>, InvocationError> {
        let body = self
            .body
            .as_ref()
            .ok_or_else(|| InvocationError::Abstract(self.name.clone()))?;
        if args.len() != self.params.len() {
            return Err(InvocationError::ArityMismatch {
                expected: self.params.len(),
                actual: args.len(),
            });
        }
        body(target, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("abstract", &self.is_abstract())
            .finish()
    }
}

/// Failure raised by a constructor or method body
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
    /// Wrong number of arguments
    #[error("expected {expected} arguments, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// Method has no body
    #[error("method '{0}' is abstract")]
    Abstract(String),

    /// Body rejected the call
    #[error("invocation failed: {0}")]
    Failed(String),
}

impl InvocationError {
    /// Create a body failure
    #[inline]
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// In-memory [`TypeCatalog`]
///
/// Registration order is discovery order for [`TypeCatalog::subtypes_of`].
/// Registering a name twice replaces the earlier definition in place.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    types: IndexMap<RawType, Arc<TypeDef>>,
}

impl Catalog {
    /// Create new empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Register a type definition
    pub fn register(&mut self, def: TypeDef) -> &mut Self {
        self.types.insert(def.name.clone(), Arc::new(def));
        self
    }

    /// Builder-style registration
    #[must_use]
    pub fn with(mut self, def: TypeDef) -> Self {
        self.register(def);
        self
    }

    /// Check if a type is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &RawType) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, in registration order
    #[inline]
    #[must_use]
    pub fn names(&self) -> Vec<&RawType> {
        self.types.keys().collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn is_subtype(&self, def: &TypeDef, target: &RawType, seen: &mut HashSet<RawType>) -> bool {
        def.supertypes.iter().any(|s| {
            s == target
                || (seen.insert(s.clone())
                    && self
                        .types
                        .get(s)
                        .is_some_and(|parent| self.is_subtype(parent, target, seen)))
        })
    }
}

impl TypeCatalog for Catalog {
    fn lookup(&self, name: &RawType) -> Option<Arc<TypeDef>> {
        self.types.get(name).cloned()
    }

    fn subtypes_of(&self, name: &RawType) -> Vec<Arc<TypeDef>> {
        let Some(supertype) = self.types.get(name) else {
            return Vec::new();
        };

        self.types
            .values()
            .filter(|def| def.name != *name)
            .filter(|def| supertype.scope.contains(&def.scope))
            .filter(|def| self.is_subtype(def, name, &mut HashSet::new()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypeDescriptor {
        TypeDescriptor::of("i32")
    }

    #[test]
    fn scope_derived_from_dotted_name() {
        let def = TypeDef::record("com.acme.Person");
        assert_eq!(def.scope().to_string(), "com.acme");

        let bare = TypeDef::record("Person");
        assert!(bare.scope().is_root());
    }

    #[test]
    fn minimal_constructor_prefers_fewest_params_then_first() {
        let def = TypeDef::record("Point")
            .constructor(Constructor::new(vec![
                Param::new("x", int()),
                Param::new("y", int()),
            ]))
            .constructor(Constructor::new(vec![Param::new("x", int())]))
            .constructor(Constructor::new(vec![Param::new("y", int())]));

        let chosen = def.minimal_constructor().unwrap();
        assert_eq!(chosen.arity(), 1);
        assert_eq!(chosen.params()[0].name(), "x");
    }

    #[test]
    fn minimal_constructor_none_without_constructors() {
        assert!(TypeDef::record("Empty").minimal_constructor().is_none());
    }

    #[test]
    fn default_constructor_assigns_fields() {
        let ctor = Constructor::new(vec![Param::new("x", int()), Param::new("y", int())]);
        let record = ctor
            .invoke(&RawType::new("Point"), vec![Value::from(1), Value::from(2)])
            .unwrap();
        assert_eq!(record.get("x"), Some(&Value::Int(1)));
        assert_eq!(record.get("y"), Some(&Value::Int(2)));
    }

    #[test]
    fn constructor_arity_mismatch() {
        let ctor = Constructor::new(vec![Param::new("x", int())]);
        let err = ctor.invoke(&RawType::new("Point"), vec![]).unwrap_err();
        assert_eq!(
            err,
            InvocationError::ArityMismatch {
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn setter_and_getter_bodies() {
        let setter = Method::setter("setName", "name", TypeDescriptor::of("String"));
        let getter = Method::getter("getName", "name", TypeDescriptor::of("String"));
        let mut record = Record::new(RawType::new("Person"));

        assert!(!setter.is_abstract());
        setter.invoke(&mut record, vec![Value::from("Ada")]).unwrap();
        assert_eq!(
            getter.invoke(&mut record, vec![]).unwrap(),
            Some(Value::from("Ada"))
        );
    }

    #[test]
    fn abstract_method_cannot_be_invoked() {
        let accessor = Method::accessor("getId", int());
        let mut record = Record::new(RawType::new("X"));
        assert!(accessor.is_abstract());
        assert_eq!(
            accessor.invoke(&mut record, vec![]),
            Err(InvocationError::Abstract("getId".into()))
        );
    }

    fn method_names(methods: &[Method]) -> Vec<&str> {
        methods.iter().map(Method::name).collect()
    }

    #[test]
    fn methods_of_includes_inherited() {
        let catalog = Catalog::new()
            .with(
                TypeDef::interface("Named")
                    .method(Method::accessor("getName", TypeDescriptor::of("String"))),
            )
            .with(TypeDef::interface("Aged").method(Method::accessor("getAge", int())))
            .with(
                TypeDef::interface("Person")
                    .implements("Named")
                    .implements("Aged")
                    .method(Method::accessor("getEmail", TypeDescriptor::of("String"))),
            )
            .with(TypeDef::interface("Employee").implements("Person"));
        let employee = catalog.lookup(&RawType::new("Employee")).unwrap();

        let methods = catalog.methods_of(&employee);
        assert_eq!(method_names(&methods), vec!["getEmail", "getName", "getAge"]);
    }

    #[test]
    fn methods_of_own_declaration_shadows_inherited() {
        let catalog = Catalog::new().with(
            TypeDef::abstract_type("Base")
                .method(Method::accessor("getId", int()))
                .method(Method::setter("setId", "id", int())),
        );
        let def = TypeDef::record("Impl")
            .implements("Base")
            .implements("Missing")
            .method(Method::getter("getId", "id", int()));

        let methods = catalog.methods_of(&def);
        assert_eq!(method_names(&methods), vec!["getId", "setId"]);
        assert!(!methods[0].is_abstract());
    }

    #[test]
    fn methods_of_tolerates_supertype_cycles() {
        let catalog = Catalog::new()
            .with(TypeDef::interface("A").implements("B").method(Method::accessor("a", int())))
            .with(TypeDef::interface("B").implements("A").method(Method::accessor("b", int())));
        let a = catalog.lookup(&RawType::new("A")).unwrap();
        assert_eq!(method_names(&catalog.methods_of(&a)), vec!["a", "b"]);
    }

    #[test]
    fn subtypes_are_transitive_and_scoped() {
        let catalog = Catalog::new()
            .with(TypeDef::interface("com.acme.Shape"))
            .with(TypeDef::interface("com.acme.Polygon").implements("com.acme.Shape"))
            .with(TypeDef::record("com.acme.shapes.Square").implements("com.acme.Polygon"))
            .with(TypeDef::record("com.acme.Circle").implements("com.acme.Shape"))
            .with(TypeDef::record("org.other.Blob").implements("com.acme.Shape"));

        let names: Vec<String> = catalog
            .subtypes_of(&RawType::new("com.acme.Shape"))
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["com.acme.Polygon", "com.acme.shapes.Square", "com.acme.Circle"]
        );
    }

    #[test]
    fn subtypes_tolerate_supertype_cycles() {
        let catalog = Catalog::new()
            .with(TypeDef::interface("A").implements("B"))
            .with(TypeDef::interface("B").implements("A"))
            .with(TypeDef::interface("Target"));
        assert!(catalog.subtypes_of(&RawType::new("Target")).is_empty());
    }

    #[test]
    fn subtypes_of_unknown_type_is_empty() {
        assert!(Catalog::new().subtypes_of(&RawType::new("Nope")).is_empty());
    }

    #[test]
    fn register_replaces_in_place() {
        let mut catalog = Catalog::new();
        catalog
            .register(TypeDef::record("A"))
            .register(TypeDef::record("B"))
            .register(TypeDef::interface("A"));
        assert_eq!(catalog.len(), 2);
        assert!(catalog.lookup(&RawType::new("A")).unwrap().is_interface());
        assert_eq!(catalog.names()[0].as_str(), "A");
    }
}
