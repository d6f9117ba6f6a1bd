use crate::context::Resolution;
use crate::factory::Engine;
use crate::synthesizer::{Synthesis, Synthesizer};
use crate::SynthesisError;
use datagen_model::{InvocationHandler, Method, Proxy, TypeDef, TypeDescriptor, Value};
use std::sync::Arc;

/// Stands in for interfaces and abstract types
///
/// Interfaces always get a proxy. Abstract types additionally need a
/// zero-argument constructor for the proxy's base; a type whose simplest
/// constructor takes arguments is an unsupported construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxySynthesizer;

impl ProxySynthesizer {
    fn handler(resolution: &Resolution) -> Arc<dyn InvocationHandler> {
        Arc::new(ResolvingHandler::new(Arc::clone(resolution.engine())))
    }

    fn abstract_proxy(
        request: &TypeDescriptor,
        def: Arc<TypeDef>,
        resolution: &Resolution,
    ) -> Synthesis {
        let constructor = match def.minimal_constructor() {
            Some(c) if c.arity() == 0 => c,
            Some(c) => {
                let reason = format!("simplest constructor takes {} arguments", c.arity());
                return Err(unsupported(request, reason));
            }
            None => return Err(unsupported(request, "no constructor declared")),
        };

        let base = match constructor.invoke(def.name(), Vec::new()) {
            Ok(base) => base,
            Err(e) => {
                tracing::debug!("Base constructor of {} failed: {}", def.name(), e);
                return Ok(None);
            }
        };
        let handler = Self::handler(resolution);
        let proxy = Proxy::with_base(resolution.catalog(), def, base, handler);
        Ok(Some(Value::Proxy(proxy)))
    }
}

fn unsupported(request: &TypeDescriptor, reason: impl Into<String>) -> SynthesisError {
    let err = SynthesisError::unsupported_construction(request, reason);
    tracing::warn!("{}", err);
    err
}

impl Synthesizer for ProxySynthesizer {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        let Some(def) = resolution.lookup(request.raw()) else {
            return Ok(None);
        };

        if def.is_interface() {
            let handler = Self::handler(resolution);
            let proxy = Proxy::new(resolution.catalog(), def, handler);
            return Ok(Some(Value::Proxy(proxy)));
        }
        if def.is_abstract() {
            return Self::abstract_proxy(request, def, resolution);
        }
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "proxy"
    }
}

/// Answers proxy accessors from the accessor table, else by resolving the
/// declared return type in a fresh resolution
///
/// Accessors with a registered supplier are intercepted even when an
/// abstract type's base implements them.
struct ResolvingHandler {
    engine: Arc<Engine>,
}

impl ResolvingHandler {
    fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

impl InvocationHandler for ResolvingHandler {
    fn intercepts(&self, _target: &TypeDef, method: &Method) -> bool {
        self.engine.registry().accessor(method.name()).is_some()
    }

    fn invoke(&self, target: &TypeDef, method: &Method) -> Option<Value> {
        let mut resolution = Resolution::new(&self.engine);

        if let Some(supplier) = self.engine.registry().accessor(method.name()) {
            return Some(resolution.supply(supplier.as_ref()));
        }

        let returns = method.return_type()?;
        match resolution.resolve(returns) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Accessor {}.{} failed: {}", target.name(), method.name(), e);
                None
            }
        }
    }
}
