//! Per-call synthesis context
//!
//! A [`Resolution`] is created fresh for every top-level call and for every
//! proxy accessor invocation. It is never shared between calls, so the cycle
//! guard and the random source it carries are private to one resolution.

use crate::error::SynthesisError;
use crate::factory::Engine;
use crate::registry::LeafRegistry;
use crate::resolver::TypeResolver;
use crate::synthesizer::{Synthesis, Synthesizer};
use datagen_model::{RawType, TypeCatalog, TypeDef, TypeDescriptor, Value};
use datagen_supplier::Supplier;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::sync::Arc;

/// Raw types whose implementation lookup is currently under way
#[derive(Debug, Default, Clone)]
pub struct InProgress {
    types: HashSet<RawType>,
}

impl InProgress {
    /// Mark `raw` as in progress; false if it already was
    #[inline]
    pub fn enter(&mut self, raw: &RawType) -> bool {
        self.types.insert(raw.clone())
    }

    /// Clear the mark for `raw`
    #[inline]
    pub fn exit(&mut self, raw: &RawType) {
        self.types.remove(raw);
    }

    /// Check if `raw` is in progress
    #[inline]
    #[must_use]
    pub fn contains(&self, raw: &RawType) -> bool {
        self.types.contains(raw)
    }

    /// Check if nothing is in progress
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// State threaded through one synthesis call
pub struct Resolution {
    engine: Arc<Engine>,
    in_progress: InProgress,
    rng: StdRng,
}

impl Resolution {
    pub(crate) fn new(engine: &Arc<Engine>) -> Self {
        Self {
            engine: Arc::clone(engine),
            in_progress: InProgress::default(),
            rng: engine.fork_rng(),
        }
    }

    pub(crate) fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Leaf suppliers and size policy of the factory
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &LeafRegistry {
        self.engine.registry()
    }

    /// Type catalog of the factory
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &dyn TypeCatalog {
        self.engine.catalog()
    }

    /// Catalogued definition of `raw`
    #[inline]
    #[must_use]
    pub fn lookup(&self, raw: &RawType) -> Option<Arc<TypeDef>> {
        self.engine.catalog().lookup(raw)
    }

    /// Cycle guard for implementation lookup
    #[inline]
    pub fn in_progress(&mut self) -> &mut InProgress {
        &mut self.in_progress
    }

    /// Random source private to this resolution
    #[inline]
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Draw a container length from the size policy
    pub fn draw_size(&mut self) -> usize {
        self.engine.registry().size_policy().draw(&mut self.rng)
    }

    /// Run a leaf supplier with this resolution's random source
    pub fn supply(&mut self, supplier: &dyn Supplier) -> Value {
        supplier.supply(&mut self.rng)
    }

    /// Walk the synthesis chain for `request`
    ///
    /// # Errors
    /// Hard failures raised by any synthesizer
    pub fn create(&mut self, request: &TypeDescriptor) -> Synthesis {
        let engine = Arc::clone(&self.engine);
        engine.chain().try_create(request, self)
    }

    /// Resolve a possibly parameterized descriptor
    ///
    /// # Errors
    /// Hard failures raised by any synthesizer
    pub fn resolve(&mut self, request: &TypeDescriptor) -> Synthesis {
        TypeResolver.try_create(request, self)
    }

    /// Resolve, turning "no value" into a null slot
    ///
    /// # Errors
    /// Hard failures raised by any synthesizer
    pub fn resolve_or_null(&mut self, request: &TypeDescriptor) -> Result<Value, SynthesisError> {
        Ok(self.resolve(request)?.unwrap_or(Value::Null))
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("in_progress", &self.in_progress)
            .finish_non_exhaustive()
    }
}
