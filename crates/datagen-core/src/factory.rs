//! Object factory facade
//!
//! [`ObjectFactory`] is the entry point: it owns an immutable engine (leaf
//! registry, type catalog, synthesis chain, master random source) and opens
//! a fresh [`Resolution`] for every top-level call.

use crate::chain::SynthesisChain;
use crate::config::FactoryConfig;
use crate::context::Resolution;
use crate::error::SynthesisError;
use crate::registry::{LeafRegistry, SizePolicy};
use crate::resolver::TypeResolver;
use crate::strict::NonNull;
use crate::synthesizer::Synthesizer;
use datagen_model::{Catalog, RawType, TypeCatalog, TypeDescriptor, Value};
use datagen_supplier::{supplier_fn, SharedSupplier, Supplier};
use indexmap::{IndexMap, IndexSet};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;

/// Shared, immutable synthesis state
pub(crate) struct Engine {
    registry: LeafRegistry,
    catalog: Arc<dyn TypeCatalog>,
    chain: SynthesisChain,
    rng: Mutex<StdRng>,
}

impl Engine {
    pub(crate) fn registry(&self) -> &LeafRegistry {
        &self.registry
    }

    pub(crate) fn catalog(&self) -> &dyn TypeCatalog {
        self.catalog.as_ref()
    }

    pub(crate) fn chain(&self) -> &SynthesisChain {
        &self.chain
    }

    /// Independent random source for one resolution
    pub(crate) fn fork_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.rng.lock().gen())
    }

    fn draw_size(&self) -> usize {
        self.registry.size_policy().draw(&mut *self.rng.lock())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("catalog", &self.catalog)
            .field("chain", &self.chain.names())
            .finish_non_exhaustive()
    }
}

/// Synthesizes populated values for type descriptors
///
/// Cheap to clone and safe to share between threads; every call runs with
/// its own cycle guard and random source.
///
/// # Example
///
/// ```rust,ignore
/// let factory = ObjectFactory::builder()
///     .with_catalog(catalog)
///     .with_supplier_fn("i32", || Value::from(42))
///     .build()?;
///
/// let person = factory.create(&"com.acme.Person".parse()?)?;
/// let answers = factory.list_of_n(&TypeDescriptor::of("i32"), 3)?;
/// ```
#[derive(Debug, Clone)]
pub struct ObjectFactory {
    engine: Arc<Engine>,
}

impl ObjectFactory {
    /// Start configuring a factory
    #[inline]
    #[must_use]
    pub fn builder() -> ObjectFactoryBuilder {
        ObjectFactoryBuilder::new()
    }

    /// Create one value, failing if no synthesizer can produce it
    ///
    /// # Errors
    /// [`SynthesisError::Unsupported`] when every synthesizer declines, or any
    /// hard failure raised during synthesis
    pub fn create(&self, ty: &TypeDescriptor) -> Result<Value, SynthesisError> {
        let mut resolution = Resolution::new(&self.engine);
        let value = NonNull::new(TypeResolver).create(ty, &mut resolution)?;
        tracing::debug!("Created {} as {}", ty, value.kind_name());
        Ok(value)
    }

    /// Create one value, `None` if no synthesizer can produce it
    ///
    /// # Errors
    /// Hard failures raised during synthesis
    pub fn try_create(&self, ty: &TypeDescriptor) -> Result<Option<Value>, SynthesisError> {
        let mut resolution = Resolution::new(&self.engine);
        let value = TypeResolver.try_create(ty, &mut resolution)?;
        match &value {
            Some(v) => tracing::debug!("Created {} as {}", ty, v.kind_name()),
            None => tracing::debug!("No value for {}", ty),
        }
        Ok(value)
    }

    /// List of independently created values, length drawn from the size policy
    ///
    /// # Errors
    /// As [`ObjectFactory::create`]
    pub fn list_of(&self, ty: &TypeDescriptor) -> Result<Vec<Value>, SynthesisError> {
        self.repeat(ty, self.engine.draw_size())
    }

    /// List of exactly `count` independently created values
    ///
    /// # Errors
    /// Negative `count` is a precondition violation; otherwise as
    /// [`ObjectFactory::create`]
    pub fn list_of_n(&self, ty: &TypeDescriptor, count: i64) -> Result<Vec<Value>, SynthesisError> {
        self.repeat(ty, checked_count(count)?)
    }

    /// Set of created values; duplicates collapse
    ///
    /// # Errors
    /// As [`ObjectFactory::create`]
    pub fn set_of(&self, ty: &TypeDescriptor) -> Result<IndexSet<Value>, SynthesisError> {
        Ok(self.list_of(ty)?.into_iter().collect())
    }

    /// Set of at most `count` created values
    ///
    /// # Errors
    /// Negative `count` is a precondition violation; otherwise as
    /// [`ObjectFactory::create`]
    pub fn set_of_n(
        &self,
        ty: &TypeDescriptor,
        count: i64,
    ) -> Result<IndexSet<Value>, SynthesisError> {
        Ok(self.list_of_n(ty, count)?.into_iter().collect())
    }

    /// Map of created entries, entry count drawn from the size policy
    ///
    /// # Errors
    /// As [`ObjectFactory::create`]
    pub fn map_of(
        &self,
        key: &TypeDescriptor,
        value: &TypeDescriptor,
    ) -> Result<IndexMap<Value, Value>, SynthesisError> {
        self.entries(key, value, self.engine.draw_size())
    }

    /// Map of at most `count` created entries; equal keys overwrite
    ///
    /// # Errors
    /// Negative `count` is a precondition violation; otherwise as
    /// [`ObjectFactory::create`]
    pub fn map_of_n(
        &self,
        key: &TypeDescriptor,
        value: &TypeDescriptor,
        count: i64,
    ) -> Result<IndexMap<Value, Value>, SynthesisError> {
        self.entries(key, value, checked_count(count)?)
    }

    /// Leaf registry in use
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &LeafRegistry {
        self.engine.registry()
    }

    /// Synthesizer names, in dispatch order
    #[inline]
    #[must_use]
    pub fn chain_names(&self) -> Vec<&'static str> {
        self.engine.chain().names()
    }

    fn repeat(&self, ty: &TypeDescriptor, count: usize) -> Result<Vec<Value>, SynthesisError> {
        (0..count).map(|_| self.create(ty)).collect()
    }

    fn entries(
        &self,
        key: &TypeDescriptor,
        value: &TypeDescriptor,
        count: usize,
    ) -> Result<IndexMap<Value, Value>, SynthesisError> {
        let mut map = IndexMap::with_capacity(count);
        for _ in 0..count {
            map.insert(self.create(key)?, self.create(value)?);
        }
        Ok(map)
    }
}

impl Default for ObjectFactory {
    fn default() -> Self {
        Self::from_parts(
            LeafRegistry::with_basic_suppliers(FactoryConfig::default().string_length),
            Arc::new(Catalog::new()),
            StdRng::from_entropy(),
        )
    }
}

impl ObjectFactory {
    fn from_parts(registry: LeafRegistry, catalog: Arc<dyn TypeCatalog>, rng: StdRng) -> Self {
        Self {
            engine: Arc::new(Engine {
                registry,
                catalog,
                chain: SynthesisChain::standard(),
                rng: Mutex::new(rng),
            }),
        }
    }
}

fn checked_count(count: i64) -> Result<usize, SynthesisError> {
    usize::try_from(count)
        .map_err(|_| SynthesisError::precondition(format!("count cannot be negative: {count}")))
}

/// Builder for [`ObjectFactory`]
///
/// Caller suppliers are registered after the basic ones and therefore
/// replace them.
pub struct ObjectFactoryBuilder {
    config: FactoryConfig,
    suppliers: Vec<(RawType, SharedSupplier)>,
    accessors: Vec<(String, SharedSupplier)>,
    size_policy: Option<SizePolicy>,
    catalog: Arc<dyn TypeCatalog>,
}

impl ObjectFactoryBuilder {
    /// Create builder with default configuration and an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FactoryConfig::default(),
            suppliers: Vec::new(),
            accessors: Vec::new(),
            size_policy: None,
            catalog: Arc::new(Catalog::new()),
        }
    }

    /// With supplier for a raw type
    #[must_use]
    pub fn with_supplier(mut self, raw: impl Into<RawType>, supplier: impl Supplier + 'static) -> Self {
        self.suppliers.push((raw.into(), Arc::new(supplier)));
        self
    }

    /// With zero-argument closure as supplier for a raw type
    #[must_use]
    pub fn with_supplier_fn<F>(self, raw: impl Into<RawType>, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.with_supplier(raw, supplier_fn(f))
    }

    /// With supplier for a named proxy accessor
    #[must_use]
    pub fn with_accessor_supplier(
        mut self,
        name: impl Into<String>,
        supplier: impl Supplier + 'static,
    ) -> Self {
        self.accessors.push((name.into(), Arc::new(supplier)));
        self
    }

    /// With size policy, replacing the configured size range
    #[inline]
    #[must_use]
    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.size_policy = Some(policy);
        self
    }

    /// With type catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl TypeCatalog + 'static) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// With seed for the random source
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// With configuration, replacing seed, size range and supplier defaults
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: FactoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Without the basic leaf suppliers
    #[inline]
    #[must_use]
    pub fn without_basic_suppliers(mut self) -> Self {
        self.config.basic_suppliers = false;
        self
    }

    /// Build the factory
    ///
    /// # Errors
    /// Invalid configuration
    pub fn build(self) -> Result<ObjectFactory, SynthesisError> {
        self.config.validate()?;

        let mut registry = if self.config.basic_suppliers {
            LeafRegistry::with_basic_suppliers(self.config.string_length)
        } else {
            LeafRegistry::new()
        };
        for (raw, supplier) in self.suppliers {
            registry.register_shared(raw, supplier);
        }
        for (name, supplier) in self.accessors {
            registry.register_accessor_shared(name, supplier);
        }
        let size_policy = match self.size_policy {
            Some(policy) => policy,
            None => SizePolicy::range(self.config.min_size, self.config.max_size)?,
        };
        registry.set_size_policy(size_policy);

        let rng = self
            .config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        tracing::debug!(
            "Built object factory: {} leaf suppliers, seed {:?}",
            registry.len(),
            self.config.seed
        );
        Ok(ObjectFactory::from_parts(registry, self.catalog, rng))
    }
}

impl Default for ObjectFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectFactoryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectFactoryBuilder")
            .field("config", &self.config)
            .field("suppliers", &self.suppliers.len())
            .field("accessors", &self.accessors.len())
            .field("size_policy", &self.size_policy)
            .finish_non_exhaustive()
    }
}

/// One-shot synthesis with the default configuration
///
/// # Errors
/// As [`ObjectFactory::create`]
pub fn create_object(
    catalog: impl TypeCatalog + 'static,
    ty: &TypeDescriptor,
) -> Result<Value, SynthesisError> {
    ObjectFactory::builder().with_catalog(catalog).build()?.create(ty)
}
