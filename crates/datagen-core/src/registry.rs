//! Leaf registry and size policy
//!
//! Provides [`LeafRegistry`], the caller-supplied table of terminal
//! generators consulted before any structural synthesis, and
//! [`SizePolicy`], which picks container lengths.

use crate::config::{DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE};
use crate::error::SynthesisError;
use datagen_model::RawType;
use datagen_supplier::{basic_suppliers, SharedSupplier, Supplier};
use rand::{Rng, RngCore};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type SizeFn = Arc<dyn Fn(&mut dyn RngCore) -> usize + Send + Sync>;

#[derive(Clone)]
enum Policy {
    Range { min: usize, max: usize },
    Fixed(usize),
    Custom(SizeFn),
}

/// Picks the length of arrays, collections and maps
///
/// Defaults to `1..11` (min inclusive, max exclusive).
#[derive(Clone)]
pub struct SizePolicy(Policy);

impl SizePolicy {
    /// Uniform length in `min..max`
    ///
    /// # Errors
    /// `min >= max` is a precondition violation
    pub fn range(min: usize, max: usize) -> Result<Self, SynthesisError> {
        if min >= max {
            return Err(SynthesisError::precondition(format!(
                "min ({min}) must be less than max ({max})"
            )));
        }
        Ok(Self(Policy::Range { min, max }))
    }

    /// Always `n`
    #[inline]
    #[must_use]
    pub fn fixed(n: usize) -> Self {
        Self(Policy::Fixed(n))
    }

    /// Caller-defined length source
    #[must_use]
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> usize + Send + Sync + 'static,
    {
        Self(Policy::Custom(Arc::new(f)))
    }

    /// Draw one length
    pub fn draw(&self, rng: &mut dyn RngCore) -> usize {
        match &self.0 {
            Policy::Range { min, max } => rng.gen_range(*min..*max),
            Policy::Fixed(n) => *n,
            Policy::Custom(f) => f(rng),
        }
    }
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self(Policy::Range {
            min: DEFAULT_MIN_SIZE,
            max: DEFAULT_MAX_SIZE,
        })
    }
}

impl fmt::Debug for SizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Policy::Range { min, max } => write!(f, "SizePolicy({min}..{max})"),
            Policy::Fixed(n) => write!(f, "SizePolicy({n})"),
            Policy::Custom(_) => f.write_str("SizePolicy(custom)"),
        }
    }
}

/// Terminal generators by raw type and by accessor name
///
/// A registered raw type is authoritative: no structural synthesis is ever
/// attempted for it. Accessor suppliers are consulted only by proxies.
/// Registering the same key again replaces the earlier supplier.
#[derive(Clone, Default)]
pub struct LeafRegistry {
    suppliers: HashMap<RawType, SharedSupplier>,
    accessors: HashMap<String, SharedSupplier>,
    size_policy: SizePolicy,
}

impl LeafRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with the basic suppliers
    #[must_use]
    pub fn with_basic_suppliers(string_length: usize) -> Self {
        let mut registry = Self::new();
        for (raw, supplier) in basic_suppliers(string_length) {
            registry.register_shared(raw, supplier);
        }
        registry
    }

    /// Register a supplier for a raw type
    pub fn register(&mut self, raw: impl Into<RawType>, supplier: impl Supplier + 'static) {
        self.register_shared(raw, Arc::new(supplier));
    }

    /// Register an already shared supplier for a raw type
    pub fn register_shared(&mut self, raw: impl Into<RawType>, supplier: SharedSupplier) {
        self.suppliers.insert(raw.into(), supplier);
    }

    /// Register a supplier for a named accessor
    pub fn register_accessor(&mut self, name: impl Into<String>, supplier: impl Supplier + 'static) {
        self.register_accessor_shared(name, Arc::new(supplier));
    }

    /// Register an already shared supplier for a named accessor
    pub fn register_accessor_shared(&mut self, name: impl Into<String>, supplier: SharedSupplier) {
        self.accessors.insert(name.into(), supplier);
    }

    /// Replace the size policy
    #[inline]
    pub fn set_size_policy(&mut self, policy: SizePolicy) {
        self.size_policy = policy;
    }

    /// Supplier registered for a raw type
    #[inline]
    #[must_use]
    pub fn supplier(&self, raw: &RawType) -> Option<&SharedSupplier> {
        self.suppliers.get(raw)
    }

    /// Supplier registered for an accessor name
    #[inline]
    #[must_use]
    pub fn accessor(&self, name: &str) -> Option<&SharedSupplier> {
        self.accessors.get(name)
    }

    /// Check if a raw type is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, raw: &RawType) -> bool {
        self.suppliers.contains_key(raw)
    }

    /// Container length policy
    #[inline]
    #[must_use]
    pub fn size_policy(&self) -> &SizePolicy {
        &self.size_policy
    }

    /// Registered raw type names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.suppliers.keys().map(RawType::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get number of registered raw types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    /// Check if no raw type is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }
}

impl fmt::Debug for LeafRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut accessors: Vec<&str> = self.accessors.keys().map(String::as_str).collect();
        accessors.sort_unstable();
        f.debug_struct("LeafRegistry")
            .field("suppliers", &self.names())
            .field("accessors", &accessors)
            .field("size_policy", &self.size_policy)
            .finish()
    }
}
