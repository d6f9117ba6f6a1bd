//! Datagen Supplier
//!
//! Leaf value generators. A [`Supplier`] produces one terminal [`Value`]
//! per call and never recurses into synthesis.
//!
//! # Example
//!
//! ```rust,ignore
//! use datagen_supplier::{supplier_fn, Supplier};
//!
//! let answer = supplier_fn(|| Value::from(42));
//! assert_eq!(answer.supply(&mut rng), Value::Int(42));
//! ```

#![warn(unreachable_pub)]

mod basic;

pub use basic::{
    basic_suppliers, AlphanumericChar, AlphanumericString, IncrementalInt, Now, Random,
    DEFAULT_STRING_LENGTH,
};

use datagen_model::Value;
use rand::RngCore;
use std::fmt;
use std::sync::Arc;

/// Generator of terminal values
///
/// Implementations must be safe to call from several threads; any internal
/// state is the implementation's own responsibility.
pub trait Supplier: Send + Sync {
    /// Produce one value
    fn supply(&self, rng: &mut dyn RngCore) -> Value;
}

impl<F> Supplier for F
where
    F: Fn(&mut dyn RngCore) -> Value + Send + Sync,
{
    fn supply(&self, rng: &mut dyn RngCore) -> Value {
        self(rng)
    }
}

/// Shared supplier handle
pub type SharedSupplier = Arc<dyn Supplier>;

/// Supplier backed by a zero-argument closure
///
/// Created with [`supplier_fn`].
pub struct SupplierFn<F>(F);

impl<F> Supplier for SupplierFn<F>
where
    F: Fn() -> Value + Send + Sync,
{
    fn supply(&self, _rng: &mut dyn RngCore) -> Value {
        (self.0)()
    }
}

impl<F> fmt::Debug for SupplierFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SupplierFn")
    }
}

/// Adapt a closure that ignores the randomness source
#[inline]
#[must_use]
pub fn supplier_fn<F>(f: F) -> SupplierFn<F>
where
    F: Fn() -> Value + Send + Sync,
{
    SupplierFn(f)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn closure_with_rng_is_a_supplier() {
        let dice = |rng: &mut dyn RngCore| Value::from(rng.gen_range(1..=6_i64));
        let mut rng = StdRng::seed_from_u64(7);
        let roll = dice.supply(&mut rng).as_i64().unwrap();
        assert!((1..=6).contains(&roll));
    }

    #[test]
    fn supplier_fn_ignores_rng() {
        let answer = supplier_fn(|| Value::from(42));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(answer.supply(&mut rng), Value::Int(42));
        assert_eq!(answer.supply(&mut rng), Value::Int(42));
    }

    #[test]
    fn shared_supplier_is_object_safe() {
        let shared: SharedSupplier = Arc::new(supplier_fn(|| Value::from("x")));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(shared.supply(&mut rng), Value::from("x"));
    }
}
