//! Default leaf generators

use crate::{SharedSupplier, Supplier};
use chrono::Utc;
use datagen_model::{RawType, Value};
use rand::distributions::{Alphanumeric, Distribution, Standard};
use rand::{Rng, RngCore};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Default length of generated strings
pub const DEFAULT_STRING_LENGTH: usize = 50;

/// Uniform random value of `T` from the standard distribution
///
/// Floats are drawn from `[0, 1)`.
pub struct Random<T>(PhantomData<fn() -> T>);

impl<T> Random<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Random<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Random<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Random<{}>", std::any::type_name::<T>())
    }
}

impl<T> Supplier for Random<T>
where
    Standard: Distribution<T>,
    T: Into<Value>,
{
    fn supply(&self, rng: &mut dyn RngCore) -> Value {
        rng.gen::<T>().into()
    }
}

/// Single random alphanumeric character
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphanumericChar;

impl Supplier for AlphanumericChar {
    fn supply(&self, rng: &mut dyn RngCore) -> Value {
        Value::Char(char::from(rng.sample(Alphanumeric)))
    }
}

/// Random alphanumeric string of fixed length
#[derive(Debug, Clone, Copy)]
pub struct AlphanumericString {
    length: usize,
}

impl AlphanumericString {
    #[inline]
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for AlphanumericString {
    fn default() -> Self {
        Self::new(DEFAULT_STRING_LENGTH)
    }
}

impl Supplier for AlphanumericString {
    fn supply(&self, rng: &mut dyn RngCore) -> Value {
        let s: String = (0..self.length)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        Value::Str(s)
    }
}

/// Current UTC time
#[derive(Debug, Default, Clone, Copy)]
pub struct Now;

impl Supplier for Now {
    fn supply(&self, _rng: &mut dyn RngCore) -> Value {
        Value::Timestamp(Utc::now())
    }
}

/// Integer sequence starting at a given value
///
/// Each call yields the next integer; safe to share between threads.
#[derive(Debug)]
pub struct IncrementalInt {
    next: AtomicI64,
}

impl IncrementalInt {
    #[inline]
    #[must_use]
    pub fn starting_at(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }
}

impl Default for IncrementalInt {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl Supplier for IncrementalInt {
    fn supply(&self, _rng: &mut dyn RngCore) -> Value {
        Value::Int(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Default raw-name → supplier table
///
/// Covers `bool`, `char`, the fixed-width integers, `f32`, `f64`, `String`
/// (alphanumeric of `string_length`) and `DateTime` (current time).
/// `BigInteger` and `BigDecimal` draw like `i64` and `f64`.
#[must_use]
pub fn basic_suppliers(string_length: usize) -> Vec<(RawType, SharedSupplier)> {
    vec![
        (RawType::new("bool"), shared(Random::<bool>::new())),
        (RawType::new("char"), shared(AlphanumericChar)),
        (RawType::new("i8"), shared(Random::<i8>::new())),
        (RawType::new("i16"), shared(Random::<i16>::new())),
        (RawType::new("i32"), shared(Random::<i32>::new())),
        (RawType::new("i64"), shared(Random::<i64>::new())),
        (RawType::new("u8"), shared(Random::<u8>::new())),
        (RawType::new("u16"), shared(Random::<u16>::new())),
        (RawType::new("u32"), shared(Random::<u32>::new())),
        (RawType::new("u64"), shared(Random::<u64>::new())),
        (RawType::new("f32"), shared(Random::<f32>::new())),
        (RawType::new("f64"), shared(Random::<f64>::new())),
        (
            RawType::new("String"),
            shared(AlphanumericString::new(string_length)),
        ),
        (RawType::new("DateTime"), shared(Now)),
        (RawType::new("BigInteger"), shared(Random::<i64>::new())),
        (RawType::new("BigDecimal"), shared(Random::<f64>::new())),
    ]
}

fn shared(supplier: impl Supplier + 'static) -> SharedSupplier {
    Arc::new(supplier)
}
