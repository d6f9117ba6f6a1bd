//! Collection, map and optional resolvers
//!
//! Each container resolves its element, key or value types back through
//! [`Resolution::resolve`], so nesting is unbounded.

use crate::context::Resolution;
use crate::synthesizer::Synthesis;
use datagen_model::{well_known, TypeDescriptor, Value};
use indexmap::{IndexMap, IndexSet};

/// Container shape of a parameterized descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerShape<'a> {
    /// `List<T>` or `Collection<T>`
    List(&'a TypeDescriptor),
    /// `Set<T>`
    Set(&'a TypeDescriptor),
    /// `Map<K, V>`
    Map(&'a TypeDescriptor, &'a TypeDescriptor),
    /// `Optional<T>`
    Optional(&'a TypeDescriptor),
}

impl<'a> ContainerShape<'a> {
    /// Classify a descriptor; `None` for anything but a well-formed container
    #[must_use]
    pub fn of(descriptor: &'a TypeDescriptor) -> Option<Self> {
        if descriptor.is_array() {
            return None;
        }
        match (descriptor.raw().as_str(), descriptor.args()) {
            (well_known::LIST | well_known::COLLECTION, [element]) => Some(Self::List(element)),
            (well_known::SET, [element]) => Some(Self::Set(element)),
            (well_known::MAP, [key, value]) => Some(Self::Map(key, value)),
            (well_known::OPTIONAL, [inner]) => Some(Self::Optional(inner)),
            _ => None,
        }
    }

    /// Build the container
    ///
    /// # Errors
    /// Hard failures raised while resolving elements
    pub fn synthesize(self, resolution: &mut Resolution) -> Synthesis {
        match self {
            Self::List(element) => list(element, resolution),
            Self::Set(element) => set(element, resolution),
            Self::Map(key, value) => map(key, value, resolution),
            Self::Optional(inner) => optional(inner, resolution),
        }
    }
}

fn list(element: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
    let len = resolution.draw_size();
    let items = (0..len)
        .map(|_| resolution.resolve_or_null(element))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(Value::List(items)))
}

/// Duplicates collapse, so the set may hold fewer than the drawn count
fn set(element: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
    let len = resolution.draw_size();
    let items = (0..len)
        .map(|_| resolution.resolve_or_null(element))
        .collect::<Result<IndexSet<_>, _>>()?;
    Ok(Some(Value::Set(items)))
}

/// Later entries overwrite earlier ones with an equal key
fn map(key: &TypeDescriptor, value: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
    let len = resolution.draw_size();
    let mut entries = IndexMap::with_capacity(len);
    for _ in 0..len {
        let k = resolution.resolve_or_null(key)?;
        let v = resolution.resolve_or_null(value)?;
        entries.insert(k, v);
    }
    Ok(Some(Value::Map(entries)))
}

fn optional(inner: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
    Ok(resolution
        .resolve(inner)?
        .map(|value| Value::Optional(Some(Box::new(value)))))
}
