//! Dynamic values produced by synthesis
//!
//! Provides [`Value`], [`Record`] and [`EnumConstant`].

use crate::descriptor::RawType;
use crate::proxy::Proxy;
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

/// A synthesized value
///
/// Equality is structural, except for [`Value::Proxy`] which compares by
/// identity. Floats compare by bit pattern so `Value` can be used as a set
/// element or map key.
#[derive(Debug, Clone)]
pub enum Value {
    /// Container slot whose element type could not be synthesized
    Null,
    /// Boolean
    Bool(bool),
    /// Character
    Char(char),
    /// Signed integer of any width
    Int(i64),
    /// Unsigned integer of any width
    UInt(u64),
    /// Floating point of any width
    Float(f64),
    /// String
    Str(String),
    /// Point in time
    Timestamp(DateTime<Utc>),
    /// Enumeration constant
    Enum(EnumConstant),
    /// Fixed-length array
    Array(Vec<Value>),
    /// Ordered collection
    List(Vec<Value>),
    /// Deduplicated collection
    Set(IndexSet<Value>),
    /// Key/value map
    Map(IndexMap<Value, Value>),
    /// Optional wrapper
    Optional(Option<Box<Value>>),
    /// Instance of a record type
    Record(Record),
    /// Capability proxy standing in for an interface or abstract type
    Proxy(Proxy),
}

impl Value {
    /// Short name of the variant, for diagnostics
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Timestamp(_) => "timestamp",
            Self::Enum(_) => "enum",
            Self::Array(_) => "array",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Optional(_) => "optional",
            Self::Record(_) => "record",
            Self::Proxy(_) => "proxy",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Signed view of an integer value
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Unsigned view of an integer value
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(u) => Some(*u),
            Self::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_enum(&self) -> Option<&EnumConstant> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Elements of an array or list
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) | Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_set(&self) -> Option<&IndexSet<Value>> {
        match self {
            Self::Set(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<Value, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Content of an optional: `Some(None)` for an empty optional
    #[inline]
    #[must_use]
    pub fn as_optional(&self) -> Option<Option<&Value>> {
        match self {
            Self::Optional(inner) => Some(inner.as_deref()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_proxy(&self) -> Option<&Proxy> {
        match self {
            Self::Proxy(p) => Some(p),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Array(a), Self::Array(b)) | (Self::List(a), Self::List(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Optional(a), Self::Optional(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Proxy(a), Self::Proxy(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Char(c) => c.hash(state),
            Self::Int(i) => i.hash(state),
            Self::UInt(u) => u.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
            Self::Timestamp(t) => t.hash(state),
            Self::Enum(e) => e.hash(state),
            Self::Array(items) | Self::List(items) => items.hash(state),
            Self::Set(items) => unordered_hash(items.iter()).hash(state),
            Self::Map(entries) => unordered_hash(entries.iter()).hash(state),
            Self::Optional(inner) => inner.hash(state),
            Self::Record(r) => r.hash(state),
            Self::Proxy(p) => p.hash(state),
        }
    }
}

/// Order-insensitive hash, consistent with `IndexSet`/`IndexMap` equality
fn unordered_hash<T: Hash>(items: impl Iterator<Item = T>) -> u64 {
    items
        .map(|item| {
            let mut hasher = DefaultHasher::new();
            item.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, u64::wrapping_add)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Char(c) => serializer.serialize_char(*c),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::UInt(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Timestamp(t) => t.serialize(serializer),
            Self::Enum(e) => serializer.serialize_str(e.name()),
            Self::Array(items) | Self::List(items) => items.serialize(serializer),
            Self::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            // Keys may be composite, so entries are written as [key, value] pairs
            Self::Map(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for entry in entries {
                    seq.serialize_element(&entry)?;
                }
                seq.end()
            }
            Self::Optional(inner) => match inner {
                Some(value) => serializer.serialize_some(value.as_ref()),
                None => serializer.serialize_none(),
            },
            Self::Record(r) => r.serialize(serializer),
            Self::Proxy(p) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$proxy", p.target().as_str())?;
                map.end()
            }
        }
    }
}

macro_rules! value_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )+
    };
}

value_from!(Int: i8, i16, i32, i64);
value_from!(UInt: u8, u16, u32, u64);
value_from!(Float: f32, f64);
value_from!(Str: String, &str);
value_from!(Bool: bool);
value_from!(Char: char);
value_from!(Timestamp: DateTime<Utc>);
value_from!(Enum: EnumConstant);
value_from!(Record: Record);
value_from!(Proxy: Proxy);
value_from!(List: Vec<Value>);

/// A constant of an enumeration type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    ty: RawType,
    name: Arc<str>,
}

impl EnumConstant {
    /// Create constant `name` of enumeration `ty`
    #[inline]
    #[must_use]
    pub fn new(ty: RawType, name: impl AsRef<str>) -> Self {
        Self {
            ty,
            name: Arc::from(name.as_ref()),
        }
    }

    /// Enumeration type
    #[inline]
    #[must_use]
    pub fn ty(&self) -> &RawType {
        &self.ty
    }

    /// Constant name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Owned instance of a record type
///
/// Fields are kept in assignment order. Two records are equal when they have
/// the same type and the same field values, regardless of order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    ty: RawType,
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create an instance of `ty` with no fields set
    #[inline]
    #[must_use]
    pub fn new(ty: RawType) -> Self {
        Self {
            ty,
            fields: IndexMap::new(),
        }
    }

    /// Record type
    #[inline]
    #[must_use]
    pub fn ty(&self) -> &RawType {
        &self.ty
    }

    /// Field value by name
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Assign a field, returning the previous value
    #[inline]
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    /// Builder-style field assignment
    #[inline]
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// All fields in assignment order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        unordered_hash(self.fields.iter()).hash(state);
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
