//! Type descriptors
//!
//! Provides [`RawType`] and [`TypeDescriptor`], the normalized request shape
//! every synthesis step works on: a raw type identity, nested type arguments
//! and an array marker.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Well-known raw type names understood by the generic resolver
pub mod well_known {
    /// Ordered collection, synthesized as a list
    pub const LIST: &str = "List";
    /// Unordered, deduplicated collection
    pub const SET: &str = "Set";
    /// Unspecified collection, synthesized as a list
    pub const COLLECTION: &str = "Collection";
    /// Key/value map
    pub const MAP: &str = "Map";
    /// Optional wrapper
    pub const OPTIONAL: &str = "Optional";
    /// Raw identity carried by array descriptors
    pub const ARRAY: &str = "[]";
}

/// Raw type identity
///
/// Cheap to clone; compared by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawType(Arc<str>);

impl RawType {
    /// Create raw type from a name
    #[inline]
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Type name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the raw identity of array descriptors
    #[inline]
    #[must_use]
    pub fn is_array_marker(&self) -> bool {
        &*self.0 == well_known::ARRAY
    }
}

impl Display for RawType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RawType {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for RawType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalized description of what to synthesize
///
/// An array descriptor always has exactly one argument, its component type,
/// and carries [`well_known::ARRAY`] as raw identity. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeDescriptor {
    raw: RawType,
    args: Vec<TypeDescriptor>,
    array: bool,
}

impl TypeDescriptor {
    /// Descriptor for a non-generic type
    #[inline]
    #[must_use]
    pub fn of(raw: impl Into<RawType>) -> Self {
        Self {
            raw: raw.into(),
            args: Vec::new(),
            array: false,
        }
    }

    /// Descriptor for a parameterized type
    #[inline]
    #[must_use]
    pub fn generic(raw: impl Into<RawType>, args: Vec<TypeDescriptor>) -> Self {
        Self {
            raw: raw.into(),
            args,
            array: false,
        }
    }

    /// Descriptor for an array of `component`
    #[inline]
    #[must_use]
    pub fn array_of(component: TypeDescriptor) -> Self {
        Self {
            raw: RawType::new(well_known::ARRAY),
            args: vec![component],
            array: true,
        }
    }

    /// `List<element>`
    #[inline]
    #[must_use]
    pub fn list_of(element: TypeDescriptor) -> Self {
        Self::generic(well_known::LIST, vec![element])
    }

    /// `Set<element>`
    #[inline]
    #[must_use]
    pub fn set_of(element: TypeDescriptor) -> Self {
        Self::generic(well_known::SET, vec![element])
    }

    /// `Map<key, value>`
    #[inline]
    #[must_use]
    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::generic(well_known::MAP, vec![key, value])
    }

    /// `Optional<inner>`
    #[inline]
    #[must_use]
    pub fn optional_of(inner: TypeDescriptor) -> Self {
        Self::generic(well_known::OPTIONAL, vec![inner])
    }

    /// Raw type identity
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &RawType {
        &self.raw
    }

    /// Type arguments (empty for non-generic types)
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    /// Check if this describes an array
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.array
    }

    /// Check if this describes a parameterized, non-array type
    #[inline]
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.array && !self.args.is_empty()
    }

    /// Component type of an array descriptor
    #[inline]
    #[must_use]
    pub fn component(&self) -> Option<&TypeDescriptor> {
        if self.array {
            self.args.first()
        } else {
            None
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(component) = self.component() {
            return write!(f, "{component}[]");
        }

        write!(f, "{}", self.raw)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { input: s, pos: 0 };
        let descriptor = parser.descriptor()?;
        parser.skip_whitespace();
        if parser.pos < s.len() {
            return Err(DescriptorParseError::TrailingInput {
                position: parser.pos,
            });
        }
        Ok(descriptor)
    }
}

impl From<RawType> for TypeDescriptor {
    fn from(raw: RawType) -> Self {
        Self::of(raw)
    }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = DescriptorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeDescriptor> for String {
    fn from(descriptor: TypeDescriptor) -> Self {
        descriptor.to_string()
    }
}

/// Recursive-descent parser for the textual descriptor form
///
/// ```text
/// descriptor := name ( '<' descriptor ( ',' descriptor )* '>' )? ( '[' ']' )*
/// ```
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn descriptor(&mut self) -> Result<TypeDescriptor, DescriptorParseError> {
        self.skip_whitespace();
        let name = self.name()?;
        let mut descriptor = TypeDescriptor::of(name);

        self.skip_whitespace();
        if self.eat('<') {
            let mut args = vec![self.descriptor()?];
            loop {
                self.skip_whitespace();
                if self.eat(',') {
                    args.push(self.descriptor()?);
                } else if self.eat('>') {
                    break;
                } else {
                    return Err(DescriptorParseError::UnclosedArguments {
                        position: self.pos,
                    });
                }
            }
            descriptor.args = args;
        }

        loop {
            self.skip_whitespace();
            if !self.eat('[') {
                break;
            }
            self.skip_whitespace();
            if !self.eat(']') {
                return Err(DescriptorParseError::UnclosedArray { position: self.pos });
            }
            descriptor = TypeDescriptor::array_of(descriptor);
        }

        Ok(descriptor)
    }

    fn name(&mut self) -> Result<&str, DescriptorParseError> {
        let start = self.pos;
        let len = self.input[start..]
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | ':')))
            .unwrap_or(self.input.len() - start);
        if len == 0 {
            return Err(DescriptorParseError::ExpectedName { position: start });
        }
        self.pos += len;
        Ok(&self.input[start..start + len])
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.input[self.pos..].starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }
}

/// Errors produced when parsing the textual descriptor form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorParseError {
    /// A type name was expected
    #[error("expected type name at position {position}")]
    ExpectedName { position: usize },

    /// Type argument list missing its closing `>`
    #[error("unclosed type arguments at position {position}")]
    UnclosedArguments { position: usize },

    /// Array marker missing its closing `]`
    #[error("unclosed array marker at position {position}")]
    UnclosedArray { position: usize },

    /// Input left over after a complete descriptor
    #[error("unexpected trailing input at position {position}")]
    TrailingInput { position: usize },
}
