//! Datagen Core
//!
//! Type-driven synthesis of populated test fixtures.
//!
//! # Core Concepts
//!
//! - [`ObjectFactory`]: Entry point; `create`, `list_of`, `set_of`, `map_of`
//! - [`SynthesisChain`]: Ordered capability synthesizers, first value wins
//! - [`TypeResolver`]: Generic dispatch into List/Set/Map/Optional containers
//! - [`LeafRegistry`]: Caller suppliers by raw type and by accessor name
//! - [`Resolution`]: Per-call context carrying the cycle guard and random source
//! - [`NonNull`]: Strict decorator turning "no value" into an error
//!
//! # Example
//!
//! ```rust,ignore
//! use datagen_core::ObjectFactory;
//! use datagen_model::{TypeDescriptor, Value};
//!
//! let factory = ObjectFactory::builder()
//!     .with_catalog(catalog)
//!     .with_supplier_fn("i32", || Value::from(42))
//!     .with_seed(7)
//!     .build()?;
//!
//! let answers = factory.list_of_n(&TypeDescriptor::of("i32"), 3)?;
//! assert_eq!(answers, vec![Value::Int(42); 3]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod chain;
mod config;
mod containers;
mod context;
mod error;
mod factory;
mod registry;
mod resolver;
mod strict;
mod synthesizer;
mod synthesizers;

// Re-exports
pub use chain::SynthesisChain;
pub use config::{FactoryConfig, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE};
pub use containers::ContainerShape;
pub use context::{InProgress, Resolution};
pub use error::{ConfigError, SynthesisError};
pub use factory::{create_object, ObjectFactory, ObjectFactoryBuilder};
pub use registry::{LeafRegistry, SizePolicy};
pub use resolver::TypeResolver;
pub use strict::NonNull;
pub use synthesizer::{Synthesis, Synthesizer};
pub use synthesizers::{
    ArraySynthesizer, EnumSynthesizer, ImplementationSynthesizer, LeafSynthesizer,
    ProxySynthesizer, RecordSynthesizer, SETTER_PREFIX,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
