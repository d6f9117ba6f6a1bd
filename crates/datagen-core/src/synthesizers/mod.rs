//! Capability-specific synthesizers, one per type category

mod array;
mod enumeration;
mod implementation;
mod leaf;
mod proxy;
mod record;

pub use array::ArraySynthesizer;
pub use enumeration::EnumSynthesizer;
pub use implementation::ImplementationSynthesizer;
pub use leaf::LeafSynthesizer;
pub use proxy::ProxySynthesizer;
pub use record::{RecordSynthesizer, SETTER_PREFIX};
