//! Synthesizer trait
//!
//! Provides the [`Synthesizer`] trait shared by every capability-specific
//! construction strategy, by the chain that orders them and by the
//! decorators wrapped around it.

use crate::context::Resolution;
use crate::error::SynthesisError;
use datagen_model::{TypeDescriptor, Value};

/// Outcome of one synthesis attempt
///
/// - `Ok(Some(value))`: produced a value
/// - `Ok(None)`: declined; the next synthesizer may try
/// - `Err(_)`: hard failure; propagated to the caller untouched
pub type Synthesis = Result<Option<Value>, SynthesisError>;

/// Capability-specific construction strategy
pub trait Synthesizer: Send + Sync + std::fmt::Debug {
    /// Try to produce a value for `request`
    ///
    /// # Errors
    /// Only for conditions no other synthesizer could recover from
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis;

    /// Synthesizer name (for logging and ordering checks)
    fn name(&self) -> &'static str;
}
