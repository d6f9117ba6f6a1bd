use crate::context::Resolution;
use crate::synthesizer::{Synthesis, Synthesizer};
use datagen_model::TypeDescriptor;

/// Produces values from the leaf registry
///
/// Matches on the raw type alone, so a registration covers every
/// parameterization of that raw type.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafSynthesizer;

impl Synthesizer for LeafSynthesizer {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        let Some(supplier) = resolution.registry().supplier(request.raw()).cloned() else {
            return Ok(None);
        };
        Ok(Some(resolution.supply(supplier.as_ref())))
    }

    fn name(&self) -> &'static str {
        "leaf"
    }
}
