use crate::context::Resolution;
use crate::synthesizer::{Synthesis, Synthesizer};
use datagen_model::{EnumConstant, TypeDescriptor, Value};
use rand::seq::SliceRandom;

/// Picks a declared constant uniformly at random
///
/// An enumeration without constants declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumSynthesizer;

impl Synthesizer for EnumSynthesizer {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        let Some(def) = resolution.lookup(request.raw()) else {
            return Ok(None);
        };
        let Some(constants) = def.enum_constants() else {
            return Ok(None);
        };

        match constants.choose(resolution.rng()) {
            Some(name) => Ok(Some(Value::Enum(EnumConstant::new(def.name().clone(), name)))),
            None => {
                tracing::trace!("Enum {} declares no constants", def.name());
                Ok(None)
            }
        }
    }

    fn name(&self) -> &'static str {
        "enum"
    }
}
