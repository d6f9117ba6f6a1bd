use crate::context::Resolution;
use crate::synthesizer::{Synthesis, Synthesizer};
use datagen_model::{TypeDescriptor, Value};

/// Fills arrays of any component type
///
/// Never declines an array request; the drawn length may be zero and
/// unresolvable slots hold [`Value::Null`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArraySynthesizer;

impl Synthesizer for ArraySynthesizer {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        let Some(component) = request.component() else {
            return Ok(None);
        };

        let len = resolution.draw_size();
        let items = (0..len)
            .map(|_| resolution.resolve_or_null(component))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Value::Array(items)))
    }

    fn name(&self) -> &'static str {
        "array"
    }
}
