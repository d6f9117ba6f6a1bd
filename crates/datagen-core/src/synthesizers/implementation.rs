use crate::context::Resolution;
use crate::synthesizer::{Synthesis, Synthesizer};
use datagen_model::{TypeDef, TypeDescriptor};

/// Builds an interface through one of its concrete subtypes
///
/// Candidates are the non-deprecated subtypes declared within the
/// interface's scope, public ones first, otherwise in discovery order.
/// The interface stays in the cycle guard while candidates are tried; a
/// request for it in the meantime declines here and falls through to the
/// proxy synthesizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplementationSynthesizer;

impl ImplementationSynthesizer {
    fn first_candidate(def: &TypeDef, resolution: &mut Resolution) -> Synthesis {
        let mut candidates: Vec<_> = resolution
            .catalog()
            .subtypes_of(def.name())
            .into_iter()
            .filter(|c| !c.is_deprecated())
            .collect();
        candidates.sort_by_key(|c| !c.is_public());

        for candidate in candidates {
            let request = TypeDescriptor::of(candidate.name().clone());
            if let Some(value) = resolution.create(&request)? {
                tracing::trace!("{} implemented by {}", def.name(), candidate.name());
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

impl Synthesizer for ImplementationSynthesizer {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        let raw = request.raw();
        let Some(def) = resolution.lookup(raw) else {
            return Ok(None);
        };
        if !def.is_interface() {
            return Ok(None);
        }
        if !resolution.in_progress().enter(raw) {
            tracing::trace!("{} already in progress", raw);
            return Ok(None);
        }

        let outcome = Self::first_candidate(&def, resolution);
        resolution.in_progress().exit(raw);
        outcome
    }

    fn name(&self) -> &'static str {
        "implementation"
    }
}
