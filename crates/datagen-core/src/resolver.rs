//! Generic dispatch
//!
//! Decides whether a descriptor is a plain request for the synthesis chain
//! or a container whose parts are resolved recursively.

use crate::containers::ContainerShape;
use crate::context::Resolution;
use crate::synthesizer::{Synthesis, Synthesizer};
use datagen_model::TypeDescriptor;

/// Entry point for any descriptor, parameterized or not
///
/// - Arrays and non-generic descriptors go to the synthesis chain
/// - Generic descriptors with a registered leaf supplier go to the chain
/// - List, Collection, Set, Map and Optional go to the container resolvers
/// - Any other generic shape declines
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeResolver;

impl Synthesizer for TypeResolver {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        if !request.is_generic() || resolution.registry().contains(request.raw()) {
            return resolution.create(request);
        }

        match ContainerShape::of(request) {
            Some(shape) => shape.synthesize(resolution),
            None => {
                tracing::trace!("Unknown generic shape {}", request);
                Ok(None)
            }
        }
    }

    fn name(&self) -> &'static str {
        "resolver"
    }
}
