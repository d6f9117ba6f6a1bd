//! Strict decorator

use crate::context::Resolution;
use crate::error::SynthesisError;
use crate::synthesizer::{Synthesis, Synthesizer};
use datagen_model::{TypeDescriptor, Value};

/// Turns "no value" into [`SynthesisError::Unsupported`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NonNull<S> {
    inner: S,
}

impl<S> NonNull<S> {
    /// Wrap `inner`
    #[inline]
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: Synthesizer> NonNull<S> {
    /// Value for `request`, or [`SynthesisError::Unsupported`]
    ///
    /// # Errors
    /// Unsupported when `inner` declines, or any hard failure it raises
    pub fn create(
        &self,
        request: &TypeDescriptor,
        resolution: &mut Resolution,
    ) -> Result<Value, SynthesisError> {
        self.inner.try_create(request, resolution)?.ok_or_else(|| {
            tracing::debug!("Unsupported type: {}", request);
            SynthesisError::unsupported(request)
        })
    }
}

impl<S: Synthesizer> Synthesizer for NonNull<S> {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        self.create(request, resolution).map(Some)
    }

    fn name(&self) -> &'static str {
        "non_null"
    }
}
