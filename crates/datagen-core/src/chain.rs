//! Ordered synthesis chain
//!
//! Tries each synthesizer in a fixed priority order and returns the first
//! value produced.

use crate::context::Resolution;
use crate::synthesizer::{Synthesis, Synthesizer};
use crate::synthesizers::{
    ArraySynthesizer, EnumSynthesizer, ImplementationSynthesizer, LeafSynthesizer,
    ProxySynthesizer, RecordSynthesizer,
};
use datagen_model::TypeDescriptor;

/// Ordered list of capability synthesizers
///
/// # Order
/// Leaf → Array → Enum → Record → Implementation lookup → Proxy.
/// Leaf comes first so a registered supplier always wins; Enum precedes
/// Record and Proxy since an enumeration has no usable constructor either.
#[derive(Debug)]
pub struct SynthesisChain {
    synthesizers: Vec<Box<dyn Synthesizer>>,
}

impl SynthesisChain {
    /// Create chain with the standard synthesizers
    #[must_use]
    pub fn standard() -> Self {
        Self {
            synthesizers: vec![
                Box::new(LeafSynthesizer),
                Box::new(ArraySynthesizer),
                Box::new(EnumSynthesizer),
                Box::new(RecordSynthesizer),
                Box::new(ImplementationSynthesizer),
                Box::new(ProxySynthesizer),
            ],
        }
    }

    /// Synthesizer names, in order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.synthesizers.iter().map(|s| s.name()).collect()
    }

    /// Number of synthesizers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.synthesizers.len()
    }

    /// Check if the chain has no synthesizers
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.synthesizers.is_empty()
    }
}

impl Default for SynthesisChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl Synthesizer for SynthesisChain {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        for synthesizer in &self.synthesizers {
            if let Some(value) = synthesizer.try_create(request, resolution)? {
                tracing::trace!("{} produced {}", synthesizer.name(), request);
                return Ok(Some(value));
            }
        }

        tracing::trace!("No synthesizer produced {}", request);
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_order() {
        let chain = SynthesisChain::standard();
        assert_eq!(
            chain.names(),
            vec!["leaf", "array", "enum", "record", "implementation", "proxy"]
        );
        assert_eq!(chain.len(), 6);
    }
}
