use crate::context::Resolution;
use crate::synthesizer::{Synthesis, Synthesizer};
use datagen_model::{Record, TypeDef, TypeDescriptor, TypeKind, Value};

/// Name prefix of the mutators called after construction
pub const SETTER_PREFIX: &str = "set";

/// Constructs concretely constructible types
///
/// # Steps
/// 1. Pick the constructor with the fewest parameters (first on a tie)
/// 2. Resolve every parameter; an unresolvable one makes the type decline
/// 3. Invoke the constructor; a failing body makes the type decline
/// 4. Call every single-parameter `set*` method, declared or inherited,
///    skipping unresolvable arguments and ignoring failing bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSynthesizer;

impl RecordSynthesizer {
    fn construct(def: &TypeDef, resolution: &mut Resolution) -> Synthesis {
        let Some(constructor) = def.minimal_constructor() else {
            tracing::trace!("{} declares no constructor", def.name());
            return Ok(None);
        };

        let mut args = Vec::with_capacity(constructor.arity());
        for param in constructor.params() {
            match resolution.resolve(param.ty())? {
                Some(value) => args.push(value),
                None => {
                    tracing::trace!(
                        "Cannot resolve parameter {} ({}) of {}",
                        param.name(),
                        param.ty(),
                        def.name()
                    );
                    return Ok(None);
                }
            }
        }

        match constructor.invoke(def.name(), args) {
            Ok(mut record) => {
                Self::populate(def, &mut record, resolution)?;
                Ok(Some(Value::Record(record)))
            }
            Err(e) => {
                tracing::debug!("Constructor of {} failed: {}", def.name(), e);
                Ok(None)
            }
        }
    }

    fn populate(
        def: &TypeDef,
        record: &mut Record,
        resolution: &mut Resolution,
    ) -> Result<(), crate::SynthesisError> {
        let setters = resolution
            .catalog()
            .methods_of(def)
            .into_iter()
            .filter(|m| m.name().starts_with(SETTER_PREFIX) && m.params().len() == 1);
        for setter in setters {
            let Some(arg) = resolution.resolve(&setter.params()[0])? else {
                tracing::trace!("Skipping {}.{}: argument unresolvable", def.name(), setter.name());
                continue;
            };
            if let Err(e) = setter.invoke(record, vec![arg]) {
                tracing::debug!("Setter {}.{} failed: {}", def.name(), setter.name(), e);
            }
        }
        Ok(())
    }
}

impl Synthesizer for RecordSynthesizer {
    fn try_create(&self, request: &TypeDescriptor, resolution: &mut Resolution) -> Synthesis {
        match resolution.lookup(request.raw()) {
            Some(def) if matches!(def.kind(), TypeKind::Record) => Self::construct(&def, resolution),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &'static str {
        "record"
    }
}
