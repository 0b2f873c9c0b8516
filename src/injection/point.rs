use super::constant::remap_constant_args;
use crate::errors::{RemapError, Result};
use crate::model::AnnotationValue;
use crate::remapper::MixinRemapper;
use crate::selector::DescriptorFilter;
use std::fmt;

/// Built-in `@At` injection point kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjectionPoint {
    /// Method entry.
    Head,
    /// Before a method invocation.
    Invoke,
    /// Before a field access.
    Field,
    /// Before every return.
    Return,
    /// Before the final return.
    Tail,
    /// Before a constant load.
    Constant,
}

impl InjectionPoint {
    pub const ALL: [Self; 6] = [
        Self::Head,
        Self::Invoke,
        Self::Field,
        Self::Return,
        Self::Tail,
        Self::Constant,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Invoke => "INVOKE",
            Self::Field => "FIELD",
            Self::Return => "RETURN",
            Self::Tail => "TAIL",
            Self::Constant => "CONSTANT",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Head => "org.spongepowered.asm.mixin.injection.points.MethodHead",
            Self::Invoke => "org.spongepowered.asm.mixin.injection.points.BeforeInvoke",
            Self::Field => "org.spongepowered.asm.mixin.injection.points.BeforeFieldAccess",
            Self::Return => "org.spongepowered.asm.mixin.injection.points.BeforeReturn",
            Self::Tail => "org.spongepowered.asm.mixin.injection.points.BeforeFinalReturn",
            Self::Constant => "org.spongepowered.asm.mixin.injection.points.BeforeConstant",
        }
    }

    /// Looks a kind up by short alias or fully qualified class name.
    pub fn from_name(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|point| point.short_name() == value || point.class_name() == value)
    }

    /// Whether `@At.desc` names a field for this kind.
    pub fn is_matching_fields(self) -> bool {
        matches!(self, Self::Field)
    }

    /// Validates the `@At.args` discriminator and remaps it in place.
    pub fn remap_args(
        self,
        remapper: &MixinRemapper<'_>,
        error_prefix: &str,
        args: Option<&mut AnnotationValue>,
    ) -> Result<()> {
        let args = match args {
            Some(value) => Some(value.strings_mut().ok_or_else(|| {
                RemapError::illegal(format!("{}@At.args must be an array of strings", error_prefix))
            })?),
            None => None,
        };

        match self {
            Self::Head | Self::Return | Self::Tail => match args {
                Some(args) if !args.is_empty() => Err(RemapError::illegal(format!(
                    "{}The {} @At injection point selector does not expect an args argument, but the redundant discriminator was specified. Drop the 'args' element in the @At annotation.",
                    error_prefix, self
                ))),
                _ => Ok(()),
            },
            Self::Invoke => {
                for entry in args.into_iter().flatten() {
                    if entry.contains('=') {
                        continue;
                    }
                    *entry = remapper.remap_target_selector(
                        error_prefix,
                        entry.as_str(),
                        None,
                        &DescriptorFilter::Any,
                    )?;
                }
                Ok(())
            }
            Self::Field => {
                for entry in args.into_iter().flatten() {
                    let recognized = matches!(
                        entry.split_once('='),
                        Some(("array", "get" | "set" | "length"))
                    );
                    if !recognized {
                        remapper.report_missing_feature(&format!(
                            "{}Unimplemented FIELD @At discriminator: '{}'",
                            error_prefix, entry
                        ))?;
                    }
                }
                Ok(())
            }
            Self::Constant => remap_constant_args(remapper.lookup(), error_prefix, args),
        }
    }
}

impl fmt::Display for InjectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
