use crate::constants::AT;
use crate::errors::{RemapError, Result};
use crate::model::{AnnotationNode, AnnotationValue};
use crate::remapper::MixinRemapper;
use crate::selector::DescriptorFilter;
use crate::targets::TargetSet;

/// `@At` elements that hold no names.
const PASS_THROUGH: &[&str] = &[
    "id", "slice", "shift", "by", "ordinal", "opcode", "remap", "unsafe",
];

/// Diagnostic location of an `@At` inside a handler, `[n]` when it is part
/// of an array.
fn at_location(owner: &str, member: &str, ordinal: Option<usize>) -> String {
    match ordinal {
        Some(ordinal) => format!("{}.{}[{}]", owner, member, ordinal),
        None => format!("{}.{}", owner, member),
    }
}

impl MixinRemapper<'_> {
    /// Remaps an `@At` annotation of the handler `owner.member`.
    pub fn remap_at(
        &self,
        owner: &str,
        member: &str,
        ordinal: Option<usize>,
        targets: &TargetSet,
        at: &mut AnnotationNode,
    ) -> Result<()> {
        self.remap_at_in(&at_location(owner, member, ordinal), targets, at)
    }

    pub(crate) fn remap_at_in(
        &self,
        location: &str,
        targets: &TargetSet,
        at: &mut AnnotationNode,
    ) -> Result<()> {
        let error_prefix = format!(
            "An unexpected error occurred while remapping @At annotation in {}: ",
            location
        );
        if at.desc != AT {
            return Err(RemapError::illegal(format!(
                "{}Expected an @At annotation, found {}",
                error_prefix, at.desc
            )));
        }

        for name in at.element_names() {
            if !matches!(name, "value" | "args" | "target" | "desc") && !PASS_THROUGH.contains(&name) {
                self.report_missing_feature(&format!(
                    "{}Unimplemented key in @At: {}",
                    error_prefix, name
                ))?;
            }
        }

        let value = match at.get("value") {
            Some(AnnotationValue::String(value)) => value.clone(),
            Some(other) => {
                return Err(RemapError::illegal(format!(
                    "{}@At.value must be a string, found a {} value",
                    error_prefix,
                    other.kind()
                )))
            }
            None => {
                return Err(RemapError::illegal(format!(
                    "{}The annotation is missing the required element 'value'. This error is usually caused by improperly written ASM transformers generating the mixin improperly.",
                    error_prefix
                )))
            }
        };

        let point = self.policy().lookup_injection_point(&value);
        match point {
            Some(point) => point.remap_args(self, &error_prefix, at.get_mut("args"))?,
            None => self.report_missing_feature(&format!(
                "{}Unknown @At injection point selector value: {}",
                error_prefix, value
            ))?,
        }

        if let Some(target) = at.get_mut("target") {
            let prefix = format!(
                "An unexpected error occurred while remapping @At.target in {}: ",
                location
            );
            let AnnotationValue::String(text) = target else {
                return Err(RemapError::illegal(format!(
                    "{}@At.target must be a string",
                    prefix
                )));
            };
            *text = self.remap_target_selector(&prefix, text.as_str(), None, &DescriptorFilter::Any)?;
        }

        if let Some(desc) = at.get_mut("desc") {
            let prefix = format!(
                "An unexpected error occurred while remapping @At.desc in {}: ",
                location
            );
            let AnnotationValue::Annotation(desc) = desc else {
                return Err(RemapError::illegal(format!(
                    "{}@At.desc must be a @Desc annotation",
                    prefix
                )));
            };
            let match_field = point.is_some_and(|point| point.is_matching_fields());
            self.remap_desc_annotation(&prefix, targets, desc, match_field)?;
        }
        Ok(())
    }
}
