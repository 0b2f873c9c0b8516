use crate::constants::SLICE;
use crate::errors::{RemapError, Result};
use crate::model::{AnnotationNode, AnnotationValue};
use crate::remapper::MixinRemapper;
use crate::targets::TargetSet;

impl MixinRemapper<'_> {
    /// Remaps a `@Slice` of the handler `owner.member`.
    ///
    /// `from` and `to` are `@At` boundaries; `id` holds no names.
    pub fn remap_slice(
        &self,
        owner: &str,
        member: &str,
        ordinal: Option<usize>,
        targets: &TargetSet,
        slice: &mut AnnotationNode,
    ) -> Result<()> {
        let tag = match ordinal {
            Some(ordinal) => format!("slice[{}]", ordinal),
            None => "slice".to_owned(),
        };
        let error_prefix = format!(
            "An unexpected error occurred while remapping @Slice annotation in {}.{} {}: ",
            owner, member, tag
        );
        if slice.desc != SLICE {
            return Err(RemapError::illegal(format!(
                "{}Expected a @Slice annotation, found {}",
                error_prefix, slice.desc
            )));
        }

        for (name, value) in slice.values.iter_mut() {
            match name.as_str() {
                "id" => {}
                "from" | "to" => {
                    let AnnotationValue::Annotation(at) = value else {
                        return Err(RemapError::illegal(format!(
                            "{}@Slice.{} must be an @At annotation",
                            error_prefix, name
                        )));
                    };
                    let location = format!("{}.{} {}.{}", owner, member, tag, name);
                    self.remap_at_in(&location, targets, at)?;
                }
                other => self.report_missing_feature(&format!(
                    "{}Unimplemented key in @Slice: {}",
                    error_prefix, other
                ))?,
            }
        }
        Ok(())
    }
}
