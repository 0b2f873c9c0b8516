use super::MemberSite;
use crate::errors::Result;
use crate::model::AnnotationNode;
use crate::remapper::MixinRemapper;
use crate::targets::TargetSet;
use tracing::debug;

impl MixinRemapper<'_> {
    /// Explicit `@Overwrite`, or the implicit overwrite of a method without
    /// a main annotation when `annotation` is `None`.
    pub(crate) fn remap_overwrite(
        &self,
        site: &MemberSite<'_>,
        annotation: Option<&mut AnnotationNode>,
        targets: &TargetSet,
    ) -> Result<()> {
        let label = if annotation.is_some() {
            "@Overwrite"
        } else {
            "(implicitly) @Overwrite"
        };

        if let Some(annotation) = annotation {
            for (name, value) in annotation.values.iter_mut() {
                match name.as_str() {
                    "aliases" => self.remap_aliases(site, label, value, targets)?,
                    "constraints" => {}
                    other => self.report_missing_feature(&format!(
                        "Unimplemented key in @Overwrite: {} within {}",
                        other,
                        site.location()
                    ))?,
                }
            }
        }

        let Some(remapped) = self.resolve_name_across(site, label, site.name, targets, false)? else {
            return Ok(());
        };
        if remapped != site.name {
            self.guard_interfaces(site, label, targets)?;
            debug!("{} {} -> {}", label, site.location(), remapped);
            self.sink().remap_member(site.member_ref(), &remapped);
        }
        Ok(())
    }
}
