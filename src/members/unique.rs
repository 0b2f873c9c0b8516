use super::MemberSite;
use crate::errors::Result;
use crate::model::AnnotationNode;
use crate::remapper::MixinRemapper;

impl MixinRemapper<'_> {
    /// `@Unique` members exist only in the mixin: nothing is looked up and
    /// nothing is renamed.
    pub(crate) fn remap_unique(&self, site: &MemberSite<'_>, annotation: &AnnotationNode) -> Result<()> {
        for name in annotation.element_names() {
            if name != "silent" {
                self.report_missing_feature(&format!(
                    "Unimplemented key in @Unique: {} within {}",
                    name,
                    site.location()
                ))?;
            }
        }
        Ok(())
    }
}
