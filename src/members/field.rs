use super::{AnnotationKind, MemberSite};
use crate::errors::Result;
use crate::model::FieldNode;
use crate::remapper::MixinRemapper;
use crate::targets::TargetSet;
use tracing::debug;

impl MixinRemapper<'_> {
    /// Fields have no implicit rule: without `@Shadow` or `@Unique` they
    /// are left alone.
    pub(crate) fn remap_field(&self, class: &str, field: &mut FieldNode, targets: &TargetSet) -> Result<()> {
        let FieldNode {
            name,
            desc,
            annotations,
        } = field;
        let site = MemberSite {
            class,
            interfaces: &[],
            name: name.as_str(),
            desc: desc.as_str(),
        };

        let Some((index, kind)) = self.find_main_annotation(&site, annotations)? else {
            return Ok(());
        };
        debug!("dispatching {} as {:?}", site.location(), kind);

        match kind {
            AnnotationKind::Shadow => self.remap_shadow(&site, &mut annotations[index], targets),
            AnnotationKind::Unique => self.remap_unique(&site, &annotations[index]),
            _ => Ok(()),
        }
    }
}
