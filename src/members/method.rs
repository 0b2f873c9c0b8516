use super::{AnnotationKind, MemberSite};
use crate::errors::Result;
use crate::model::MethodNode;
use crate::registry::{annotation_remapper, RemapContext};
use crate::remapper::MixinRemapper;
use crate::targets::TargetSet;
use tracing::debug;

impl MixinRemapper<'_> {
    pub(crate) fn remap_method(
        &self,
        class: &str,
        interfaces: &[String],
        method: &mut MethodNode,
        targets: &TargetSet,
    ) -> Result<()> {
        let MethodNode {
            name,
            desc,
            annotations,
        } = method;
        let site = MemberSite {
            class,
            interfaces,
            name: name.as_str(),
            desc: desc.as_str(),
        };

        let Some((index, kind)) = self.find_main_annotation(&site, annotations)? else {
            debug!("{} has no main annotation, treating it as an overwrite", site.location());
            return self.remap_overwrite(&site, None, targets);
        };
        debug!("dispatching {} as {:?}", site.location(), kind);

        let annotation = &mut annotations[index];
        match kind {
            AnnotationKind::Shadow => self.remap_shadow(&site, annotation, targets),
            AnnotationKind::Unique => self.remap_unique(&site, annotation),
            AnnotationKind::Overwrite => self.remap_overwrite(&site, Some(annotation), targets),
            table_driven => match annotation_remapper(table_driven) {
                Some(remapper) => {
                    let ctx = RemapContext {
                        remapper: *self,
                        mixin_class: class,
                        method_name: name.as_str(),
                        method_desc: desc.as_str(),
                        targets,
                    };
                    remapper.remap(&ctx, annotation)
                }
                None => self.report_missing_feature(&format!(
                    "No remapping rules for {} on method {}",
                    annotation.desc,
                    site.location()
                )),
            },
        }
    }
}
