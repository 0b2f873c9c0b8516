//! Mixin class driver.
//!
//! [`MixinRemapper`] bundles the host collaborators with a diagnostics
//! policy. It is `Copy`: every resolver borrows the same collaborators and
//! nothing is retained once [`MixinRemapper::remap_class`] returns.

use crate::constants::{MIXIN, MIXIN_NAMESPACE};
use crate::errors::{RemapError, Result};
use crate::mapping::{MappingLookup, MappingSink, MemberLister};
use crate::model::{AnnotationNode, AnnotationValue, ClassNode, TypeRef};
use crate::policy::{FailFast, RemapPolicy};
use crate::targets::TargetSet;
use tracing::{debug, info_span};

static FAIL_FAST: FailFast = FailFast;

#[derive(Clone, Copy)]
pub struct MixinRemapper<'a> {
    lookup: &'a dyn MappingLookup,
    sink: &'a dyn MappingSink,
    lister: &'a dyn MemberLister,
    policy: &'a dyn RemapPolicy,
}

impl<'a> MixinRemapper<'a> {
    /// Remapper that fails on every missing feature.
    pub fn new(
        lookup: &'a dyn MappingLookup,
        sink: &'a dyn MappingSink,
        lister: &'a dyn MemberLister,
    ) -> Self {
        Self {
            lookup,
            sink,
            lister,
            policy: &FAIL_FAST,
        }
    }

    pub fn with_policy(mut self, policy: &'a dyn RemapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn lookup(&self) -> &'a dyn MappingLookup {
        self.lookup
    }

    pub fn sink(&self) -> &'a dyn MappingSink {
        self.sink
    }

    pub fn lister(&self) -> &'a dyn MemberLister {
        self.lister
    }

    pub fn policy(&self) -> &'a dyn RemapPolicy {
        self.policy
    }

    /// Routes a missing feature through the diagnostics policy.
    pub fn report_missing_feature(&self, description: &str) -> Result<()> {
        self.policy.log_unimplemented_feature(description)
    }

    /// Remaps the annotation metadata of one class in place and pushes the
    /// decided member renames to the sink.
    ///
    /// Classes without an `@Mixin` declaration are left untouched. Must run
    /// before the host applies the recorded renames to the class itself.
    pub fn remap_class(&self, node: &mut ClassNode) -> Result<()> {
        let span = info_span!("remap_class", class = %node.name);
        let _enter = span.enter();

        let Some(targets) = self.collect_targets(node)? else {
            debug!("{} is not a mixin, skipping", node.name);
            return Ok(());
        };
        if targets.is_empty() {
            debug!("{} declares no targets", node.name);
        } else {
            debug!(
                "{} targets {} classes: {}",
                node.name,
                targets.len(),
                targets.iter().collect::<Vec<_>>().join(", ")
            );
        }

        let ClassNode {
            name,
            interfaces,
            methods,
            fields,
            ..
        } = node;
        for method in methods.iter_mut() {
            self.remap_method(name, interfaces, method, &targets)?;
        }
        for field in fields.iter_mut() {
            self.remap_field(name, field, &targets)?;
        }
        Ok(())
    }

    fn collect_targets(&self, node: &mut ClassNode) -> Result<Option<TargetSet>> {
        let mut targets = TargetSet::new();
        let mut mixin_class = false;

        for annotation in node.annotations.iter_mut() {
            if !annotation.desc.starts_with(MIXIN_NAMESPACE) {
                continue;
            }
            if annotation.desc != MIXIN {
                self.report_missing_feature(&format!(
                    "Unknown annotation at class level for node {}: {}",
                    node.name, annotation.desc
                ))?;
                continue;
            }
            mixin_class = true;
            self.remap_mixin_declaration(&node.name, annotation, &mut targets)?;
        }

        Ok(mixin_class.then_some(targets))
    }

    fn remap_mixin_declaration(
        &self,
        class: &str,
        annotation: &mut AnnotationNode,
        targets: &mut TargetSet,
    ) -> Result<()> {
        for (name, value) in annotation.values.iter_mut() {
            match name.as_str() {
                "value" => {
                    for item in value.items_mut() {
                        let target = match item {
                            AnnotationValue::Type(target) => target,
                            other => {
                                return Err(RemapError::illegal(format!(
                                    "Mixin class {} declares a {} value in @Mixin.value where a class literal is expected",
                                    class,
                                    other.kind()
                                )))
                            }
                        };
                        if !target.is_reference() {
                            return Err(RemapError::illegal(format!(
                                "Mixin class {} targets type {}, which is not an L-type reference (arrays and primitives cannot be transformed and are illegal targets for mixins!)",
                                class, target
                            )));
                        }
                        let origin = target.internal_name().to_owned();
                        if let Some(mapped) = self.lookup.remapped_class_name_fast(&origin) {
                            *target = TypeRef::object(&mapped);
                        }
                        targets.insert(origin);
                    }
                }
                "targets" => {
                    let Some(entries) = value.strings_mut() else {
                        return Err(RemapError::illegal(format!(
                            "Mixin class {} declares a non-string entry in @Mixin.targets",
                            class
                        )));
                    };
                    for entry in entries {
                        let dotted = entry.contains('.');
                        let internal = entry.replace('.', "/");
                        let mapped = self.lookup.remapped_class_name(&internal);
                        *entry = if dotted { mapped.replace('/', ".") } else { mapped };
                        targets.insert(internal);
                    }
                }
                "priority" | "remap" => {}
                other => self.report_missing_feature(&format!(
                    "Unimplemented key in @Mixin: {} within node {}",
                    other, class
                ))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{ClassHierarchy, MappingTable, RecordingSink};
    use crate::policy::LogAndContinue;
    use crate::testkit::MixinBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_mixin_classes_are_untouched() {
        let lookup = MappingTable::new().with_class("a/T", "x/T");
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let mut class = ClassNode::new("a/Plain");
        let before = class.clone();
        MixinRemapper::new(&lookup, &sink, &lister)
            .remap_class(&mut class)
            .unwrap();
        assert_eq!(class, before);
        assert!(sink.is_empty());
    }

    #[test]
    fn mixin_targets_are_remapped_in_their_own_style() {
        let lookup = MappingTable::new()
            .with_class("com/example/T", "a/a")
            .with_class("com/example/U", "a/b");
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let mut class = MixinBuilder::new("a/M")
            .target_type("com/example/T")
            .target_name("com.example.U")
            .target_name("com/example/V")
            .build();
        MixinRemapper::new(&lookup, &sink, &lister)
            .remap_class(&mut class)
            .unwrap();

        let mixin = &class.annotations[0];
        assert_eq!(
            mixin.get("value"),
            Some(&AnnotationValue::Array(vec![AnnotationValue::Type(
                TypeRef::object("a/a")
            )]))
        );
        assert_eq!(
            mixin.get("targets"),
            Some(&AnnotationValue::strings(["a.b", "com/example/V"]))
        );
    }

    #[test]
    fn primitive_targets_are_illegal() {
        let lookup = MappingTable::new();
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let mut class = ClassNode::new("a/M");
        class.annotations.push(AnnotationNode::new(MIXIN).with(
            "value",
            AnnotationValue::Array(vec![AnnotationValue::Type(TypeRef::new("I"))]),
        ));
        let err = MixinRemapper::new(&lookup, &sink, &lister)
            .remap_class(&mut class)
            .unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().contains("targets type I"));
    }

    #[test]
    fn unknown_class_annotations_go_through_the_policy() {
        let lookup = MappingTable::new();
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let mut class = MixinBuilder::new("a/M").target_type("a/T").build();
        class
            .annotations
            .push(AnnotationNode::new("Lorg/spongepowered/asm/mixin/Pseudo;"));

        let strict = MixinRemapper::new(&lookup, &sink, &lister);
        let err = strict.remap_class(&mut class.clone()).unwrap_err();
        assert!(!err.is_structural());

        let lenient = strict.with_policy(&LogAndContinue);
        assert!(lenient.remap_class(&mut class).is_ok());
    }
}
