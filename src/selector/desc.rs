use crate::constants::DESC;
use crate::errors::{RemapError, Result, ResultExt};
use crate::mapping::{remapped_field_descriptor, remapped_method_descriptor};
use crate::model::descriptor::{self, method_descriptor};
use crate::model::{AnnotationNode, AnnotationValue, TypeRef};
use crate::remapper::MixinRemapper;
use crate::targets::TargetSet;

const TORN_DESC_REMEDIATION: &str = "Following steps can be taken to mitigate this issue:\n\
    \t1. Only define a single @Mixin.targets/@Mixin.value per mixin class.\n\
    \t2. Explicitly define @Desc.owner for this @Desc annotation (and if necessary separate a single @Desc into multiple @Desc annotations).\n\
    \t3. Validate the name hierarchy used to remap the @Desc, ensuring that no two classes define different names for the same member.";

fn type_element<'v>(error_prefix: &str, element: &str, value: &'v AnnotationValue) -> Result<&'v TypeRef> {
    value.as_type().ok_or_else(|| {
        RemapError::illegal(format!(
            "{}@Desc.{} must be a class literal, found a {} value",
            error_prefix,
            element,
            value.kind()
        ))
    })
}

impl MixinRemapper<'_> {
    /// Resolves a structured `@Desc` reference in place.
    ///
    /// With `match_field` the reference names a field whose type is `ret`;
    /// otherwise a method with `args` (default none) and `ret` (default
    /// `V`). Without an explicit owner every target must agree on the
    /// remapped name.
    pub fn remap_desc_annotation(
        &self,
        error_prefix: &str,
        targets: &TargetSet,
        node: &mut AnnotationNode,
        match_field: bool,
    ) -> Result<()> {
        if node.desc != DESC {
            return Err(RemapError::illegal(format!(
                "{}Invalid annotation descriptor: {}",
                error_prefix, node.desc
            )));
        }

        for name in node.element_names() {
            if !matches!(name, "value" | "owner" | "args" | "ret") {
                self.report_missing_feature(&format!(
                    "{}Unimplemented key in @Desc: {}",
                    error_prefix, name
                ))?;
            }
        }

        let name = match node.get("value") {
            Some(AnnotationValue::String(name)) => name.clone(),
            Some(other) => {
                return Err(RemapError::illegal(format!(
                    "{}@Desc.value must be a string, found a {} value",
                    error_prefix,
                    other.kind()
                )))
            }
            None => {
                return Err(RemapError::illegal(format!(
                    "{}The @Desc annotation is missing the required element 'value'. This error is usually caused by improperly written ASM transformers generating the mixin improperly.",
                    error_prefix
                )))
            }
        };

        let explicit_owner = match node.get("owner") {
            Some(value) => {
                let owner = type_element(error_prefix, "owner", value)?;
                if !owner.is_reference() {
                    return Err(RemapError::illegal(format!(
                        "{}@Desc.owner {} is not a class reference",
                        error_prefix, owner
                    )));
                }
                Some(owner.internal_name().to_owned())
            }
            None => None,
        };

        let ret = node
            .get("ret")
            .map(|value| type_element(error_prefix, "ret", value).map(|t| t.descriptor().to_owned()))
            .transpose()?;
        let has_args = node.contains("args");

        let desc = if match_field {
            match &ret {
                Some(ret) => ret.clone(),
                None => {
                    self.report_missing_feature(&format!(
                        "{}The @Desc annotation is expected to match a field, but has not explicitly set the field descriptor using ret.",
                        error_prefix
                    ))?;
                    "V".to_owned()
                }
            }
        } else {
            let mut args = Vec::new();
            if let Some(value) = node.get("args") {
                for item in value.as_array().unwrap_or(std::slice::from_ref(value)) {
                    args.push(type_element(error_prefix, "args", item)?.descriptor().to_owned());
                }
            }
            method_descriptor(args.iter().map(String::as_str), ret.as_deref().unwrap_or("V"))
        };

        let owners: Vec<&str> = match &explicit_owner {
            Some(owner) => vec![owner.as_str()],
            None => targets.iter().collect(),
        };

        let mut mapped_name: Option<String> = None;
        for owner in &owners {
            let lookup = self.lookup();
            let candidate = if match_field {
                lookup.remapped_field_name(owner, &name, &desc)
            } else {
                lookup.remapped_method_name(owner, &name, &desc)
            };
            match &mapped_name {
                Some(existing) if *existing != candidate => {
                    return Err(RemapError::illegal(format!(
                        "{}Torn @Desc: multiple potential owners define multiple potential names ({} and {}) for {}{}. {}",
                        error_prefix,
                        existing,
                        candidate,
                        name,
                        desc,
                        TORN_DESC_REMEDIATION
                    )));
                }
                Some(_) => {}
                None => mapped_name = Some(candidate),
            }
        }
        let Some(mapped_name) = mapped_name else {
            return Err(RemapError::illegal(format!(
                "{}No owners exist that would influence this @Desc (did you forget specifying a target in the @Mixin annotation?).",
                error_prefix
            )));
        };

        node.set("value", AnnotationValue::String(mapped_name));

        // A field @Desc without ret has nothing to rewrite.
        if !match_field || ret.is_some() {
            let remapped = if match_field {
                remapped_field_descriptor(self.lookup(), &desc)
            } else {
                remapped_method_descriptor(self.lookup(), &desc)
            }
            .context(error_prefix)?;
            if match_field {
                node.set("ret", AnnotationValue::Type(TypeRef::new(remapped)));
            } else {
                let (args, ret_desc) = descriptor::split_method_descriptor(&remapped).context(error_prefix)?;
                if ret.is_some() {
                    node.set("ret", AnnotationValue::Type(TypeRef::new(ret_desc)));
                }
                if has_args {
                    node.set(
                        "args",
                        AnnotationValue::Array(
                            args.into_iter()
                                .map(|arg| AnnotationValue::Type(TypeRef::new(arg)))
                                .collect(),
                        ),
                    );
                }
            }
        }

        if let Some(owner) = &explicit_owner {
            node.set(
                "owner",
                AnnotationValue::Type(TypeRef::object(&self.lookup().remapped_class_name(owner))),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{ClassHierarchy, MappingTable, RecordingSink};
    use crate::policy::LogAndContinue;
    use crate::testkit::desc;
    use pretty_assertions::assert_eq;

    fn lookup() -> MappingTable {
        MappingTable::new()
            .with_class("com/example/T", "a/a")
            .with_class("com/example/Arg", "a/b")
            .with_method("com/example/T", "run", "(Lcom/example/Arg;)V", "r")
            .with_method("com/example/U", "run", "(Lcom/example/Arg;)V", "q")
            .with_field("com/example/T", "count", "I", "c")
    }

    #[test]
    fn method_desc_across_single_target() {
        let lookup = lookup();
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let mut node = desc("run").args(["Lcom/example/Arg;"]).build();
        remapper
            .remap_desc_annotation("", &TargetSet::single("com/example/T"), &mut node, false)
            .unwrap();
        assert_eq!(node, desc("r").args(["La/b;"]).build());
    }

    #[test]
    fn explicit_owner_is_remapped_too() {
        let lookup = lookup();
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let targets: TargetSet = ["com/example/T", "com/example/U"].into_iter().collect();
        let mut node = desc("count").owner("com/example/T").ret("I").build();
        remapper
            .remap_desc_annotation("", &targets, &mut node, true)
            .unwrap();
        assert_eq!(node, desc("c").owner("a/a").ret("I").build());
    }

    #[test]
    fn torn_names_across_targets_are_structural() {
        let lookup = lookup();
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let targets: TargetSet = ["com/example/T", "com/example/U"].into_iter().collect();
        let mut node = desc("run").args(["Lcom/example/Arg;"]).build();
        let err = remapper
            .remap_desc_annotation("", &targets, &mut node, false)
            .unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().contains("Torn @Desc"));
    }

    #[test]
    fn missing_value_and_empty_targets_are_structural() {
        let lookup = lookup();
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let mut nameless = AnnotationNode::new(DESC);
        assert!(remapper
            .remap_desc_annotation("", &TargetSet::new(), &mut nameless, false)
            .unwrap_err()
            .is_structural());
        let mut ownerless = desc("run").build();
        assert!(remapper
            .remap_desc_annotation("", &TargetSet::new(), &mut ownerless, false)
            .unwrap_err()
            .message()
            .contains("No owners"));
    }

    #[test]
    fn field_desc_with_method_ret_is_structural() {
        let lookup = lookup();
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let mut node = desc("count").ret("()V").build();
        let err = remapper
            .remap_desc_annotation("", &TargetSet::single("com/example/T"), &mut node, true)
            .unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn field_desc_without_ret_is_a_gap() {
        let lookup = lookup();
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let strict = MixinRemapper::new(&lookup, &sink, &lister);
        let targets = TargetSet::single("com/example/T");
        let mut node = desc("count").build();
        assert!(!strict
            .remap_desc_annotation("", &targets, &mut node.clone(), true)
            .unwrap_err()
            .is_structural());
        strict
            .with_policy(&LogAndContinue)
            .remap_desc_annotation("", &targets, &mut node, true)
            .unwrap();
        assert_eq!(node, desc("count").build());
    }
}
