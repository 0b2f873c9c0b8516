use super::{DescriptorFilter, TargetSelector};
use crate::errors::{RemapError, Result, ResultExt};
use crate::mapping::{remap_member_name, remap_signature};
use crate::model::{AnnotationValue, MemberRef};
use crate::remapper::MixinRemapper;
use crate::targets::TargetSet;
use tracing::trace;

const SELECTOR_REMEDIATION: &str = "Potential ways of resolving this issue include:\n\
    \t1. Splitting the mixin class so that each target class has its own mixin.\n\
    \t2. Using a fully qualified target selector (L<owner>;<name><descriptor>).\n\
    \t3. Using @Desc, optionally with an explicit owner, instead of a selector string.";

fn join_members(members: &[MemberRef]) -> String {
    let rendered: Vec<String> = members.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

impl MixinRemapper<'_> {
    /// Resolves a textual selector into its canonical target-namespace form.
    ///
    /// Fully qualified selectors are remapped directly and never look at
    /// `targets`. Partial selectors are inferred against `targets` (or the
    /// selector's own owner) when a scope is given; a selector that cannot
    /// be resolved is a gap and comes back unchanged if the policy lets the
    /// remapper continue.
    pub fn remap_target_selector(
        &self,
        error_prefix: &str,
        text: &str,
        targets: Option<&TargetSet>,
        filter: &DescriptorFilter,
    ) -> Result<String> {
        let selector = TargetSelector::parse(text).context(error_prefix)?;

        if let Some((owner, name, desc)) = selector.qualified() {
            return self
                .remap_member_ref(&MemberRef::new(owner, name, desc))
                .map(|resolved| resolved.to_string())
                .context(error_prefix);
        }

        let mut scope: Vec<&str> = Vec::new();
        if let Some(targets) = targets {
            scope = match selector.owner.as_deref() {
                Some(owner) => vec![owner],
                None => targets.iter().collect(),
            };
            let candidates = self.infer_candidates(&selector, &scope, filter);
            if let Some(resolved) = self.agree_on_candidates(error_prefix, text, &candidates)? {
                return Ok(resolved.to_string());
            }
        }

        let mut message = format!(
            "{}The target selector '{}' is not fully qualified (it lacks an owner, a name, a descriptor or a combination thereof) and no single member could be inferred for it. {}",
            error_prefix, text, SELECTOR_REMEDIATION
        );
        for class in &scope {
            if let Some(members) = self.lister().list_known_members(class) {
                message.push_str(&format!(
                    "\nKnown members of {}: {}",
                    class,
                    join_members(&members)
                ));
            }
        }
        self.report_missing_feature(&message)?;
        Ok(text.to_owned())
    }

    fn infer_candidates(
        &self,
        selector: &TargetSelector,
        scope: &[&str],
        filter: &DescriptorFilter,
    ) -> Vec<MemberRef> {
        let mut candidates = Vec::new();
        for class in scope {
            for candidate in self.lister().try_infer_member(
                class,
                selector.name.as_deref(),
                selector.desc.as_deref(),
            ) {
                if filter.accepts(&candidate.desc) {
                    trace!("selector candidate {}", candidate);
                    candidates.push(candidate);
                } else {
                    trace!("selector candidate {} rejected by {:?}", candidate, filter);
                }
            }
        }
        candidates
    }

    /// Remaps every candidate and requires them to agree.
    fn agree_on_candidates(
        &self,
        error_prefix: &str,
        text: &str,
        candidates: &[MemberRef],
    ) -> Result<Option<TargetSelector>> {
        let mut resolved: Option<TargetSelector> = None;
        for candidate in candidates {
            let remapped = self.remap_member_ref(candidate).context(error_prefix)?;
            match &resolved {
                Some(existing) if *existing != remapped => {
                    return Err(RemapError::illegal(format!(
                        "{}Torn target selector '{}': the candidate members map to different members in the target namespace ({} and {}), so the selector cannot be renamed without knowing which member is targeted. {}\nList of all candidate references: {}",
                        error_prefix,
                        text,
                        existing,
                        remapped,
                        SELECTOR_REMEDIATION,
                        join_members(candidates)
                    )));
                }
                Some(_) => {}
                None => resolved = Some(remapped),
            }
        }
        Ok(resolved)
    }

    /// Target-namespace form of a source-namespace member.
    fn remap_member_ref(&self, member: &MemberRef) -> Result<TargetSelector> {
        let lookup = self.lookup();
        Ok(TargetSelector::from_member(MemberRef::new(
            lookup.remapped_class_name(&member.owner),
            remap_member_name(lookup, &member.owner, &member.name, &member.desc),
            remap_signature(lookup, &member.desc)?,
        )))
    }

    /// Remaps one selector element value: a selector string or an `@Desc`.
    pub fn remap_selector_value(
        &self,
        error_prefix: &str,
        value: &mut AnnotationValue,
        targets: &TargetSet,
        filter: &DescriptorFilter,
    ) -> Result<()> {
        match value {
            AnnotationValue::String(text) => {
                *text = self.remap_target_selector(error_prefix, text.as_str(), Some(targets), filter)?;
                Ok(())
            }
            AnnotationValue::Annotation(desc) => {
                self.remap_desc_annotation(error_prefix, targets, desc, false)
            }
            other => Err(RemapError::illegal(format!(
                "{}Expected a target selector string or @Desc annotation, found a {} value",
                error_prefix,
                other.kind()
            ))),
        }
    }

    /// Remaps a selector list; `location` names the handler for diagnostics.
    pub fn remap_selector_list(
        &self,
        location: &str,
        value: &mut AnnotationValue,
        targets: &TargetSet,
        filter: &DescriptorFilter,
    ) -> Result<()> {
        for (index, item) in value.items_mut().into_iter().enumerate() {
            let prefix = if item.as_annotation().is_some() {
                format!("Error while remapping @Desc selector in {}, index {}: ", location, index)
            } else {
                format!("Error while remapping target selector in {}, index {}: ", location, index)
            };
            self.remap_selector_value(&prefix, item, targets, filter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{ClassHierarchy, ClassInfo, MappingTable, RecordingSink};
    use crate::policy::LogAndContinue;
    use pretty_assertions::assert_eq;

    fn hierarchy() -> ClassHierarchy {
        ClassHierarchy::new()
            .with_class("com/example/T", ClassInfo::new().member("foo", "()V").member("foo", "(I)Z"))
            .with_class("com/example/U", ClassInfo::new().member("foo", "()V"))
    }

    #[test]
    fn infers_unique_candidate() {
        let lookup = MappingTable::new().with_method("com/example/T", "foo", "()V", "bar");
        let (sink, lister) = (RecordingSink::new(), hierarchy());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let targets = TargetSet::single("com/example/T");
        let resolved = remapper
            .remap_target_selector("", "foo()V", Some(&targets), &DescriptorFilter::Any)
            .unwrap();
        assert_eq!(resolved, "Lcom/example/T;bar()V");
    }

    #[test]
    fn filter_narrows_candidates() {
        let lookup = MappingTable::new()
            .with_class("com/example/T", "a/a")
            .with_method("com/example/T", "foo", "(I)Z", "b");
        let (sink, lister) = (RecordingSink::new(), hierarchy());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let targets = TargetSet::single("com/example/T");
        let filter = DescriptorFilter::InjectHandler {
            leading_args: vec!["I".into()],
            expect_void: false,
        };
        let resolved = remapper
            .remap_target_selector("", "foo", Some(&targets), &filter)
            .unwrap();
        assert_eq!(resolved, "La/a;b(I)Z");
    }

    #[test]
    fn torn_candidates_are_structural() {
        let lookup = MappingTable::new()
            .with_method("com/example/T", "foo", "()V", "a")
            .with_method("com/example/U", "foo", "()V", "b");
        let (sink, lister) = (RecordingSink::new(), hierarchy());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister).with_policy(&LogAndContinue);
        let targets: TargetSet = ["com/example/T", "com/example/U"].into_iter().collect();
        let err = remapper
            .remap_target_selector("", "foo()V", Some(&targets), &DescriptorFilter::Any)
            .unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().contains("com/example/U.foo()V"));
    }

    #[test]
    fn explicit_owner_restricts_scope() {
        let lookup = MappingTable::new()
            .with_method("com/example/T", "foo", "()V", "a")
            .with_method("com/example/U", "foo", "()V", "b");
        let (sink, lister) = (RecordingSink::new(), hierarchy());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let targets: TargetSet = ["com/example/T", "com/example/U"].into_iter().collect();
        let resolved = remapper
            .remap_target_selector("", "Lcom/example/U;foo", Some(&targets), &DescriptorFilter::Any)
            .unwrap();
        assert_eq!(resolved, "Lcom/example/U;b()V");
    }

    #[test]
    fn unresolvable_selector_is_a_gap() {
        let lookup = MappingTable::new();
        let (sink, lister) = (RecordingSink::new(), hierarchy());
        let strict = MixinRemapper::new(&lookup, &sink, &lister);
        let targets = TargetSet::single("com/example/T");

        let err = strict
            .remap_target_selector("", "missing", Some(&targets), &DescriptorFilter::Any)
            .unwrap_err();
        assert!(!err.is_structural());
        assert!(err.message().contains("Known members of com/example/T"));

        let lenient = strict.with_policy(&LogAndContinue);
        let text = lenient
            .remap_target_selector("", " missing ", Some(&targets), &DescriptorFilter::Any)
            .unwrap();
        assert_eq!(text, " missing ");
    }

    #[test]
    fn fully_qualified_selectors_remap_fields() {
        let lookup = MappingTable::new()
            .with_class("com/example/T", "a/a")
            .with_field("com/example/T", "count", "Lcom/example/T;", "c");
        let (sink, lister) = (RecordingSink::new(), ClassHierarchy::new());
        let remapper = MixinRemapper::new(&lookup, &sink, &lister);
        let resolved = remapper
            .remap_target_selector(
                "",
                "Lcom/example/T;count:Lcom/example/T;",
                None,
                &DescriptorFilter::Any,
            )
            .unwrap();
        assert_eq!(resolved, "La/a;c:La/a;");
    }
}
