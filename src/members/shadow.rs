use crate::constants::DEFAULT_SHADOW_PREFIX;
use crate::errors::{RemapError, Result};
use crate::mapping::remap_member_name;
use crate::model::descriptor::is_method_descriptor;
use crate::model::{AnnotationNode, AnnotationValue, MemberRef};
use crate::remapper::MixinRemapper;
use crate::targets::TargetSet;
use tracing::debug;

/// The mixin member being dispatched.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MemberSite<'s> {
    pub class: &'s str,
    pub interfaces: &'s [String],
    pub name: &'s str,
    pub desc: &'s str,
}

impl MemberSite<'_> {
    pub fn is_method(&self) -> bool {
        is_method_descriptor(self.desc)
    }

    pub fn noun(&self) -> &'static str {
        if self.is_method() {
            "method"
        } else {
            "field"
        }
    }

    pub fn location(&self) -> String {
        self.member_ref().to_string()
    }

    pub fn member_ref(&self) -> MemberRef {
        MemberRef::new(self.class, self.name, self.desc)
    }
}

impl MixinRemapper<'_> {
    pub(crate) fn remap_shadow(
        &self,
        site: &MemberSite<'_>,
        annotation: &mut AnnotationNode,
        targets: &TargetSet,
    ) -> Result<()> {
        let mut prefix = DEFAULT_SHADOW_PREFIX.to_owned();
        for (name, value) in annotation.values.iter_mut() {
            match name.as_str() {
                "prefix" => {
                    prefix = value
                        .as_str()
                        .ok_or_else(|| {
                            RemapError::illegal(format!(
                                "@Shadow.prefix of {} must be a string",
                                site.location()
                            ))
                        })?
                        .to_owned();
                }
                "aliases" => self.remap_aliases(site, "@Shadow", value, targets)?,
                other => self.report_missing_feature(&format!(
                    "Unimplemented key in @Shadow: {} within {}",
                    other,
                    site.location()
                ))?,
            }
        }

        let stripped = site
            .name
            .strip_prefix(prefix.as_str())
            .filter(|rest| !rest.is_empty());
        let shadow_name = stripped.unwrap_or(site.name);

        let Some(remapped) =
            self.resolve_name_across(site, "@Shadow", shadow_name, targets, true)?
        else {
            return self.report_missing_feature(&format!(
                "@Shadow-annotated {} {} shadows {}, but no target class hierarchy declares such a member",
                site.noun(),
                site.location(),
                shadow_name
            ));
        };

        let final_name = match stripped {
            Some(_) => format!("{}{}", prefix, remapped),
            None => remapped,
        };
        if final_name != site.name {
            if site.is_method() {
                self.guard_interfaces(site, "@Shadow", targets)?;
            }
            debug!("@Shadow {} -> {}", site.location(), final_name);
            self.sink().remap_member(site.member_ref(), &final_name);
        }
        Ok(())
    }

    /// Rewrites an `aliases` list. Each alias is remapped through the
    /// targets whose hierarchy declares it; aliases found nowhere stay.
    pub(crate) fn remap_aliases(
        &self,
        site: &MemberSite<'_>,
        label: &str,
        value: &mut AnnotationValue,
        targets: &TargetSet,
    ) -> Result<()> {
        let aliases = value.strings_mut().ok_or_else(|| {
            RemapError::illegal(format!(
                "{}.aliases of {} must be an array of strings",
                label,
                site.location()
            ))
        })?;
        for alias in aliases {
            if let Some(remapped) = self.resolve_name_across(site, label, alias.as_str(), targets, true)? {
                *alias = remapped;
            }
        }
        Ok(())
    }

    /// Remaps `name` (with the site's descriptor) through every target,
    /// requiring all of them to agree.
    ///
    /// With `require_existence` only targets whose hierarchy declares the
    /// member take part. `None` when no target took part.
    pub(crate) fn resolve_name_across(
        &self,
        site: &MemberSite<'_>,
        label: &str,
        name: &str,
        targets: &TargetSet,
        require_existence: bool,
    ) -> Result<Option<String>> {
        let mut resolved: Option<String> = None;
        for target in targets.iter() {
            if require_existence && !self.lister().has_member_in_hierarchy(target, name, site.desc) {
                continue;
            }
            let candidate = remap_member_name(self.lookup(), target, name, site.desc);
            match &resolved {
                Some(existing) if *existing != candidate => {
                    return Err(RemapError::illegal(format!(
                        "Disjoint mapping names while trying to remap {} of {}-annotated {}: {} (mapped to both {} and {}). This is likely caused by different target classes having different names for the same member. Potential ways of resolving this issue include:\n\
                         \t1. Splitting the mixin class so that each target class has its own mixin.\n\
                         \t2. Using an {} instead (not supported by this remapper).",
                        if name == site.name { "the name".to_owned() } else { format!("'{}'", name) },
                        label,
                        site.noun(),
                        site.location(),
                        existing,
                        candidate,
                        if site.is_method() { "@Invoker" } else { "@Accessor" }
                    )));
                }
                Some(_) => {}
                None => resolved = Some(candidate),
            }
        }
        Ok(resolved)
    }

    /// Rejects renaming a method that an implemented interface declares,
    /// unless the policy allows renaming that interface's members.
    pub(crate) fn guard_interfaces(
        &self,
        site: &MemberSite<'_>,
        label: &str,
        targets: &TargetSet,
    ) -> Result<()> {
        for interface in site.interfaces {
            if !self.policy().forbid_remapping_interface_members(interface, targets) {
                continue;
            }
            if self.lister().has_member_in_hierarchy(interface, site.name, site.desc) {
                return Err(RemapError::illegal(format!(
                    "Attempt to {} method {} which is provided by the interface {}. The interface does not allow remapping its members. Potential ways of resolving this issue include:\n\
                     \t1. Rename the method in the interface or alter its descriptor.\n\
                     \t2. Do not implement the interface in the mixin.\n\
                     \t3. Use @Unique with silent = true.\n\
                     \t4. Allow renames for {} in the [interfaces] section of the configuration.",
                    label,
                    site.location(),
                    interface,
                    interface
                )));
            }
        }
        Ok(())
    }
}
