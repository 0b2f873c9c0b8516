//! Member annotation dispatch.
//!
//! Every method and field of a mixin is governed by at most one main
//! annotation. All mixin annotations of a member are classified before any
//! of them is processed, so a conflicting pair fails before anything is
//! remapped or renamed.

mod field;
mod method;
mod overwrite;
mod shadow;
mod unique;

use crate::constants::{
    is_member_namespace, CANONICAL_OVERWRITE, FINAL, INJECT, MODIFY_ARG, MODIFY_RETURN_VALUE,
    MUTABLE, OVERWRITE, REDIRECT, SHADOW, UNIQUE,
};
use crate::errors::{RemapError, Result};
use crate::model::AnnotationNode;
use crate::remapper::MixinRemapper;

pub(crate) use shadow::MemberSite;

/// Recognized member-level mixin annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Shadow,
    Unique,
    Overwrite,
    Inject,
    ModifyArg,
    Redirect,
    ModifyReturnValue,
    CanonicalOverwrite,
    Final,
    Mutable,
}

impl AnnotationKind {
    pub const ALL: [Self; 10] = [
        Self::Shadow,
        Self::Unique,
        Self::Overwrite,
        Self::Inject,
        Self::ModifyArg,
        Self::Redirect,
        Self::ModifyReturnValue,
        Self::CanonicalOverwrite,
        Self::Final,
        Self::Mutable,
    ];

    pub fn descriptor(self) -> &'static str {
        match self {
            Self::Shadow => SHADOW,
            Self::Unique => UNIQUE,
            Self::Overwrite => OVERWRITE,
            Self::Inject => INJECT,
            Self::ModifyArg => MODIFY_ARG,
            Self::Redirect => REDIRECT,
            Self::ModifyReturnValue => MODIFY_RETURN_VALUE,
            Self::CanonicalOverwrite => CANONICAL_OVERWRITE,
            Self::Final => FINAL,
            Self::Mutable => MUTABLE,
        }
    }

    pub fn from_descriptor(desc: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.descriptor() == desc)
    }

    /// Markers that carry no data and never govern a member.
    pub fn is_modifier(self) -> bool {
        matches!(self, Self::Final | Self::Mutable)
    }

    pub fn is_main(self) -> bool {
        !self.is_modifier()
    }

    pub fn applies_to_fields(self) -> bool {
        matches!(self, Self::Shadow | Self::Unique | Self::Final | Self::Mutable)
    }
}

impl MixinRemapper<'_> {
    /// Finds the main annotation of a member.
    ///
    /// Unknown annotations in a mixin namespace are gaps. A second main
    /// annotation is a structural violation.
    pub(crate) fn find_main_annotation(
        &self,
        site: &MemberSite<'_>,
        annotations: &[AnnotationNode],
    ) -> Result<Option<(usize, AnnotationKind)>> {
        let mut main: Option<(usize, AnnotationKind)> = None;
        for (index, annotation) in annotations.iter().enumerate() {
            if !is_member_namespace(&annotation.desc) {
                continue;
            }
            let kind = match AnnotationKind::from_descriptor(&annotation.desc) {
                Some(kind) if site.is_method() || kind.applies_to_fields() => kind,
                _ => {
                    self.report_missing_feature(&format!(
                        "Unknown mixin annotation on {} {}: {}",
                        site.noun(),
                        site.location(),
                        annotation.desc
                    ))?;
                    continue;
                }
            };
            if !kind.is_main() {
                continue;
            }
            if let Some((_, existing)) = main {
                return Err(RemapError::illegal(format!(
                    "Illegal mixin {} {}: The mixin {} is annotated with two or more incompatible annotations: {} and {}",
                    site.noun(),
                    site.location(),
                    site.noun(),
                    existing.descriptor(),
                    annotation.desc
                )));
            }
            main = Some((index, kind));
        }
        Ok(main)
    }
}
