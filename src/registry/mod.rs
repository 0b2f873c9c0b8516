//! Declarative element-remap table for injector annotations.
//!
//! Every table-driven annotation kind maps its element names to an
//! [`ElementRemapper`], plus hooks that run before any element is touched.
//! The table is built once and never changes afterwards.

use crate::constants::{CALLBACK_INFO, CALLBACK_INFO_RETURNABLE, DESC};
use crate::errors::{RemapError, Result, ResultExt};
use crate::members::AnnotationKind;
use crate::model::descriptor;
use crate::model::{AnnotationNode, AnnotationValue, TypeRef};
use crate::remapper::MixinRemapper;
use crate::selector::{find_callback_info, DescriptorFilter};
use crate::targets::TargetSet;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How one annotation element is remapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRemapper {
    /// Holds no names.
    Unchanged,
    /// One method selector.
    SingleTarget,
    /// A list of method selectors.
    ListTarget,
    /// A list of method selectors, filtered by the handler's callback-info shape.
    InjectListTarget,
    SingleAt,
    AtList,
    SingleSlice,
    SliceList,
}

/// Hook run before the elements of an annotation are remapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunBefore {
    /// Adds `target = @Desc(<handler name and signature>)` when the
    /// annotation names no target.
    ImplicitTarget,
    /// Fails unless the handler declares a callback-info parameter.
    RequireCallbackInfo,
}

/// The handler method being processed and the mixin it belongs to.
#[derive(Clone, Copy)]
pub struct RemapContext<'c> {
    pub remapper: MixinRemapper<'c>,
    pub mixin_class: &'c str,
    pub method_name: &'c str,
    pub method_desc: &'c str,
    pub targets: &'c TargetSet,
}

impl RemapContext<'_> {
    /// `name + desc` of the handler.
    pub fn member(&self) -> String {
        format!("{}{}", self.method_name, self.method_desc)
    }

    /// `class.name desc` of the handler.
    pub fn location(&self) -> String {
        format!("method {}.{}{}", self.mixin_class, self.method_name, self.method_desc)
    }

    fn callback_filter(&self) -> Result<DescriptorFilter> {
        let prefix = format!("Malformed handler descriptor of {}: ", self.location());
        let callback = find_callback_info(self.method_desc)
            .context(&prefix)?
            .ok_or_else(|| {
                RemapError::illegal(format!(
                    "Annotated method {}.{}{} lacks type argument {} or {}",
                    self.mixin_class, self.method_name, self.method_desc, CALLBACK_INFO, CALLBACK_INFO_RETURNABLE
                ))
            })?;
        DescriptorFilter::for_handler(self.method_desc, callback).context(&prefix)
    }
}

impl RunBefore {
    fn apply(self, ctx: &RemapContext<'_>, annotation: &mut AnnotationNode) -> Result<()> {
        match self {
            Self::ImplicitTarget => {
                if annotation.contains("method") || annotation.contains("target") {
                    return Ok(());
                }
                let (args, ret) = descriptor::split_method_descriptor(ctx.method_desc)
                    .context(&format!("Malformed handler descriptor of {}: ", ctx.location()))?;
                let implicit = AnnotationNode::new(DESC)
                    .with("value", AnnotationValue::string(ctx.method_name))
                    .with(
                        "args",
                        AnnotationValue::Array(
                            args.into_iter()
                                .map(|arg| AnnotationValue::Type(TypeRef::new(arg)))
                                .collect(),
                        ),
                    )
                    .with("ret", AnnotationValue::Type(TypeRef::new(ret)));
                annotation.set("target", AnnotationValue::Annotation(implicit));
                Ok(())
            }
            Self::RequireCallbackInfo => ctx.callback_filter().map(|_| ()),
        }
    }
}

impl ElementRemapper {
    pub fn remap(self, ctx: &RemapContext<'_>, element: &str, value: &mut AnnotationValue) -> Result<()> {
        let remapper = &ctx.remapper;
        match self {
            Self::Unchanged => Ok(()),
            Self::SingleTarget => {
                if value.as_array().is_some() {
                    return Err(RemapError::illegal(format!(
                        "Element '{}' of {} takes a single target selector, not an array",
                        element,
                        ctx.location()
                    )));
                }
                remapper.remap_selector_list(&ctx.location(), value, ctx.targets, &DescriptorFilter::MethodOnly)
            }
            Self::ListTarget => {
                remapper.remap_selector_list(&ctx.location(), value, ctx.targets, &DescriptorFilter::MethodOnly)
            }
            Self::InjectListTarget => {
                let filter = ctx.callback_filter()?;
                remapper.remap_selector_list(&ctx.location(), value, ctx.targets, &filter)
            }
            Self::SingleAt => {
                let at = expect_annotation(ctx, element, value)?;
                remapper.remap_at(ctx.mixin_class, &ctx.member(), None, ctx.targets, at)
            }
            Self::AtList => {
                for (ordinal, item) in value.items_mut().into_iter().enumerate() {
                    let at = expect_annotation(ctx, element, item)?;
                    remapper.remap_at(ctx.mixin_class, &ctx.member(), Some(ordinal), ctx.targets, at)?;
                }
                Ok(())
            }
            Self::SingleSlice => {
                let slice = expect_annotation(ctx, element, value)?;
                remapper.remap_slice(ctx.mixin_class, &ctx.member(), None, ctx.targets, slice)
            }
            Self::SliceList => {
                for (ordinal, item) in value.items_mut().into_iter().enumerate() {
                    let slice = expect_annotation(ctx, element, item)?;
                    remapper.remap_slice(ctx.mixin_class, &ctx.member(), Some(ordinal), ctx.targets, slice)?;
                }
                Ok(())
            }
        }
    }
}

fn expect_annotation<'v>(
    ctx: &RemapContext<'_>,
    element: &str,
    value: &'v mut AnnotationValue,
) -> Result<&'v mut AnnotationNode> {
    let kind = value.kind();
    value.as_annotation_mut().ok_or_else(|| {
        RemapError::illegal(format!(
            "Element '{}' of {} must hold annotations, found a {} value",
            element,
            ctx.location(),
            kind
        ))
    })
}

/// Element rules and hooks of one annotation kind.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRemapper {
    elements: HashMap<&'static str, ElementRemapper>,
    run_before: Vec<RunBefore>,
}

impl AnnotationRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_before(mut self, hook: RunBefore) -> Self {
        self.run_before.push(hook);
        self
    }

    pub fn with_element(mut self, name: &'static str, remapper: ElementRemapper) -> Self {
        self.elements.insert(name, remapper);
        self
    }

    pub fn with_unchanged_element(self, name: &'static str) -> Self {
        self.with_element(name, ElementRemapper::Unchanged)
    }

    pub fn with_frequency_bounds(self) -> Self {
        self.with_unchanged_element("expect")
            .with_unchanged_element("allow")
            .with_unchanged_element("require")
    }

    /// Elements shared by injectors that hold no names.
    pub fn with_injector_metadata(self) -> Self {
        self.with_unchanged_element("id")
            .with_unchanged_element("remap")
            .with_unchanged_element("constraints")
            .with_unchanged_element("order")
    }

    pub fn with_index(self) -> Self {
        self.with_unchanged_element("index")
    }

    pub fn with_method_targets(self, remapper: ElementRemapper) -> Self {
        self.with_element("method", remapper)
            .with_element("target", remapper)
    }

    pub fn element(&self, name: &str) -> Option<ElementRemapper> {
        self.elements.get(name).copied()
    }

    /// Runs the hooks, then remaps every element in declaration order.
    /// Elements without a rule are gaps.
    pub fn remap(&self, ctx: &RemapContext<'_>, annotation: &mut AnnotationNode) -> Result<()> {
        for hook in &self.run_before {
            hook.apply(ctx, annotation)?;
        }

        let desc = annotation.desc.clone();
        for (name, value) in annotation.values.iter_mut() {
            match self.element(name) {
                Some(remapper) => remapper.remap(ctx, name, value)?,
                None => ctx.remapper.report_missing_feature(&format!(
                    "Unimplemented key in {}: {} within {}",
                    desc,
                    name,
                    ctx.location()
                ))?,
            }
        }
        Ok(())
    }
}

static ANNOTATION_REMAPPERS: Lazy<HashMap<AnnotationKind, AnnotationRemapper>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        AnnotationKind::Inject,
        AnnotationRemapper::new()
            .run_before(RunBefore::RequireCallbackInfo)
            .with_frequency_bounds()
            .with_injector_metadata()
            .with_unchanged_element("cancellable")
            .with_unchanged_element("locals")
            .with_element("at", ElementRemapper::AtList)
            .with_element("slice", ElementRemapper::SliceList)
            .with_method_targets(ElementRemapper::InjectListTarget),
    );
    map.insert(
        AnnotationKind::ModifyArg,
        AnnotationRemapper::new()
            .with_frequency_bounds()
            .with_injector_metadata()
            .with_index()
            .with_element("at", ElementRemapper::SingleAt)
            .with_element("slice", ElementRemapper::SingleSlice)
            .with_method_targets(ElementRemapper::ListTarget),
    );
    map.insert(
        AnnotationKind::Redirect,
        AnnotationRemapper::new()
            .with_frequency_bounds()
            .with_injector_metadata()
            .with_element("at", ElementRemapper::SingleAt)
            .with_element("slice", ElementRemapper::SingleSlice)
            .with_method_targets(ElementRemapper::ListTarget),
    );
    map.insert(
        AnnotationKind::ModifyReturnValue,
        AnnotationRemapper::new()
            .with_frequency_bounds()
            .with_injector_metadata()
            .with_element("at", ElementRemapper::AtList)
            .with_element("slice", ElementRemapper::SliceList)
            .with_method_targets(ElementRemapper::ListTarget),
    );
    map.insert(
        AnnotationKind::CanonicalOverwrite,
        AnnotationRemapper::new()
            .run_before(RunBefore::ImplicitTarget)
            .with_method_targets(ElementRemapper::SingleTarget),
    );
    map
});

/// The table entry of a kind, `None` for kinds with hand-written rules.
pub fn annotation_remapper(kind: AnnotationKind) -> Option<&'static AnnotationRemapper> {
    ANNOTATION_REMAPPERS.get(&kind)
}
