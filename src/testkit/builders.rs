//! Builders for mixin classes and annotation trees.

use crate::constants::{AT, DESC, MIXIN};
use crate::model::{AnnotationNode, AnnotationValue, ClassNode, FieldNode, MethodNode, TypeRef};

pub const CALLBACK_INFO_DESC: &str = "Lorg/spongepowered/asm/mixin/injection/callback/CallbackInfo;";
pub const CALLBACK_INFO_RETURNABLE_DESC: &str =
    "Lorg/spongepowered/asm/mixin/injection/callback/CallbackInfoReturnable;";

/// Builds a mixin class. The `@Mixin` annotation is always the first
/// class-level annotation.
#[derive(Debug, Clone)]
pub struct MixinBuilder {
    class: ClassNode,
    target_types: Vec<AnnotationValue>,
    target_names: Vec<String>,
}

impl MixinBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            class: ClassNode::new(name),
            target_types: Vec::new(),
            target_names: Vec::new(),
        }
    }

    /// Adds a class literal to `@Mixin.value`.
    pub fn target_type(mut self, internal_name: &str) -> Self {
        self.target_types
            .push(AnnotationValue::Type(TypeRef::object(internal_name)));
        self
    }

    /// Adds a string to `@Mixin.targets`.
    pub fn target_name(mut self, name: &str) -> Self {
        self.target_names.push(name.to_owned());
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.class.interfaces.push(interface.to_owned());
        self
    }

    pub fn annotation(mut self, annotation: AnnotationNode) -> Self {
        self.class.annotations.push(annotation);
        self
    }

    pub fn method(mut self, method: MethodNode) -> Self {
        self.class.methods.push(method);
        self
    }

    pub fn field(mut self, field: FieldNode) -> Self {
        self.class.fields.push(field);
        self
    }

    pub fn build(self) -> ClassNode {
        let mut mixin = AnnotationNode::new(MIXIN);
        if !self.target_types.is_empty() {
            mixin = mixin.with("value", AnnotationValue::Array(self.target_types));
        }
        if !self.target_names.is_empty() {
            mixin = mixin.with("targets", AnnotationValue::strings(self.target_names));
        }
        let mut class = self.class;
        class.annotations.insert(0, mixin);
        class
    }
}

/// Starts an `@At` with the given injection point.
pub fn at(value: &str) -> AtBuilder {
    AtBuilder {
        node: AnnotationNode::new(AT).with("value", AnnotationValue::string(value)),
    }
}

/// Builds an `@At`; elements keep call order.
#[derive(Debug, Clone)]
pub struct AtBuilder {
    node: AnnotationNode,
}

impl AtBuilder {
    pub fn target(self, selector: &str) -> Self {
        self.with("target", AnnotationValue::string(selector))
    }

    pub fn args<'s>(self, args: impl IntoIterator<Item = &'s str>) -> Self {
        self.with("args", AnnotationValue::strings(args))
    }

    pub fn ordinal(self, ordinal: i64) -> Self {
        self.with("ordinal", AnnotationValue::Int(ordinal))
    }

    pub fn desc(self, desc: AnnotationNode) -> Self {
        self.with("desc", AnnotationValue::Annotation(desc))
    }

    pub fn with(mut self, name: &str, value: AnnotationValue) -> Self {
        self.node = self.node.with(name, value);
        self
    }

    pub fn build(self) -> AnnotationNode {
        self.node
    }
}

/// Starts a `@Desc` naming `name`.
pub fn desc(name: &str) -> DescBuilder {
    DescBuilder {
        node: AnnotationNode::new(DESC).with("value", AnnotationValue::string(name)),
    }
}

/// Builds a `@Desc`; elements keep call order.
#[derive(Debug, Clone)]
pub struct DescBuilder {
    node: AnnotationNode,
}

impl DescBuilder {
    pub fn owner(mut self, internal_name: &str) -> Self {
        self.node = self
            .node
            .with("owner", AnnotationValue::Type(TypeRef::object(internal_name)));
        self
    }

    /// Argument types as descriptors.
    pub fn args<'s>(mut self, args: impl IntoIterator<Item = &'s str>) -> Self {
        let args = args
            .into_iter()
            .map(|arg| AnnotationValue::Type(TypeRef::new(arg)))
            .collect();
        self.node = self.node.with("args", AnnotationValue::Array(args));
        self
    }

    /// Return or field type as a descriptor.
    pub fn ret(mut self, ret: &str) -> Self {
        self.node = self.node.with("ret", AnnotationValue::Type(TypeRef::new(ret)));
        self
    }

    pub fn build(self) -> AnnotationNode {
        self.node
    }
}
