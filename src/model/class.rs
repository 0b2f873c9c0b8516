//! Class, method and field nodes carrying annotation metadata.
//!
//! Only what the remapper reads or rewrites is modelled. Retention
//! (visible vs invisible) is not distinguished: class-level and
//! member-level annotations each live in a single list.

use super::annotation::AnnotationNode;
use super::member::MemberRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    /// Internal name of the mixin class.
    pub name: String,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationNode>,
    #[serde(default)]
    pub methods: Vec<MethodNode>,
    #[serde(default)]
    pub fields: Vec<FieldNode>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interfaces: Vec::new(),
            annotations: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationNode>,
}

impl MethodNode {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: AnnotationNode) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn member_ref(&self, owner: &str) -> MemberRef {
        MemberRef::new(owner, &self.name, &self.desc)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationNode>,
}

impl FieldNode {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: AnnotationNode) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn member_ref(&self, owner: &str) -> MemberRef {
        MemberRef::new(owner, &self.name, &self.desc)
    }
}
