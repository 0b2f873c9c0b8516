//! Annotation metadata as it appears on mixin classes and members.
//!
//! An [`AnnotationNode`] keeps its elements in declaration order, the same
//! way the class file stores them. Resolvers look elements up by name and
//! rewrite the leaf values in place.

use super::descriptor::TypeRef;
use serde::{Deserialize, Serialize};

/// A single annotation element value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Type(TypeRef),
    Enum { desc: String, value: String },
    Annotation(AnnotationNode),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array(values.into_iter().map(|v| Self::String(v.into())).collect())
    }

    /// Short name of the value kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Double(_) => "floating point",
            Self::String(_) => "string",
            Self::Type(_) => "class",
            Self::Enum { .. } => "enum",
            Self::Annotation(_) => "annotation",
            Self::Array(_) => "array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&AnnotationNode> {
        match self {
            Self::Annotation(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_annotation_mut(&mut self) -> Option<&mut AnnotationNode> {
        match self {
            Self::Annotation(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AnnotationValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<AnnotationValue>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable views of a string list. A lone string counts as a
    /// one-element list; `None` if any item is not a string.
    pub fn strings_mut(&mut self) -> Option<Vec<&mut String>> {
        match self {
            Self::String(s) => Some(vec![s]),
            Self::Array(items) => items
                .iter_mut()
                .map(|item| match item {
                    Self::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// Mutable views of the items of a list value. A non-array value counts
    /// as a one-element list.
    pub fn items_mut(&mut self) -> Vec<&mut AnnotationValue> {
        match self {
            Self::Array(items) => items.iter_mut().collect(),
            other => vec![other],
        }
    }
}

/// An annotation instance: its type descriptor plus ordered elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationNode {
    pub desc: String,
    #[serde(default)]
    pub values: Vec<(String, AnnotationValue)>,
}

impl AnnotationNode {
    pub fn new(desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            values: Vec::new(),
        }
    }

    /// Builder-style element append.
    pub fn with(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.push((name.into(), value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&AnnotationValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnnotationValue> {
        self.values
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(n, _)| n == name)
    }

    /// Replaces an existing element or appends a new one.
    pub fn set(&mut self, name: &str, value: AnnotationValue) {
        match self.get_mut(name) {
            Some(slot) => *slot = value,
            None => self.values.push((name.to_owned(), value)),
        }
    }

    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }
}
