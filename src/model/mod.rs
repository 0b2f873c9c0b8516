//! In-memory object model the remapper borrows and mutates.

pub mod annotation;
pub mod class;
pub mod descriptor;
pub mod member;

pub use annotation::{AnnotationNode, AnnotationValue};
pub use class::{ClassNode, FieldNode, MethodNode};
pub use descriptor::{DescriptorError, TypeRef};
pub use member::MemberRef;
