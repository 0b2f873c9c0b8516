// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod host;
pub mod injection;
pub mod mapping;
pub mod members;
pub mod model;
pub mod policy;
pub mod registry;
pub mod remapper;
pub mod selector;
pub mod targets;
pub mod testkit;

// Re-export commonly used types
pub use crate::errors::{RemapError, Result, ResultExt};
pub use crate::mapping::{MappingLookup, MappingSink, MemberLister};
pub use crate::model::{AnnotationNode, AnnotationValue, ClassNode, FieldNode, MemberRef, MethodNode};
pub use crate::policy::{ConfiguredPolicy, FailFast, LogAndContinue, RemapPolicy};
pub use crate::remapper::MixinRemapper;
pub use crate::targets::TargetSet;
