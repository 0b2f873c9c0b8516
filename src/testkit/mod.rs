//! Testing infrastructure for mixin remapping.
//!
//! - **[`RemapEnv`]**: in-memory mappings, hierarchy and rename sink with a
//!   fluent setup API
//! - **Builders**: [`MixinBuilder`], [`at`] and [`desc`] for annotation trees
//! - **Assertion macros**: [`assert_structural!`](crate::assert_structural)
//!   and [`assert_missing_feature!`](crate::assert_missing_feature)
//!
//! # Quick Start
//!
//! ```rust
//! use mixin_remap::testkit::{MixinBuilder, RemapEnv};
//! use mixin_remap::mapping::ClassInfo;
//! use mixin_remap::model::FieldNode;
//! use mixin_remap::model::AnnotationNode;
//! use mixin_remap::constants::SHADOW;
//!
//! let env = RemapEnv::new()
//!     .with_class("com/example/T", ClassInfo::new().member("count", "I"))
//!     .with_field_mapping("com/example/T", "count", "I", "cnt");
//!
//! let mut class = MixinBuilder::new("com/example/mixin/TMixin")
//!     .target_type("com/example/T")
//!     .field(FieldNode::new("shadow$count", "I").with_annotation(AnnotationNode::new(SHADOW)))
//!     .build();
//!
//! env.remapper().remap_class(&mut class).unwrap();
//! assert_eq!(env.renamed_to("shadow$count"), Some("shadow$cnt".to_owned()));
//! ```

pub mod assertions;
pub mod builders;
pub mod env;

pub use builders::{at, desc, AtBuilder, DescBuilder, MixinBuilder, CALLBACK_INFO_DESC, CALLBACK_INFO_RETURNABLE_DESC};
pub use env::{ProbeLister, RemapEnv};
