//! Member selectors.
//!
//! Two shapes name a member of a target class: a selector string such as
//! `Lcom/example/T;run(I)V`, `run` or `count:I`, and the structured `@Desc`
//! annotation. Both are resolved against the mixin's [`TargetSet`](crate::TargetSet)
//! when they are only partially specified, and both reject torn results.

mod desc;
mod filter;
mod resolver;
mod target;

pub use filter::{find_callback_info, CallbackInfoParam, DescriptorFilter};
pub use target::TargetSelector;
