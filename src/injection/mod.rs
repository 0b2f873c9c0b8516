//! Injection points.
//!
//! An `@At` names a place inside a target method body: a kind such as
//! `INVOKE` plus an optional discriminator list, an optional member
//! selector and an optional `@Desc`. A `@Slice` bounds a range with two
//! `@At`s. Each kind validates and remaps its own discriminators.

mod at;
mod constant;
mod point;
mod slice;

pub use point::InjectionPoint;
