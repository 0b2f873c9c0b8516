//! Host-supplied collaborators and the signature-remap facility.
//!
//! The remapper never decides names itself. It asks a [`MappingLookup`] for
//! target-namespace names, asks a [`MemberLister`] what members exist in the
//! source namespace, and reports member renames to a [`MappingSink`].
//! In-memory implementations of all three live in [`memory`].

pub mod lister;
pub mod lookup;
pub mod memory;
pub mod sink;

pub use lister::MemberLister;
pub use lookup::{
    remap_member_name, remap_signature, remapped_field_descriptor, remapped_method_descriptor,
    MappingLookup,
};
pub use memory::{ClassHierarchy, ClassInfo, MappingTable, RecordingSink};
pub use sink::MappingSink;
