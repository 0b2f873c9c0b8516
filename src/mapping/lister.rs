use crate::model::MemberRef;

/// Hierarchy-query service over potential mixin targets.
///
/// All names and descriptors are in the source namespace. Whether a member
/// is a field or a method follows from its descriptor: a leading `(` marks
/// a method.
pub trait MemberLister: Send + Sync {
    /// Whether `clazz` or any of its supertypes declares `name desc`.
    /// Subtypes are never considered.
    fn has_member_in_hierarchy(&self, clazz: &str, name: &str, desc: &str) -> bool;

    /// Members declared by `owner` itself that match the known parts.
    ///
    /// `None` means the part is unknown and matches anything. Supertypes are
    /// not searched; every returned reference has `owner` as its owner.
    fn try_infer_member(&self, owner: &str, name: Option<&str>, desc: Option<&str>)
        -> Vec<MemberRef>;

    /// Every member known for `owner`, for diagnostics only.
    fn list_known_members(&self, _owner: &str) -> Option<Vec<MemberRef>> {
        None
    }
}
