use crate::model::MemberRef;

/// Receiver of decided member renames.
///
/// Fire-and-forget: the remapper never reads anything back. Implementations
/// used from several threads at once must synchronize internally.
pub trait MappingSink: Send + Sync {
    /// Record that `member` (source namespace) is to be renamed to `new_name`.
    fn remap_member(&self, member: MemberRef, new_name: &str);
}
