use crate::model::descriptor::{self, DescriptorError};

/// Naming oracle converting source-namespace identifiers into the target
/// namespace.
///
/// Implementations should be thread-safe (`Send + Sync`) so distinct mixin
/// classes can be remapped concurrently against the same oracle.
pub trait MappingLookup: Send + Sync {
    /// Remapped internal class name, or `None` if the class is not mapped.
    fn remapped_class_name_fast(&self, name: &str) -> Option<String>;

    /// Remapped internal class name, the input itself if it is not mapped.
    fn remapped_class_name(&self, name: &str) -> String {
        self.remapped_class_name_fast(name)
            .unwrap_or_else(|| name.to_owned())
    }

    /// Remapped name of the method `owner.name desc`.
    fn remapped_method_name(&self, owner: &str, name: &str, desc: &str) -> String;

    /// Remapped name of the field `owner.name:desc`.
    fn remapped_field_name(&self, owner: &str, name: &str, desc: &str) -> String;
}

/// Rewrites every class name embedded in a field or method descriptor.
pub fn remap_signature<L>(lookup: &L, desc: &str) -> Result<String, DescriptorError>
where
    L: MappingLookup + ?Sized,
{
    descriptor::map_class_names(desc, |name| lookup.remapped_class_name(name))
}

/// Remaps a method descriptor, rejecting field descriptors.
pub fn remapped_method_descriptor<L>(lookup: &L, desc: &str) -> Result<String, DescriptorError>
where
    L: MappingLookup + ?Sized,
{
    if !descriptor::is_method_descriptor(desc) {
        return Err(DescriptorError::NotAMethod(desc.to_owned()));
    }
    remap_signature(lookup, desc)
}

/// Remaps a field descriptor, rejecting method descriptors.
pub fn remapped_field_descriptor<L>(lookup: &L, desc: &str) -> Result<String, DescriptorError>
where
    L: MappingLookup + ?Sized,
{
    if descriptor::is_method_descriptor(desc) {
        return Err(DescriptorError::UnexpectedChar {
            descriptor: desc.to_owned(),
            offset: 0,
            found: '(',
        });
    }
    remap_signature(lookup, desc)
}

/// Remaps a member name, picking the method or field oracle call from the
/// descriptor's leading character.
pub fn remap_member_name<L>(lookup: &L, owner: &str, name: &str, desc: &str) -> String
where
    L: MappingLookup + ?Sized,
{
    if descriptor::is_method_descriptor(desc) {
        lookup.remapped_method_name(owner, name, desc)
    } else {
        lookup.remapped_field_name(owner, name, desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingTable;

    fn table() -> MappingTable {
        MappingTable::new()
            .with_class("com/example/T", "a/a")
            .with_method("com/example/T", "foo", "()V", "b")
            .with_field("com/example/T", "count", "I", "c")
    }

    #[test]
    fn remaps_nested_signature_types() {
        let lookup = table();
        assert_eq!(
            remap_signature(&lookup, "([Lcom/example/T;Ljava/lang/String;)Lcom/example/T;").unwrap(),
            "([La/a;Ljava/lang/String;)La/a;"
        );
    }

    #[test]
    fn member_name_dispatches_on_descriptor() {
        let lookup = table();
        assert_eq!(remap_member_name(&lookup, "com/example/T", "foo", "()V"), "b");
        assert_eq!(remap_member_name(&lookup, "com/example/T", "count", "I"), "c");
        assert_eq!(remap_member_name(&lookup, "com/example/T", "other", "I"), "other");
    }

    #[test]
    fn descriptor_kind_is_checked() {
        let lookup = table();
        assert!(remapped_method_descriptor(&lookup, "I").is_err());
        assert!(remapped_field_descriptor(&lookup, "()V").is_err());
        assert_eq!(remapped_field_descriptor(&lookup, "Lcom/example/T;").unwrap(), "La/a;");
    }
}
