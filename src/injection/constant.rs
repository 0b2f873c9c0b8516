//! Discriminator rules of the `CONSTANT` injection point.

use crate::errors::{RemapError, Result};
use crate::mapping::MappingLookup;

const CONSTANT_REMEDIATION: &str = "Following approaches towards resolving the issue exist:\n\
    \t1. Specify exactly one key=value entry in the 'args' element of the @At annotation.\n\
    \t2. Check that no whitespace surrounds the equals sign.";

/// Keys whose values carry no class names.
const LITERAL_KEYS: &[&str] = &[
    "nullValue",
    "intValue",
    "floatValue",
    "longValue",
    "doubleValue",
    "stringValue",
];

/// Validates `CONSTANT` args and remaps a `classValue` entry in place.
///
/// Entries without `=` carry no constant and are skipped.
pub(crate) fn remap_constant_args(
    lookup: &dyn MappingLookup,
    error_prefix: &str,
    args: Option<Vec<&mut String>>,
) -> Result<()> {
    let Some(args) = args else {
        return Err(RemapError::illegal(format!(
            "{}The CONSTANT @At injection point selector requires an args argument, but the discriminator was not specified. {}",
            error_prefix, CONSTANT_REMEDIATION
        )));
    };

    let mut matched = false;
    for entry in args {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        if matched {
            return Err(RemapError::illegal(format!(
                "{}The CONSTANT @At injection point selector requires a single args entry, but the discriminator specifies multiple of them. {}",
                error_prefix, CONSTANT_REMEDIATION
            )));
        }
        matched = true;

        if LITERAL_KEYS.contains(&key) {
            continue;
        }
        if key != "classValue" {
            return Err(RemapError::illegal(format!(
                "{}Unknown CONSTANT @At injection point key: '{}'. Note: whitespace is not allowed on either side of the equals sign.",
                error_prefix, key
            )));
        }
        if let Some(remapped) = remap_class_value(lookup, error_prefix, value)? {
            *entry = format!("classValue={}", remapped);
        }
    }

    if !matched {
        return Err(RemapError::illegal(format!(
            "{}Cannot find any constant values in @At(\"CONSTANT\") args. An example would be @At(value = \"CONSTANT\", args = {{\"intValue=5\"}}). {}",
            error_prefix, CONSTANT_REMEDIATION
        )));
    }
    Ok(())
}

/// New `classValue`, or `None` when the entry stays as written.
fn remap_class_value(lookup: &dyn MappingLookup, error_prefix: &str, value: &str) -> Result<Option<String>> {
    if value.is_empty() {
        return Ok(None);
    }

    if let Some(wrapped) = value.strip_suffix(';') {
        let internal = wrapped.strip_prefix('L').filter(|name| !name.is_empty()).ok_or_else(|| {
            RemapError::illegal(format!(
                "{}Illegal class descriptor '{}' for CONSTANT @At injection point argument. A class descriptor is formatted as follows: L<internalName>;.",
                error_prefix, value
            ))
        })?;
        if internal.contains('.') {
            return Err(RemapError::illegal(format!(
                "{}Illegal class descriptor '{}' for CONSTANT @At injection point argument. Packages within internal names are separated using forward slashes ('/') and not dots ('.').",
                error_prefix, value
            )));
        }
        return Ok(lookup
            .remapped_class_name_fast(internal)
            .map(|mapped| format!("L{};", mapped)));
    }

    let mapped = lookup.remapped_class_name(&value.replace('.', "/"));
    Ok(Some(if value.contains('.') {
        mapped.replace('/', ".")
    } else {
        mapped
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingTable;
    use pretty_assertions::assert_eq;

    fn run(lookup: &MappingTable, entries: &[&str]) -> Result<Vec<String>> {
        let mut owned: Vec<String> = entries.iter().map(|e| (*e).to_owned()).collect();
        remap_constant_args(lookup, "", Some(owned.iter_mut().collect()))?;
        Ok(owned)
    }

    #[test]
    fn literal_constants_need_no_remap() {
        let lookup = MappingTable::new();
        assert_eq!(run(&lookup, &["intValue=5"]).unwrap(), vec!["intValue=5"]);
        assert_eq!(
            run(&lookup, &["ordinal", "stringValue=a b"]).unwrap(),
            vec!["ordinal", "stringValue=a b"]
        );
    }

    #[test]
    fn exactly_one_pair_is_required() {
        let lookup = MappingTable::new();
        assert!(run(&lookup, &["intValue=5", "longValue=6"]).unwrap_err().is_structural());
        assert!(run(&lookup, &[]).unwrap_err().is_structural());
        assert!(remap_constant_args(&lookup, "", None).unwrap_err().is_structural());
        assert!(run(&lookup, &["charValue=c"]).unwrap_err().is_structural());
    }

    #[test]
    fn class_values_are_remapped() {
        let lookup = MappingTable::new().with_class("com/example/T", "com/example/U");
        assert_eq!(
            run(&lookup, &["classValue=Lcom/example/T;"]).unwrap(),
            vec!["classValue=Lcom/example/U;"]
        );
        assert_eq!(
            run(&lookup, &["classValue=com.example.T"]).unwrap(),
            vec!["classValue=com.example.U"]
        );
        assert_eq!(
            run(&lookup, &["classValue=Lcom/example/V;"]).unwrap(),
            vec!["classValue=Lcom/example/V;"]
        );
        assert_eq!(run(&lookup, &["classValue="]).unwrap(), vec!["classValue="]);
    }

    #[test]
    fn malformed_class_descriptors_are_structural() {
        let lookup = MappingTable::new();
        assert!(run(&lookup, &["classValue=com/example/T;"]).unwrap_err().is_structural());
        assert!(run(&lookup, &["classValue=Lcom.example.T;"]).unwrap_err().is_structural());
    }
}
