//! JVM descriptor grammar.
//!
//! Descriptors follow the class-file grammar exactly: the primitive codes
//! `B C D F I J S Z`, `L<internal name>;` references, `[` array prefixes and
//! the `(args)ret` method form where `V` is only legal as a return type.
//! Nothing in this module relaxes or extends that grammar; every walker
//! validates as it goes and reports the first offending offset.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const PRIMITIVES: &[u8] = b"BCDFIJSZ";

/// Errors produced while walking a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("empty descriptor")]
    Empty,

    #[error("unexpected character '{found}' at offset {offset} in descriptor '{descriptor}'")]
    UnexpectedChar {
        descriptor: String,
        offset: usize,
        found: char,
    },

    #[error("descriptor '{0}' ends unexpectedly")]
    UnexpectedEnd(String),

    #[error("unterminated class reference in descriptor '{0}'")]
    UnterminatedReference(String),

    #[error("trailing characters after offset {offset} in descriptor '{descriptor}'")]
    Trailing { descriptor: String, offset: usize },

    #[error("'{0}' is not a method descriptor")]
    NotAMethod(String),
}

/// Whether the descriptor denotes a method (leading `(`).
pub fn is_method_descriptor(desc: &str) -> bool {
    desc.starts_with('(')
}

fn unexpected(desc: &str, offset: usize) -> DescriptorError {
    match desc[offset..].chars().next() {
        Some(found) => DescriptorError::UnexpectedChar {
            descriptor: desc.to_owned(),
            offset,
            found,
        },
        None => DescriptorError::UnexpectedEnd(desc.to_owned()),
    }
}

/// Exclusive end offset of the field type starting at `start`.
fn field_type_end(desc: &str, start: usize) -> Result<usize, DescriptorError> {
    let bytes = desc.as_bytes();
    let mut pos = start;
    while bytes.get(pos) == Some(&b'[') {
        pos += 1;
    }

    match bytes.get(pos) {
        None => Err(DescriptorError::UnexpectedEnd(desc.to_owned())),
        Some(b'L') => {
            let name_start = pos + 1;
            let rel = desc[name_start..]
                .find(';')
                .ok_or_else(|| DescriptorError::UnterminatedReference(desc.to_owned()))?;
            if rel == 0 {
                return Err(unexpected(desc, name_start));
            }
            if let Some(bad) = desc[name_start..name_start + rel].find(['.', '[', '(', ')']) {
                return Err(unexpected(desc, name_start + bad));
            }
            Ok(name_start + rel + 1)
        }
        Some(c) if PRIMITIVES.contains(c) => Ok(pos + 1),
        Some(_) => Err(unexpected(desc, pos)),
    }
}

/// Copies the field type at `start` into `out`, passing every referenced
/// class name through `map`. Returns the end offset.
fn rewrite_field_type<F>(
    desc: &str,
    start: usize,
    out: &mut String,
    map: &mut F,
) -> Result<usize, DescriptorError>
where
    F: FnMut(&str) -> String,
{
    let end = field_type_end(desc, start)?;
    let element = start + desc[start..].bytes().take_while(|b| *b == b'[').count();
    out.push_str(&desc[start..element]);
    if desc.as_bytes()[element] == b'L' {
        out.push('L');
        out.push_str(&map(&desc[element + 1..end - 1]));
        out.push(';');
    } else {
        out.push_str(&desc[element..end]);
    }
    Ok(end)
}

/// Rewrites every class name referenced by a field or method descriptor.
///
/// The descriptor is validated while it is rewritten; the closure is only
/// invoked with the internal names of `L...;` references, array element
/// types included.
pub fn map_class_names<F>(desc: &str, mut map: F) -> Result<String, DescriptorError>
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(desc.len());
    if desc.is_empty() {
        return Err(DescriptorError::Empty);
    }

    if is_method_descriptor(desc) {
        out.push('(');
        let mut pos = 1;
        loop {
            match desc.as_bytes().get(pos) {
                Some(b')') => break,
                None => return Err(DescriptorError::UnexpectedEnd(desc.to_owned())),
                Some(_) => pos = rewrite_field_type(desc, pos, &mut out, &mut map)?,
            }
        }
        out.push(')');
        pos += 1;
        if &desc[pos..] == "V" {
            out.push('V');
            return Ok(out);
        }
        let end = rewrite_field_type(desc, pos, &mut out, &mut map)?;
        if end != desc.len() {
            return Err(DescriptorError::Trailing {
                descriptor: desc.to_owned(),
                offset: end,
            });
        }
    } else {
        let end = rewrite_field_type(desc, 0, &mut out, &mut map)?;
        if end != desc.len() {
            return Err(DescriptorError::Trailing {
                descriptor: desc.to_owned(),
                offset: end,
            });
        }
    }

    Ok(out)
}

/// Validates a field or method descriptor.
pub fn validate(desc: &str) -> Result<(), DescriptorError> {
    map_class_names(desc, str::to_owned).map(|_| ())
}

/// Splits a method descriptor into its argument descriptors and its return
/// descriptor.
pub fn split_method_descriptor(desc: &str) -> Result<(Vec<&str>, &str), DescriptorError> {
    if !is_method_descriptor(desc) {
        return Err(DescriptorError::NotAMethod(desc.to_owned()));
    }

    let mut args = Vec::new();
    let mut pos = 1;
    loop {
        match desc.as_bytes().get(pos) {
            Some(b')') => break,
            None => return Err(DescriptorError::UnexpectedEnd(desc.to_owned())),
            Some(_) => {
                let end = field_type_end(desc, pos)?;
                args.push(&desc[pos..end]);
                pos = end;
            }
        }
    }

    let ret = &desc[pos + 1..];
    if ret != "V" {
        let end = field_type_end(desc, pos + 1)?;
        if end != desc.len() {
            return Err(DescriptorError::Trailing {
                descriptor: desc.to_owned(),
                offset: end,
            });
        }
    }
    Ok((args, ret))
}

/// Argument descriptors of a method descriptor.
pub fn argument_types(desc: &str) -> Result<Vec<&str>, DescriptorError> {
    split_method_descriptor(desc).map(|(args, _)| args)
}

/// Builds a method descriptor from its parts.
pub fn method_descriptor<'a>(args: impl IntoIterator<Item = &'a str>, ret: &str) -> String {
    let mut out = String::from("(");
    for arg in args {
        out.push_str(arg);
    }
    out.push(')');
    out.push_str(ret);
    out
}

/// A `Class` typed annotation value, held as its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    /// Reference type for the given internal name.
    pub fn object(internal_name: &str) -> Self {
        Self(format!("L{};", internal_name))
    }

    pub fn descriptor(&self) -> &str {
        &self.0
    }

    /// Whether this is an `L...;` reference type.
    pub fn is_reference(&self) -> bool {
        self.0.len() > 2 && self.0.starts_with('L') && self.0.ends_with(';')
    }

    /// The internal class name for reference types, the bare descriptor for
    /// arrays and primitives.
    pub fn internal_name(&self) -> &str {
        if self.is_reference() {
            &self.0[1..self.0.len() - 1]
        } else {
            &self.0
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_method_descriptor() {
        let (args, ret) = split_method_descriptor("(I[JLjava/lang/String;)[Lcom/example/T;").unwrap();
        assert_eq!(args, vec!["I", "[J", "Ljava/lang/String;"]);
        assert_eq!(ret, "[Lcom/example/T;");
    }

    #[test]
    fn void_only_legal_as_return() {
        assert!(validate("()V").is_ok());
        assert!(validate("(V)V").is_err());
        assert!(validate("V").is_err());
    }

    #[test]
    fn rejects_trailing_and_unterminated() {
        assert!(matches!(
            validate("II"),
            Err(DescriptorError::Trailing { offset: 1, .. })
        ));
        assert!(matches!(
            validate("Ljava/lang/String"),
            Err(DescriptorError::UnterminatedReference(_))
        ));
        assert!(matches!(validate("(I"), Err(DescriptorError::UnexpectedEnd(_))));
        assert!(matches!(validate("()"), Err(DescriptorError::UnexpectedEnd(_))));
        assert!(matches!(validate("L;"), Err(DescriptorError::UnexpectedChar { .. })));
        assert!(matches!(
            validate("Ljava.lang.String;"),
            Err(DescriptorError::UnexpectedChar { found: '.', .. })
        ));
    }

    #[test]
    fn maps_nested_class_names() {
        let mapped = map_class_names("([La/B;ILc/D;)La/B;", |name| name.to_uppercase()).unwrap();
        assert_eq!(mapped, "([LA/B;ILC/D;)LA/B;");
    }

    #[test]
    fn class_names_may_contain_l() {
        let mapped = map_class_names("LLoud/Lion;", |name| format!("x/{}", name)).unwrap();
        assert_eq!(mapped, "Lx/Loud/Lion;");
    }

    #[test]
    fn type_ref_internal_name() {
        assert_eq!(TypeRef::object("com/example/T").internal_name(), "com/example/T");
        assert_eq!(TypeRef::new("[I").internal_name(), "[I");
        assert_eq!(TypeRef::new("I").internal_name(), "I");
        assert!(!TypeRef::new("[Lcom/example/T;").is_reference());
    }

    #[test]
    fn builds_method_descriptor() {
        assert_eq!(method_descriptor(["I", "Ljava/lang/Object;"], "V"), "(ILjava/lang/Object;)V");
        assert_eq!(method_descriptor([], "Z"), "()Z");
    }
}
