use crate::errors::{RemapError, Result};
use crate::model::descriptor::{self, is_method_descriptor};
use crate::model::MemberRef;
use std::fmt;

/// A textual member selector, parsed once.
///
/// Grammar after removing all whitespace:
///
/// ```text
/// selector := [ 'L' owner ';' ] [ name ] [ ':' field-desc | method-desc ]
/// ```
///
/// A method descriptor opens with its own `(`; no separator precedes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetSelector {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub desc: Option<String>,
}

impl TargetSelector {
    pub fn parse(text: &str) -> Result<Self> {
        let purged: String = text.chars().filter(|c| !c.is_whitespace()).collect();

        let colon = purged.find(':');
        let paren = purged.find('(');
        if colon.is_some() && paren.is_some() {
            return Err(RemapError::illegal(
                "The usage of the colon (':') indicates a field string, but the target selector contains a '(', which is an illegal character within field selectors.",
            ));
        }

        // (end of name, start of descriptor)
        let split = match (colon, paren) {
            (Some(colon), _) => Some((colon, colon + 1)),
            (None, Some(paren)) => Some((paren, paren)),
            (None, None) => None,
        };
        let name_end = split.map_or(purged.len(), |(end, _)| end);

        let (owner, name_start) = match purged.find(';') {
            Some(semicolon) if semicolon < name_end => {
                let owner = &purged[..semicolon];
                if !owner.starts_with('L') || owner.len() < 2 || owner.contains(['.', '[', '(', ')']) {
                    return Err(RemapError::illegal(format!(
                        "Malformed owner '{}' in target selector '{}'; an owner is written as L<internal name>;",
                        owner, purged
                    )));
                }
                (Some(owner[1..].to_owned()), semicolon + 1)
            }
            _ => (None, 0),
        };

        let name = &purged[name_start..name_end];
        if name.contains([';', '(', ')', '[', '/']) {
            return Err(RemapError::illegal(format!(
                "Malformed member name '{}' in target selector '{}'",
                name, purged
            )));
        }

        let desc = match split {
            Some((_, start)) => {
                let desc = &purged[start..];
                if desc.is_empty() {
                    return Err(RemapError::illegal(format!(
                        "The target selector '{}' declares a field but no field descriptor follows the colon",
                        purged
                    )));
                }
                if colon.is_some() && is_method_descriptor(desc) {
                    return Err(RemapError::illegal(format!(
                        "The target selector '{}' pairs a field colon with a method descriptor",
                        purged
                    )));
                }
                descriptor::validate(desc)?;
                Some(desc.to_owned())
            }
            None => None,
        };

        Ok(Self {
            owner,
            name: (!name.is_empty()).then(|| name.to_owned()),
            desc,
        })
    }

    /// Selector naming exactly one member.
    pub fn from_member(member: MemberRef) -> Self {
        Self {
            owner: Some(member.owner),
            name: Some(member.name),
            desc: Some(member.desc),
        }
    }

    pub fn is_fully_qualified(&self) -> bool {
        self.owner.is_some() && self.name.is_some() && self.desc.is_some()
    }

    /// The owner, name and descriptor when all three are known.
    pub fn qualified(&self) -> Option<(&str, &str, &str)> {
        match (&self.owner, &self.name, &self.desc) {
            (Some(owner), Some(name), Some(desc)) => Some((owner, name, desc)),
            _ => None,
        }
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(owner) = &self.owner {
            write!(f, "L{};", owner)?;
        }
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        match &self.desc {
            Some(desc) if is_method_descriptor(desc) => f.write_str(desc),
            Some(desc) => write!(f, ":{}", desc),
            None => Ok(()),
        }
    }
}
