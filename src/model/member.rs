use serde::{Deserialize, Serialize};
use std::fmt;

use super::descriptor::is_method_descriptor;

/// Reference to exactly one field or method declared by one class.
///
/// The reference never spans the hierarchy: `owner` is the declaring class
/// as far as the producer of the reference is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberRef {
    pub owner: String,
    pub name: String,
    pub desc: String,
}

impl MemberRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            desc: desc.into(),
        }
    }

    pub fn is_method(&self) -> bool {
        is_method_descriptor(&self.desc)
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_method() {
            write!(f, "{}.{}{}", self.owner, self.name, self.desc)
        } else {
            write!(f, "{}.{}:{}", self.owner, self.name, self.desc)
        }
    }
}
