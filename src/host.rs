//! JSON inputs and the rename report of the command-line harness.

use crate::model::{ClassNode, MemberRef};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Reads and deserializes a JSON input file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// One member rename pushed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub owner: String,
    pub name: String,
    pub desc: String,
    pub to: String,
}

impl From<(MemberRef, String)> for Rename {
    fn from((member, to): (MemberRef, String)) -> Self {
        Self {
            owner: member.owner,
            name: member.name,
            desc: member.desc,
            to,
        }
    }
}

/// The remapped class together with the renames decided for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemapReport {
    pub class: ClassNode,
    pub renames: Vec<Rename>,
}

impl RemapReport {
    pub fn new(class: ClassNode, renames: Vec<(MemberRef, String)>) -> Self {
        Self {
            class,
            renames: renames.into_iter().map(Rename::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize remap report")
    }
}
