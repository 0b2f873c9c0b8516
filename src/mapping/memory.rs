//! In-memory collaborators.
//!
//! These back the `mixin-remap` command-line harness, where mappings and
//! hierarchy data come from JSON files, and they double as test doubles.

use super::{MappingLookup, MappingSink, MemberLister};
use crate::model::MemberRef;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// One member rename entry of a mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberMapping {
    pub owner: String,
    pub name: String,
    pub desc: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MappingFile {
    #[serde(default)]
    classes: BTreeMap<String, String>,
    #[serde(default)]
    methods: Vec<MemberMapping>,
    #[serde(default)]
    fields: Vec<MemberMapping>,
}

/// Exact-match mapping table.
///
/// Member names are keyed by their exact owner; inherited members must be
/// listed under every owner they are looked up through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "MappingFile", into = "MappingFile")]
pub struct MappingTable {
    classes: HashMap<String, String>,
    members: HashMap<MemberRef, String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.classes.insert(from.into(), to.into());
        self
    }

    pub fn with_method(self, owner: &str, name: &str, desc: &str, to: impl Into<String>) -> Self {
        self.with_member(MemberRef::new(owner, name, desc), to)
    }

    pub fn with_field(self, owner: &str, name: &str, desc: &str, to: impl Into<String>) -> Self {
        self.with_member(MemberRef::new(owner, name, desc), to)
    }

    fn with_member(mut self, member: MemberRef, to: impl Into<String>) -> Self {
        self.members.insert(member, to.into());
        self
    }

    fn member_name(&self, owner: &str, name: &str, desc: &str) -> String {
        self.members
            .get(&MemberRef::new(owner, name, desc))
            .cloned()
            .unwrap_or_else(|| name.to_owned())
    }
}

impl From<MappingFile> for MappingTable {
    fn from(file: MappingFile) -> Self {
        let members = file
            .methods
            .into_iter()
            .chain(file.fields)
            .map(|m| (MemberRef::new(m.owner, m.name, m.desc), m.to))
            .collect();
        Self {
            classes: file.classes.into_iter().collect(),
            members,
        }
    }
}

impl From<MappingTable> for MappingFile {
    fn from(table: MappingTable) -> Self {
        let mut methods = Vec::new();
        let mut fields = Vec::new();
        let mut members: Vec<_> = table.members.into_iter().collect();
        members.sort();
        for (member, to) in members {
            let is_method = member.is_method();
            let entry = MemberMapping {
                owner: member.owner,
                name: member.name,
                desc: member.desc,
                to,
            };
            if is_method {
                methods.push(entry);
            } else {
                fields.push(entry);
            }
        }
        Self {
            classes: table.classes.into_iter().collect(),
            methods,
            fields,
        }
    }
}

impl MappingLookup for MappingTable {
    fn remapped_class_name_fast(&self, name: &str) -> Option<String> {
        self.classes.get(name).cloned()
    }

    fn remapped_method_name(&self, owner: &str, name: &str, desc: &str) -> String {
        self.member_name(owner, name, desc)
    }

    fn remapped_field_name(&self, owner: &str, name: &str, desc: &str) -> String {
        self.member_name(owner, name, desc)
    }
}

/// Sink that keeps every rename in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    renames: Mutex<Vec<(MemberRef, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded renames.
    pub fn renames(&self) -> Vec<(MemberRef, String)> {
        self.renames.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.lock().is_empty()
    }

    pub fn into_renames(self) -> Vec<(MemberRef, String)> {
        self.renames.into_inner()
    }
}

impl MappingSink for RecordingSink {
    fn remap_member(&self, member: MemberRef, new_name: &str) {
        self.renames.lock().push((member, new_name.to_owned()));
    }
}

/// Name and descriptor of a declared member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSig {
    pub name: String,
    pub desc: String,
}

/// Declared supertypes and members of one class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberSig>,
}

impl ClassInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn member(mut self, name: impl Into<String>, desc: impl Into<String>) -> Self {
        self.members.push(MemberSig {
            name: name.into(),
            desc: desc.into(),
        });
        self
    }

    fn declares(&self, name: &str, desc: &str) -> bool {
        self.members.iter().any(|m| m.name == name && m.desc == desc)
    }
}

/// Source-namespace class hierarchy keyed by internal name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassHierarchy {
    classes: BTreeMap<String, ClassInfo>,
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, name: impl Into<String>, info: ClassInfo) -> Self {
        self.classes.insert(name.into(), info);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }
}

impl MemberLister for ClassHierarchy {
    fn has_member_in_hierarchy(&self, clazz: &str, name: &str, desc: &str) -> bool {
        let mut pending = vec![clazz];
        let mut visited = HashSet::new();
        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(info) = self.classes.get(current) else {
                continue;
            };
            if info.declares(name, desc) {
                return true;
            }
            pending.extend(info.superclass.as_deref());
            pending.extend(info.interfaces.iter().map(String::as_str));
        }
        false
    }

    fn try_infer_member(
        &self,
        owner: &str,
        name: Option<&str>,
        desc: Option<&str>,
    ) -> Vec<MemberRef> {
        let Some(info) = self.classes.get(owner) else {
            return Vec::new();
        };
        info.members
            .iter()
            .filter(|m| name.is_none_or(|n| n == m.name))
            .filter(|m| desc.is_none_or(|d| d == m.desc))
            .map(|m| MemberRef::new(owner, &m.name, &m.desc))
            .collect()
    }

    fn list_known_members(&self, owner: &str) -> Option<Vec<MemberRef>> {
        self.classes.get(owner).map(|info| {
            info.members
                .iter()
                .map(|m| MemberRef::new(owner, &m.name, &m.desc))
                .collect()
        })
    }
}
