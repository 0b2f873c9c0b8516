//! In-memory remapping environment.

use crate::mapping::{ClassHierarchy, ClassInfo, MappingTable, MemberLister, RecordingSink};
use crate::model::MemberRef;
use crate::policy::{FailFast, RemapPolicy};
use crate::MixinRemapper;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mappings, hierarchy and sink for one test.
///
/// The hierarchy is wrapped in a [`ProbeLister`] so tests can assert that
/// it was never consulted.
pub struct RemapEnv {
    pub mappings: MappingTable,
    pub lister: ProbeLister,
    pub sink: RecordingSink,
    policy: Box<dyn RemapPolicy>,
}

impl Default for RemapEnv {
    fn default() -> Self {
        Self {
            mappings: MappingTable::new(),
            lister: ProbeLister::new(ClassHierarchy::new()),
            sink: RecordingSink::new(),
            policy: Box::new(FailFast),
        }
    }
}

impl RemapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, name: &str, info: ClassInfo) -> Self {
        self.lister.inner = self.lister.inner.with_class(name, info);
        self
    }

    pub fn with_class_mapping(mut self, from: &str, to: &str) -> Self {
        self.mappings = self.mappings.with_class(from, to);
        self
    }

    pub fn with_method_mapping(mut self, owner: &str, name: &str, desc: &str, to: &str) -> Self {
        self.mappings = self.mappings.with_method(owner, name, desc, to);
        self
    }

    pub fn with_field_mapping(mut self, owner: &str, name: &str, desc: &str, to: &str) -> Self {
        self.mappings = self.mappings.with_field(owner, name, desc, to);
        self
    }

    pub fn with_policy(mut self, policy: impl RemapPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn remapper(&self) -> MixinRemapper<'_> {
        MixinRemapper::new(&self.mappings, &self.sink, &self.lister).with_policy(self.policy.as_ref())
    }

    pub fn renames(&self) -> Vec<(MemberRef, String)> {
        self.sink.renames()
    }

    /// New name recorded for the mixin member called `name`, if any.
    pub fn renamed_to(&self, name: &str) -> Option<String> {
        self.sink
            .renames()
            .into_iter()
            .find(|(member, _)| member.name == name)
            .map(|(_, to)| to)
    }
}

/// [`MemberLister`] that counts how often it is queried.
pub struct ProbeLister {
    pub inner: ClassHierarchy,
    calls: AtomicUsize,
}

impl ProbeLister {
    pub fn new(inner: ClassHierarchy) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl MemberLister for ProbeLister {
    fn has_member_in_hierarchy(&self, clazz: &str, name: &str, desc: &str) -> bool {
        self.record();
        self.inner.has_member_in_hierarchy(clazz, name, desc)
    }

    fn try_infer_member(&self, owner: &str, name: Option<&str>, desc: Option<&str>) -> Vec<MemberRef> {
        self.record();
        self.inner.try_infer_member(owner, name, desc)
    }

    fn list_known_members(&self, owner: &str) -> Option<Vec<MemberRef>> {
        self.inner.list_known_members(owner)
    }
}
