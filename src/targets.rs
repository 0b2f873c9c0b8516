use std::collections::HashSet;

/// The classes a mixin declares as transformation targets.
///
/// Built once per mixin class; deduplicated with first-insertion order kept
/// so diagnostics list targets the way the mixin declares them. Resolvers
/// only ever read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    classes: Vec<String>,
    seen: HashSet<String>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set holding exactly one class.
    pub fn single(class: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.insert(class);
        set
    }

    /// Adds a class; returns `false` if it was already present.
    pub fn insert(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.contains(&class) {
            return false;
        }
        self.seen.insert(class.clone());
        self.classes.push(class);
        true
    }

    pub fn contains(&self, class: &str) -> bool {
        self.seen.contains(class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TargetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for class in iter {
            set.insert(class);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_preserving_insertion_order() {
        let set: TargetSet = ["b/B", "a/A", "b/B", "c/C"].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b/B", "a/A", "c/C"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("a/A"));
    }
}
