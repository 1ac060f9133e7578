//! Ordered set of member path names
//!
//! Insertion order is preserved and duplicates are dropped on insert.
//! Membership and subset checks are linear scans, which is fine at the
//! member counts tar archives see on a command line.

/// Ordered collection of distinct path strings.
///
/// Used both for the caller-supplied file list and for the materialized
/// list of archive members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    names: Vec<String>,
}

impl FileSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of names in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Insert a name, keeping the first occurrence. Returns whether the
    /// name was newly inserted.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Whether `name` is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Whether every name in `self` also appears in `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.names.iter().all(|n| other.contains(n))
    }

    /// Iterate names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Remove all names.
    pub fn clear(&mut self) {
        self.names.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for FileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
