use std::collections::BTreeMap;

use crate::core::utils::{self, PARENT_LINK, SELF_LINK};
use crate::vfs::InodeId;
use crate::{FsError, Result};

/// Content of a directory: entry names mapped to inode ids, plus the directory's own
/// absolute path (ending in its own name; `["/"]` for the root).
///
/// The entries named `.` and `..` are back-references and never own the inode they
/// point at. Any other entry owns its inode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: BTreeMap<String, InodeId>, // iterated in lexicographic order
    path: Vec<String>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Result<InodeId> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| FsError::NotFound(name.to_string()))
    }

    /// Inserts `name`, replacing any previous entry of that name.
    pub fn insert(&mut self, name: &str, id: InodeId) {
        self.entries.insert(name.to_string(), id);
    }

    pub fn detach(&mut self, name: &str) -> Option<InodeId> {
        self.entries.remove(name)
    }

    /// Drops the `.` and `..` back-references.
    pub fn unlink_dots(&mut self) {
        self.entries.remove(SELF_LINK);
        self.entries.remove(PARENT_LINK);
    }

    /// Returns the name of the owning entry that points at `id`.
    pub fn name_of(&self, id: InodeId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, entry)| **entry == id && !utils::is_back_reference(name))
            .map(|(name, _)| name.as_str())
    }

    /// Entries in lexicographic order, `.` and `..` included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, InodeId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Owned entries only, in lexicographic order.
    pub fn children(&self) -> impl Iterator<Item = (&str, InodeId)> {
        self.entries().filter(|(name, _)| !utils::is_back_reference(name))
    }

    /// Number of entries, `.` and `..` included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A directory is empty when only `.` and `..` remain.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 2
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn set_path(&mut self, components: Vec<String>) {
        self.path = components;
    }

    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or(utils::ROOT)
    }

    /// Renames the directory in its own path.
    pub fn set_name(&mut self, name: &str) {
        self.path.pop();
        self.path.push(name.to_string());
    }
}
