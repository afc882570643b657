//! Arena holding every inode of the tree, keyed by inode id.
//!
//! Directory entries store ids, not handles, so the `.`/`..` cycles carry no
//! ownership. An inode lives exactly as long as the owning entry in its parent
//! directory; removing that entry removes the inode from the arena.

use std::collections::HashMap;

use tracing::debug;

use crate::core::utils::{self, PARENT_LINK, SELF_LINK};
use crate::vfs::{Directory, EntryType, IdAllocator, Inode, InodeId, PlainFile};
use crate::{FsError, Result};

#[derive(Debug, Clone, Default)]
pub struct InodeTable {
    nodes: HashMap<InodeId, Inode>,
    ids: IdAllocator,
}

impl InodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a detached inode with empty content of the given kind.
    pub fn create(&mut self, entry_type: EntryType) -> InodeId {
        let id = self.ids.next_id();
        self.nodes.insert(id, Inode::new(id, entry_type));
        debug!(id, ?entry_type, "inode created");
        id
    }

    /// Number of live inodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: InodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: InodeId) -> Result<&Inode> {
        self.nodes.get(&id).ok_or(FsError::StaleInode(id))
    }

    pub fn get_mut(&mut self, id: InodeId) -> Result<&mut Inode> {
        self.nodes.get_mut(&id).ok_or(FsError::StaleInode(id))
    }

    pub fn dir(&self, id: InodeId) -> Result<&Directory> {
        self.get(id)?.content().as_dir()
    }

    pub fn dir_mut(&mut self, id: InodeId) -> Result<&mut Directory> {
        self.get_mut(id)?.content_mut().as_dir_mut()
    }

    pub fn file(&self, id: InodeId) -> Result<&PlainFile> {
        self.get(id)?.content().as_file()
    }

    pub fn file_mut(&mut self, id: InodeId) -> Result<&mut PlainFile> {
        self.get_mut(id)?.content_mut().as_file_mut()
    }

    pub fn is_dir(&self, id: InodeId) -> Result<bool> {
        Ok(self.get(id)?.content().is_dir())
    }

    /// Size as listed: characters of a file, entry count of a directory.
    pub fn size(&self, id: InodeId) -> Result<usize> {
        Ok(self.get(id)?.content().size())
    }

    /// Looks up `name` in the directory `dir`.
    pub fn lookup(&self, dir: InodeId, name: &str) -> Result<InodeId> {
        self.dir(dir)?.lookup(name)
    }

    /// Creates the empty regular file `name` in `dir`.
    pub fn create_file(&mut self, dir: InodeId, name: &str) -> Result<InodeId> {
        utils::validate_name(name)?;
        if self.dir(dir)?.contains(name) {
            return Err(FsError::AlreadyExists(name.to_string()));
        }
        let id = self.create(EntryType::File);
        self.file_mut(id)?.set_name(name);
        self.dir_mut(dir)?.insert(name, id);
        debug!(dir, id, name, "file created");
        Ok(id)
    }

    /// Creates the empty directory `name` in `dir`. The new directory has no `.`/`..`
    /// and no path until [`InodeTable::init_links`] is run for it.
    pub fn create_directory(&mut self, dir: InodeId, name: &str) -> Result<InodeId> {
        utils::validate_name(name)?;
        if self.dir(dir)?.contains(name) {
            return Err(FsError::AlreadyExists(name.to_string()));
        }
        let id = self.create(EntryType::Directory);
        self.dir_mut(dir)?.insert(name, id);
        debug!(dir, id, name, "directory created");
        Ok(id)
    }

    /// Wires `.` and `..` of `child` and derives its path from the parent's path and
    /// the name under which the parent owns it.
    pub fn init_links(&mut self, parent: InodeId, child: InodeId) -> Result<()> {
        let parent_dir = self.dir(parent)?;
        let name = parent_dir
            .name_of(child)
            .ok_or_else(|| FsError::NotFound(format!("inode {child}")))?;
        let mut path = parent_dir.path().to_vec();
        path.push(name.to_string());

        let child_dir = self.dir_mut(child)?;
        child_dir.insert(SELF_LINK, child);
        child_dir.insert(PARENT_LINK, parent);
        child_dir.set_path(path);
        Ok(())
    }

    /// Removes the file or empty directory `name` from `dir` and frees its inode.
    pub fn remove(&mut self, dir: InodeId, name: &str) -> Result<()> {
        utils::validate_name(name)?;
        let id = self.lookup(dir, name)?;
        if self.is_dir(id)? {
            let target = self.dir_mut(id)?;
            if !target.is_empty() {
                return Err(FsError::DirectoryNotEmpty(name.to_string()));
            }
            target.unlink_dots();
        }
        self.dir_mut(dir)?.detach(name);
        self.nodes.remove(&id);
        debug!(dir, id, name, "entry removed");
        Ok(())
    }

    /// Replaces the words of the existing file `name` in `dir`.
    pub fn write_to_file<S: AsRef<str>>(
        &mut self,
        dir: InodeId,
        name: &str,
        words: &[S],
    ) -> Result<()> {
        let id = self.lookup(dir, name)?;
        self.file_mut(id)?.write(words);
        debug!(dir, id, name, words = words.len(), "file written");
        Ok(())
    }
}
