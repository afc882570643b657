use tracing::trace;

use crate::vfs::{Content, EntryType};

/// Unique identifier of an inode. Doubles as its key in the inode table.
pub type InodeId = u64;

/// Hands out inode ids in increasing order starting at 1. Ids are never reused.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: InodeId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> InodeId {
        let id = self.next;
        self.next += 1;
        trace!(id, "allocated inode id");
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A node of the tree: an identity plus one content variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    id: InodeId,
    content: Content,
}

impl Inode {
    pub fn new(id: InodeId, entry_type: EntryType) -> Self {
        Self {
            id,
            content: Content::new(entry_type),
        }
    }

    pub fn id(&self) -> InodeId {
        self.id
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }
}
