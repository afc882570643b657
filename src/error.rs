//! File system error types.

use thiserror::Error;

use crate::vfs::InodeId;

/// Errors produced by the in-memory file system.
///
/// None of them is fatal: the command layer reports the error and moves on to the
/// next command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// Lookup of an entry that does not exist.
    #[error("{0}: no such file or directory")]
    NotFound(String),

    /// Creation where an entry already occupies the name.
    #[error("{0}: already exists")]
    AlreadyExists(String),

    /// Structural or navigation operation attempted on a regular file.
    #[error("{0}: not a directory")]
    NotADirectory(String),

    /// Content operation attempted on a directory.
    #[error("{0}: is a directory")]
    IsADirectory(String),

    /// Non-recursive removal of a directory that still has children.
    #[error("{0}: directory not empty")]
    DirectoryNotEmpty(String),

    /// Name that can't denote an owned entry (empty, contains `/`, `.` or `..`).
    #[error("{0:?}: invalid name")]
    InvalidName(String),

    /// Inode id that is not allocated in the table.
    #[error("inode {0} is not allocated")]
    StaleInode(InodeId),
}
