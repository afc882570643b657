use crate::vfs::{Directory, PlainFile};
use crate::{FsError, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

/// What an inode holds. Every structural operation goes through `as_dir`/`as_dir_mut`
/// and every content operation through `as_file`/`as_file_mut`, so a mismatched kind
/// always surfaces as `NotADirectory` or `IsADirectory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    File(PlainFile),
    Directory(Directory),
}

impl Content {
    pub fn new(entry_type: EntryType) -> Content {
        match entry_type {
            EntryType::File => Content::File(PlainFile::default()),
            EntryType::Directory => Content::Directory(Directory::new()),
        }
    }

    pub fn entry_type(&self) -> EntryType {
        match self {
            Content::File(_) => EntryType::File,
            Content::Directory(_) => EntryType::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type() == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type() == EntryType::Directory
    }

    /// Characters of a file, entry count of a directory.
    pub fn size(&self) -> usize {
        match self {
            Content::File(file) => file.size(),
            Content::Directory(dir) => dir.len(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Content::File(file) => file.name(),
            Content::Directory(dir) => dir.name(),
        }
    }

    pub fn as_dir(&self) -> Result<&Directory> {
        match self {
            Content::Directory(dir) => Ok(dir),
            Content::File(file) => Err(FsError::NotADirectory(file.name().to_string())),
        }
    }

    pub fn as_dir_mut(&mut self) -> Result<&mut Directory> {
        match self {
            Content::Directory(dir) => Ok(dir),
            Content::File(file) => Err(FsError::NotADirectory(file.name().to_string())),
        }
    }

    pub fn as_file(&self) -> Result<&PlainFile> {
        match self {
            Content::File(file) => Ok(file),
            Content::Directory(dir) => Err(FsError::IsADirectory(dir.name().to_string())),
        }
    }

    pub fn as_file_mut(&mut self) -> Result<&mut PlainFile> {
        match self {
            Content::File(file) => Ok(file),
            Content::Directory(dir) => Err(FsError::IsADirectory(dir.name().to_string())),
        }
    }
}
