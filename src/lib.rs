//! An in-memory hierarchical file system driven by a small command shell.
//!
//! ### Overview
//!
//! `vfs-shell` keeps a tree of directories and regular files entirely in process
//! memory. Files hold a sequence of words; directories map entry names to inodes and
//! carry the usual `.` and `..` entries. A current directory cursor resolves relative
//! paths, and a thin command layer (`Shell`) turns lines such as `mkdir docs` or
//! `ls -R /` into calls on the `FsBackend` trait.
//!
//! **Key ideas**:
//! - **Arena storage**: inodes live in an `InodeTable` keyed by their id; directory
//!   entries hold ids, so the `.`/`..` cycles never keep anything alive.
//! - **Uniform kind errors**: structural operations on a file fail with
//!   `NotADirectory`, content operations on a directory with `IsADirectory`.
//! - **Deterministic output**: listings are ordered by entry name and inode ids are
//!   handed out in creation order.

mod config;
mod core;
mod error;
mod logging;
mod shell;
mod vfs;

pub use config::ShellConfig;
pub use crate::core::{FsBackend, Result, utils};
pub use error::FsError;
pub use logging::{LOG_ENV, build_env_filter, init_logging};
pub use shell::{Command, Flow, Shell};
pub use vfs::{
    Content, Directory, EntryType, IdAllocator, Inode, InodeId, InodeTable, ListEntry,
    Listing, MemFS, PlainFile, traverse,
};
