mod directory;
mod entry;
mod inode;
mod mem_fs;
mod plain_file;
mod table;
pub mod traverse;

pub use directory::Directory;
pub use entry::{Content, EntryType};
pub use inode::{IdAllocator, Inode, InodeId};
pub use mem_fs::MemFS;
pub use plain_file::PlainFile;
pub use table::InodeTable;
pub use traverse::{ListEntry, Listing};
