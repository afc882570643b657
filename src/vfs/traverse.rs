//! Path resolution, listing and recursive removal.
//!
//! Everything here goes through `InodeTable` and `Directory` operations only, and
//! relies on the `NotADirectory` error to detect that a walk hit a regular file.

use std::fmt;

use tracing::debug;

use crate::Result;
use crate::core::utils;
use crate::vfs::{InodeId, InodeTable};

/// One line of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: InodeId,
    pub size: usize,
    pub name: String,
}

/// Listing of a single directory: its absolute path and its entries in
/// lexicographic order, `.` and `..` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub path: Vec<String>,
    pub entries: Vec<ListEntry>,
}

impl Listing {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", utils::join_path(&self.path))?;
        for entry in &self.entries {
            writeln!(f, "{:>6}  {:>6}  {}", entry.id, entry.size, entry.name)?;
        }
        Ok(())
    }
}

/// Resolves `path` starting at `start`, or at `root` when `path` is absolute.
///
/// Every component but the last must name a directory; the walk fails with
/// `NotADirectory` as soon as it would have to descend into a file, and with
/// `NotFound` on the first missing component.
pub fn resolve(table: &InodeTable, root: InodeId, start: InodeId, path: &str) -> Result<InodeId> {
    let (absolute, components) = utils::split_path(path);
    let mut current = if absolute { root } else { start };
    for component in components {
        current = table.dir(current)?.lookup(component)?;
    }
    Ok(current)
}

/// Lists the directory `dir`.
pub fn list(table: &InodeTable, dir: InodeId) -> Result<Listing> {
    let directory = table.dir(dir)?;
    let entries = directory
        .entries()
        .map(|(name, id)| -> Result<ListEntry> {
            Ok(ListEntry {
                id,
                size: table.size(id)?,
                name: name.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Listing {
        path: directory.path().to_vec(),
        entries,
    })
}

/// Lists `dir`, then every directory below it: parents before children, siblings in
/// lexicographic order. Files only show up in their parent's listing.
pub fn list_recursive(table: &InodeTable, dir: InodeId) -> Result<Vec<Listing>> {
    let mut listings = Vec::new();
    collect_listings(table, dir, &mut listings)?;
    Ok(listings)
}

fn collect_listings(table: &InodeTable, dir: InodeId, out: &mut Vec<Listing>) -> Result<()> {
    out.push(list(table, dir)?);
    for (_, id) in table.dir(dir)?.children() {
        if table.is_dir(id)? {
            collect_listings(table, id, out)?;
        }
    }
    Ok(())
}

/// Removes `name` from `dir`. A directory is emptied bottom-up first, so every
/// directory is unlinked only once it holds nothing but `.` and `..`.
pub fn remove_recursive(table: &mut InodeTable, dir: InodeId, name: &str) -> Result<()> {
    utils::validate_name(name)?;
    let target = table.lookup(dir, name)?;
    if table.is_dir(target)? {
        let children: Vec<(String, InodeId)> = table
            .dir(target)?
            .children()
            .map(|(child, id)| (child.to_string(), id))
            .collect();
        for (child, id) in children {
            if table.is_dir(id)? {
                remove_recursive(table, target, &child)?;
            } else {
                table.remove(target, &child)?;
            }
        }
    }
    debug!(dir, target, name, "removing subtree root");
    table.remove(dir, name)
}
