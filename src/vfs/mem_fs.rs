//! This module provides the in-memory file system state: the inode table, the root
//! directory, the current directory cursor and the prompt.

use tracing::debug;

use crate::FsError;
use crate::config::DEFAULT_PROMPT;
use crate::core::utils::{self, PARENT_LINK, ROOT, SELF_LINK};
use crate::core::{FsBackend, Result};
use crate::vfs::{EntryType, InodeId, InodeTable, Listing, traverse};

/// A hierarchical file system living entirely in process memory.
///
/// ### Internal state
///
/// * `table` — every live inode, keyed by id. Directories refer to their entries by id.
/// * `root` — the root directory. Its `.` and `..` both point back at itself.
/// * `cwd` — the current directory cursor. Always a live directory.
/// * `prompt` — the prompt shown by the command layer.
///
/// ### Invariants
///
/// 1. Every directory other than the root holds `.` (itself) and `..` (its parent).
/// 2. A directory's path is the sequence of names from the root down to it, so
///    resolving that path from the root yields the directory again.
/// 3. Each inode other than the root is owned by exactly one entry not named `.`/`..`.
///
/// ### Example
///
/// ```
/// use vfs_shell::{FsBackend, MemFS};
///
/// let mut fs = MemFS::new();
/// fs.mkdir("docs").unwrap();
/// fs.cd(Some("docs")).unwrap();
/// fs.make("note", &["hello", "world"]).unwrap();
/// assert_eq!(fs.cat(&["note"]).unwrap(), ["hello", "world"]);
/// assert_eq!(fs.pwd(), "/docs");
/// ```
#[derive(Debug, Clone)]
pub struct MemFS {
    table: InodeTable,
    root: InodeId,
    cwd: InodeId,
    prompt: String,
}

impl MemFS {
    /// Creates a file system holding only the root directory, with the cursor on it.
    pub fn new() -> Self {
        let mut table = InodeTable::new();
        let root = table.create(EntryType::Directory);
        if let Ok(dir) = table.dir_mut(root) {
            dir.insert(PARENT_LINK, root);
            dir.insert(SELF_LINK, root);
            dir.set_path(vec![ROOT.to_string()]);
        }
        debug!(root, "file system initialized");
        Self {
            table,
            root,
            cwd: root,
            prompt: format!("{DEFAULT_PROMPT} "),
        }
    }

    pub fn root(&self) -> InodeId {
        self.root
    }

    pub fn cwd(&self) -> InodeId {
        self.cwd
    }

    pub fn table(&self) -> &InodeTable {
        &self.table
    }

    /// Resolves `path` against the current directory (or the root, if absolute).
    pub fn resolve(&self, path: &str) -> Result<InodeId> {
        traverse::resolve(&self.table, self.root, self.cwd, path)
    }

    /// Moves the cursor. An empty path or `/` goes to the root; anything else must
    /// resolve to a directory. On failure the cursor stays where it was.
    pub fn change_directory(&mut self, path: &str) -> Result<()> {
        let (_, components) = utils::split_path(path);
        let target = if components.is_empty() {
            self.root
        } else {
            let target = self.resolve(path)?;
            let node = self.table.get(target)?;
            if !node.content().is_dir() {
                return Err(FsError::NotADirectory(node.content().name().to_string()));
            }
            target
        };
        debug!(from = self.cwd, to = target, path, "cursor moved");
        self.cwd = target;
        Ok(())
    }

    fn listing_target(&self, path: Option<&str>) -> Result<InodeId> {
        match path {
            Some(path) => self.resolve(path),
            None => Ok(self.cwd),
        }
    }
}

impl Default for MemFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for MemFS {
    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn set_prompt(&mut self, value: &str) {
        self.prompt = format!("{value} ");
    }

    fn pwd(&self) -> String {
        self.table
            .dir(self.cwd)
            .map(|dir| utils::join_path(dir.path()))
            .unwrap_or_else(|_| ROOT.to_string())
    }

    fn cd(&mut self, path: Option<&str>) -> Result<()> {
        self.change_directory(path.unwrap_or(ROOT))
    }

    fn cat<S: AsRef<str>>(&self, paths: &[S]) -> Result<Vec<String>> {
        let mut words = Vec::new();
        for path in paths {
            let id = self.resolve(path.as_ref())?;
            words.extend(self.table.file(id)?.read().iter().cloned());
        }
        Ok(words)
    }

    fn ls(&self, path: Option<&str>) -> Result<Listing> {
        let target = self.listing_target(path)?;
        traverse::list(&self.table, target)
    }

    fn lsr(&self, path: Option<&str>) -> Result<Vec<Listing>> {
        let target = self.listing_target(path)?;
        traverse::list_recursive(&self.table, target)
    }

    fn make<S: AsRef<str>>(&mut self, name: &str, words: &[S]) -> Result<()> {
        utils::validate_name(name)?;
        let cwd = self.cwd;
        if let Ok(existing) = self.table.lookup(cwd, name) {
            if self.table.is_dir(existing)? {
                return Err(FsError::AlreadyExists(name.to_string()));
            }
        } else {
            self.table.create_file(cwd, name)?;
        }
        self.table.write_to_file(cwd, name, words)
    }

    fn mkdir(&mut self, name: &str) -> Result<()> {
        let cwd = self.cwd;
        let id = self.table.create_directory(cwd, name)?;
        self.table.init_links(cwd, id)
    }

    fn rm(&mut self, name: &str) -> Result<()> {
        self.table.remove(self.cwd, name)
    }

    fn rmr(&mut self, name: &str) -> Result<()> {
        traverse::remove_recursive(&mut self.table, self.cwd, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Shell, ShellConfig};

    /// Helper to create a pre-populated MemFS instance for testing
    fn setup_test_vfs() -> MemFS {
        let mut vfs = MemFS::new();
        vfs.mkdir("home").unwrap();
        vfs.mkdir("etc").unwrap();
        vfs.cd(Some("home")).unwrap();
        vfs.mkdir("user").unwrap();
        vfs.cd(Some("user")).unwrap();
        vfs.make("config.txt", &["Config", "content"]).unwrap();
        vfs.cd(None).unwrap();
        vfs.make("readme.md", &["Docs"]).unwrap();
        vfs
    }

    mod creations {
        use super::*;

        #[test]
        fn test_new_mem_fs() -> Result<()> {
            let vfs = MemFS::new();
            assert_eq!(vfs.root(), 1);
            assert_eq!(vfs.cwd(), vfs.root());
            assert_eq!(vfs.pwd(), "/");
            assert_eq!(vfs.prompt(), "% ");
            assert_eq!(vfs.prompt(), Shell::new(MemFS::new(), ShellConfig::default()).prompt());

            let root = vfs.table().dir(vfs.root())?;
            assert_eq!(root.lookup(".")?, vfs.root());
            assert_eq!(root.lookup("..")?, vfs.root());
            assert_eq!(root.len(), 2);
            Ok(())
        }

        #[test]
        fn test_set_prompt_appends_space() {
            let mut vfs = MemFS::new();
            vfs.set_prompt("$");
            assert_eq!(vfs.prompt(), "$ ");
        }
    }

    mod cd {
        use super::*;

        #[test]
        fn test_cd_relative_and_absolute() -> Result<()> {
            let mut vfs = setup_test_vfs();

            vfs.cd(Some("home/user"))?;
            assert_eq!(vfs.pwd(), "/home/user");

            vfs.cd(Some(".."))?;
            assert_eq!(vfs.pwd(), "/home");

            vfs.cd(Some("/etc"))?;
            assert_eq!(vfs.pwd(), "/etc");

            vfs.cd(Some("."))?;
            assert_eq!(vfs.pwd(), "/etc");
            Ok(())
        }

        #[test]
        fn test_cd_to_root() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd(Some("home/user"))?;
            vfs.cd(None)?;
            assert_eq!(vfs.cwd(), vfs.root());

            vfs.cd(Some("home"))?;
            vfs.cd(Some("/"))?;
            assert_eq!(vfs.cwd(), vfs.root());

            vfs.cd(Some(".."))?;
            assert_eq!(vfs.cwd(), vfs.root());
            Ok(())
        }

        #[test]
        fn test_cd_nonexistent_leaves_cursor() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd(Some("home"))?;
            let before = vfs.pwd();

            assert_eq!(
                vfs.cd(Some("nonexistent")),
                Err(FsError::NotFound("nonexistent".to_string()))
            );
            assert_eq!(vfs.pwd(), before);

            assert!(vfs.cd(Some("user/nonexistent")).is_err());
            assert_eq!(vfs.pwd(), before);
            Ok(())
        }

        #[test]
        fn test_cd_into_file() -> Result<()> {
            let mut vfs = setup_test_vfs();
            assert_eq!(
                vfs.cd(Some("readme.md")),
                Err(FsError::NotADirectory("readme.md".to_string()))
            );
            assert_eq!(vfs.cwd(), vfs.root());
            Ok(())
        }
    }

    mod content {
        use super::*;

        #[test]
        fn test_make_and_cat() -> Result<()> {
            let mut vfs = setup_test_vfs();
            assert_eq!(vfs.cat(&["readme.md"])?, ["Docs"]);
            assert_eq!(
                vfs.cat(&["readme.md", "home/user/config.txt"])?,
                ["Docs", "Config", "content"]
            );

            vfs.make::<&str>("empty", &[])?;
            assert!(vfs.cat(&["empty"])?.is_empty());
            Ok(())
        }

        #[test]
        fn test_make_overwrites_file() -> Result<()> {
            let mut vfs = setup_test_vfs();
            let id = vfs.resolve("readme.md")?;
            vfs.make("readme.md", &["New", "docs"])?;

            assert_eq!(vfs.resolve("readme.md")?, id);
            assert_eq!(vfs.cat(&["readme.md"])?, ["New", "docs"]);
            Ok(())
        }

        #[test]
        fn test_make_over_directory() {
            let mut vfs = setup_test_vfs();
            assert_eq!(
                vfs.make("home", &["x"]),
                Err(FsError::AlreadyExists("home".to_string()))
            );
            assert!(vfs.table().is_dir(vfs.resolve("home").unwrap()).unwrap());
        }

        #[test]
        fn test_cat_errors() {
            let vfs = setup_test_vfs();
            assert_eq!(
                vfs.cat(&["missing"]),
                Err(FsError::NotFound("missing".to_string()))
            );
            assert_eq!(
                vfs.cat(&["home"]),
                Err(FsError::IsADirectory("home".to_string()))
            );
            assert!(vfs.cat(&["readme.md", "home"]).is_err());
        }
    }

    mod mkdir {
        use super::*;

        #[test]
        fn test_mkdir_wires_links_and_path() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd(Some("home/user"))?;
            vfs.mkdir("projects")?;

            let id = vfs.resolve("projects")?;
            let dir = vfs.table().dir(id)?;
            assert_eq!(dir.path(), ["/", "home", "user", "projects"]);
            assert_eq!(dir.lookup(".")?, id);
            assert_eq!(dir.lookup("..")?, vfs.cwd());
            assert_eq!(vfs.resolve("/home/user/projects")?, id);
            Ok(())
        }

        #[test]
        fn test_mkdir_over_file() -> Result<()> {
            let mut vfs = MemFS::new();
            vfs.make::<&str>("f", &[])?;
            let before = vfs.ls(None)?;

            assert_eq!(vfs.mkdir("f"), Err(FsError::AlreadyExists("f".to_string())));
            assert_eq!(vfs.ls(None)?, before);
            Ok(())
        }

        #[test]
        fn test_mkdir_invalid_names() {
            let mut vfs = MemFS::new();
            assert!(vfs.mkdir("").is_err());
            assert!(vfs.mkdir("a/b").is_err());
            assert!(vfs.mkdir("..").is_err());
        }
    }

    mod ls {
        use super::*;

        #[test]
        fn test_ls_current_and_path() -> Result<()> {
            let mut vfs = setup_test_vfs();
            let names: Vec<_> = vfs.ls(None)?.names().map(str::to_string).collect();
            assert_eq!(names, [".", "..", "etc", "home", "readme.md"]);

            let home = vfs.ls(Some("home"))?;
            assert_eq!(home.path, ["/", "home"]);

            vfs.cd(Some("home/user"))?;
            let root = vfs.ls(Some("/"))?;
            assert_eq!(root.path, ["/"]);
            assert_eq!(vfs.pwd(), "/home/user");
            Ok(())
        }

        #[test]
        fn test_ls_errors() {
            let vfs = setup_test_vfs();
            assert_eq!(
                vfs.ls(Some("nope")),
                Err(FsError::NotFound("nope".to_string()))
            );
            assert_eq!(
                vfs.ls(Some("readme.md")),
                Err(FsError::NotADirectory("readme.md".to_string()))
            );
            assert!(vfs.lsr(Some("readme.md")).is_err());
        }

        #[test]
        fn test_lsr_covers_every_directory() -> Result<()> {
            let vfs = setup_test_vfs();
            let paths: Vec<_> = vfs
                .lsr(None)?
                .iter()
                .map(|l| utils::join_path(&l.path))
                .collect();
            assert_eq!(paths, ["/", "/etc", "/home", "/home/user"]);
            Ok(())
        }
    }

    mod rm {
        use super::*;

        #[test]
        fn test_rm_file_and_empty_dir() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.rm("readme.md")?;
            vfs.rm("etc")?;
            let names: Vec<_> = vfs.ls(None)?.names().map(str::to_string).collect();
            assert_eq!(names, [".", "..", "home"]);
            Ok(())
        }

        #[test]
        fn test_rm_non_empty_dir() -> Result<()> {
            let mut vfs = setup_test_vfs();
            let before = vfs.table().len();
            assert_eq!(
                vfs.rm("home"),
                Err(FsError::DirectoryNotEmpty("home".to_string()))
            );
            assert_eq!(vfs.table().len(), before);
            Ok(())
        }

        #[test]
        fn test_rm_cannot_unlink_cursor() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd(Some("etc"))?;
            assert!(vfs.rm(".").is_err());
            assert!(vfs.rmr("..").is_err());
            assert_eq!(vfs.pwd(), "/etc");
            Ok(())
        }

        #[test]
        fn test_rmr_frees_subtree() -> Result<()> {
            let mut vfs = setup_test_vfs();
            let user = vfs.resolve("home/user")?;
            let config = vfs.resolve("home/user/config.txt")?;

            vfs.rmr("home")?;

            assert!(vfs.resolve("home").is_err());
            assert!(!vfs.table().contains(user));
            assert!(!vfs.table().contains(config));
            // root, etc, readme.md
            assert_eq!(vfs.table().len(), 3);
            Ok(())
        }

        #[test]
        fn test_rmr_missing() {
            let mut vfs = setup_test_vfs();
            assert_eq!(
                vfs.rmr("ghost"),
                Err(FsError::NotFound("ghost".to_string()))
            );
        }
    }

    mod scenarios {
        use super::*;

        #[test]
        fn test_directory_lifecycle() -> Result<()> {
            let mut vfs = MemFS::new();
            vfs.mkdir("d")?;
            vfs.cd(Some("d"))?;
            vfs.make("f", &["hello"])?;
            assert_eq!(vfs.cat(&["f"])?.join(" "), "hello");

            vfs.cd(Some(".."))?;
            assert_eq!(vfs.rm("d"), Err(FsError::DirectoryNotEmpty("d".to_string())));

            vfs.rmr("d")?;
            assert!(vfs.ls(None)?.names().all(|name| name != "d"));
            Ok(())
        }

        #[test]
        fn test_ids_strictly_increase() -> Result<()> {
            let mut vfs = MemFS::new();
            vfs.mkdir("a")?;
            vfs.make::<&str>("b", &[])?;
            vfs.mkdir("c")?;
            let ids: Vec<_> = ["a", "b", "c"]
                .iter()
                .map(|name| vfs.resolve(name))
                .collect::<Result<_>>()?;
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            assert!(ids[0] > vfs.root());
            Ok(())
        }
    }
}
