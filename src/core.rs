use crate::FsError;
use crate::vfs::Listing;

/// Operations the command layer drives.
///
/// Names are single directory entries; paths are `/`-separated and may be absolute
/// (resolved from the root) or relative (resolved from the current directory).
pub trait FsBackend {
    /// Returns the prompt, trailing space included.
    fn prompt(&self) -> &str;

    /// Sets the prompt to `value` followed by a single space.
    fn set_prompt(&mut self, value: &str);

    /// Returns the absolute path of the current directory.
    fn pwd(&self) -> String;

    /// Changes the current directory. `None` or `/` goes to the root.
    /// The cursor is left untouched when an error is returned.
    fn cd(&mut self, path: Option<&str>) -> Result<()>;

    /// Returns the words of every file in `paths`, concatenated in order.
    fn cat<S: AsRef<str>>(&self, paths: &[S]) -> Result<Vec<String>>;

    /// Lists the directory at `path` (current directory if `None`).
    fn ls(&self, path: Option<&str>) -> Result<Listing>;

    /// Lists the directory at `path` and every directory below it, pre-order.
    fn lsr(&self, path: Option<&str>) -> Result<Vec<Listing>>;

    /// Creates the file `name` holding `words`, or overwrites an existing file.
    fn make<S: AsRef<str>>(&mut self, name: &str, words: &[S]) -> Result<()>;

    /// Creates an empty directory `name` in the current directory.
    fn mkdir(&mut self, name: &str) -> Result<()>;

    /// Removes the file or empty directory `name` from the current directory.
    fn rm(&mut self, name: &str) -> Result<()>;

    /// Removes `name` and everything below it from the current directory.
    fn rmr(&mut self, name: &str) -> Result<()>;
}

pub type Result<T> = std::result::Result<T, FsError>;

pub mod utils {
    use crate::FsError;

    pub const ROOT: &str = "/";
    pub const SELF_LINK: &str = ".";
    pub const PARENT_LINK: &str = "..";

    /// Splits `path` into its components. The flag is `true` for absolute paths.
    /// Empty components (`a//b`, trailing `/`) are dropped.
    pub fn split_path(path: &str) -> (bool, Vec<&str>) {
        let absolute = path.starts_with('/');
        let components = path.split('/').filter(|c| !c.is_empty()).collect();
        (absolute, components)
    }

    /// Joins directory path components into the printable form: `/` for the root,
    /// `/a/b` below it.
    pub fn join_path<S: AsRef<str>>(components: &[S]) -> String {
        match components {
            [] => ROOT.to_string(),
            [root] => root.as_ref().to_string(),
            [root, rest @ ..] => {
                let mut out = root.as_ref().to_string();
                let tail: Vec<&str> = rest.iter().map(|c| c.as_ref()).collect();
                out.push_str(&tail.join("/"));
                out
            }
        }
    }

    pub fn is_back_reference(name: &str) -> bool {
        name == SELF_LINK || name == PARENT_LINK
    }

    /// Checks that `name` can denote an owned entry of a directory.
    pub fn validate_name(name: &str) -> Result<(), FsError> {
        if name.is_empty() || name.contains('/') || is_back_reference(name) {
            return Err(FsError::InvalidName(name.to_string()));
        }
        Ok(())
    }

}
