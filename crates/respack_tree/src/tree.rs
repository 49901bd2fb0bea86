//! Base types for the in-memory resource tree.

use derive_more::derive::{AsRef, Constructor, Deref, DerefMut, From};
use std::collections::BTreeMap;

use crate::path::split_by_slash;

/// The decompressed content of a single archive entry
#[derive(Constructor, Deref, DerefMut, From, AsRef, Debug, Default, Clone, PartialEq, Eq)]
pub struct FileEntry(Vec<u8>);

impl FileEntry {
    /// Unwrap and return the owned bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for FileEntry {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for FileEntry {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// A folder in the resource tree
///
/// Sub-folders and files are kept in separate namespaces, so a folder and a file may share a name
/// under the same parent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Folder {
    /// Child folders by name
    pub folders: BTreeMap<String, Folder>,

    /// Files directly inside this folder by name
    pub files: BTreeMap<String, FileEntry>,
}

/// The root folder of one imported or merged layer
pub type ResourceTree = Folder;

impl Folder {
    /// Create an empty folder
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this folder holds neither files nor folders
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Get the child folder with this name, creating it if missing
    pub fn folder_entry(&mut self, name: &str) -> &mut Folder {
        self.folders.entry(name.to_owned()).or_default()
    }

    /// Look up a folder by its slash separated path.
    ///
    /// An empty path, or `/`, resolves to this folder. A trailing slash is ignored, other empty
    /// segments name a folder called `""` just like they do when importing.
    pub fn folder(&self, path: &str) -> Option<&Folder> {
        let mut segments = split_by_slash(path);
        if segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        segments
            .into_iter()
            .try_fold(self, |folder, segment| folder.folders.get(segment))
    }

    /// Look up a file by its slash separated path
    pub fn file(&self, path: &str) -> Option<&FileEntry> {
        let segments = split_by_slash(path);
        let (name, parents) = segments.split_last()?;

        let mut folder = self;
        for segment in parents {
            folder = folder.folders.get(*segment)?;
        }
        folder.files.get(*name)
    }

    /// Number of files in this folder and every folder below it
    pub fn file_count(&self) -> usize {
        self.files.len() + self.folders.values().map(Folder::file_count).sum::<usize>()
    }

    /// Number of folders below this one, not counting itself
    pub fn folder_count(&self) -> usize {
        self.folders.len() + self.folders.values().map(Folder::folder_count).sum::<usize>()
    }

    /// Total size in bytes of every file in this folder and below
    pub fn total_size(&self) -> u64 {
        self.files.values().map(|f| f.len() as u64).sum::<u64>()
            + self.folders.values().map(Folder::total_size).sum::<u64>()
    }

    /// Depth first iterator over every file, yielding its full path and content.
    ///
    /// Files of a folder come before its sub-folders, each in name order.
    pub fn files(&self) -> Files<'_> {
        Files {
            stack: vec![(String::new(), self)],
            pending: Vec::new(),
        }
    }
}

/// Iterator returned by [`Folder::files`]
#[derive(Debug)]
pub struct Files<'a> {
    stack: Vec<(String, &'a Folder)>,
    pending: Vec<(String, &'a FileEntry)>,
}

impl<'a> Iterator for Files<'a> {
    type Item = (String, &'a FileEntry);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.pending.pop() {
                return Some(file);
            }

            let (prefix, folder) = self.stack.pop()?;
            self.pending.extend(
                folder
                    .files
                    .iter()
                    .rev()
                    .map(|(name, file)| (format!("{prefix}{name}"), file)),
            );
            self.stack.extend(
                folder
                    .folders
                    .iter()
                    .rev()
                    .map(|(name, child)| (format!("{prefix}{name}/"), child)),
            );
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{FileEntry, Folder};

    fn sample() -> Folder {
        let mut root = Folder::new();
        root.files.insert("pack.mcmeta".into(), FileEntry::from(b"{}".as_slice()));
        let block = root.folder_entry("textures").folder_entry("block");
        block.files.insert("stone.png".into(), FileEntry::new(vec![1, 2, 3]));
        block.files.insert("dirt.png".into(), FileEntry::new(vec![4]));
        root.folder_entry("textures").folder_entry("item");
        root
    }

    #[test]
    fn lookup_nested_paths() {
        let root = sample();

        assert_eq!(
            root.file("textures/block/stone.png").map(|f| f.as_slice()),
            Some([1u8, 2, 3].as_slice())
        );
        assert_eq!(root.file("/pack.mcmeta").map(|f| f.len()), Some(2));
        assert!(root.file("textures/block").is_none());
        assert!(root.file("textures/block/").is_none());

        assert!(root.folder("textures/item").is_some_and(Folder::is_empty));
        assert!(root.folder("textures/block/").is_some());
        assert_eq!(root.folder(""), Some(&root));
        assert!(root.folder("sounds").is_none());
    }

    #[test]
    fn folder_and_file_may_share_a_name() {
        let mut root = Folder::new();
        root.files.insert("a".into(), FileEntry::new(vec![9]));
        root.folder_entry("a")
            .files
            .insert("b".into(), FileEntry::new(vec![8]));

        assert_eq!(root.file("a").map(|f| f.to_vec()), Some(vec![9]));
        assert_eq!(root.file("a/b").map(|f| f.to_vec()), Some(vec![8]));
    }

    #[test]
    fn empty_segments_resolve_like_files() {
        let mut root = Folder::new();
        root.folder_entry("a")
            .folder_entry("")
            .folder_entry("b")
            .files
            .insert("c".into(), FileEntry::new(vec![7]));

        assert_eq!(root.file("a//b/c").map(|f| f.to_vec()), Some(vec![7]));
        assert!(root.folder("a//b").is_some_and(|b| b.files.contains_key("c")));
        assert!(root.folder("a//b/").is_some());
        assert!(root.folder("a/b").is_none());
        assert_eq!(root.folder("/"), Some(&root));
    }

    #[test]
    fn statistics() {
        let root = sample();
        assert_eq!(root.file_count(), 3);
        assert_eq!(root.folder_count(), 3);
        assert_eq!(root.total_size(), 6);
        assert!(!root.is_empty());
        assert!(Folder::new().is_empty());
    }

    #[test]
    fn files_iterates_depth_first_in_name_order() {
        let root = sample();
        let paths = root.files().map(|(path, _)| path).collect::<Vec<_>>();

        assert_eq!(
            paths,
            vec![
                "pack.mcmeta",
                "textures/block/dirt.png",
                "textures/block/stone.png",
            ]
        );
    }
}
