//! Layering resource trees on top of each other
//!
//! A merge folds a lower priority *base* into a higher priority recipient. Anything the recipient
//! already has is kept untouched and the base only fills in the gaps:
//!
//! - a file missing in the recipient is taken from the base, a file present in both is kept from
//!   the recipient;
//! - a folder missing in the recipient is taken from the base as a whole, a folder present in both
//!   is merged recursively.
//!
//! The base is either borrowed, in which case the nodes it contributes are cloned, or owned, in
//! which case they are moved over and the base is consumed.
//!
//! ```
//! use respack_tree::{FileEntry, ResourceTree};
//!
//! let mut top = ResourceTree::default();
//! top.files.insert("a.txt".into(), FileEntry::new(b"top".to_vec()));
//!
//! let mut base = ResourceTree::default();
//! base.files.insert("a.txt".into(), FileEntry::new(b"base".to_vec()));
//! base.files.insert("b.txt".into(), FileEntry::new(b"base".to_vec()));
//!
//! top.merge_from_base(&base);
//! assert_eq!(top.files["a.txt"].as_slice(), b"top");
//! assert_eq!(top.files["b.txt"].as_slice(), b"base");
//! ```

use itertools::Either;
use std::borrow::Cow;
use tracing::trace;

use crate::tree::{FileEntry, Folder, ResourceTree};

/// A tree that can be merged as a base, either borrowed or owned
#[derive(Debug, Clone)]
pub struct Layer<'a>(Cow<'a, Folder>);

impl<'a> From<&'a Folder> for Layer<'a> {
    fn from(value: &'a Folder) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<Folder> for Layer<'_> {
    fn from(value: Folder) -> Self {
        Self(Cow::Owned(value))
    }
}

fn borrowed<'a, T: Clone>((name, node): (&'a String, &'a T)) -> (Cow<'a, str>, Cow<'a, T>) {
    (Cow::Borrowed(name.as_str()), Cow::Borrowed(node))
}

fn owned<'a, T: Clone>((name, node): (String, T)) -> (Cow<'a, str>, Cow<'a, T>) {
    (Cow::Owned(name), Cow::Owned(node))
}

impl<'a> Layer<'a> {
    /// Split into the files and folders directly inside the layer
    #[allow(clippy::type_complexity)]
    fn into_children(
        self,
    ) -> (
        impl Iterator<Item = (Cow<'a, str>, Cow<'a, FileEntry>)>,
        impl Iterator<Item = (Cow<'a, str>, Cow<'a, Folder>)>,
    ) {
        match self.0 {
            Cow::Borrowed(folder) => (
                Either::Left(folder.files.iter().map(borrowed)),
                Either::Left(folder.folders.iter().map(borrowed)),
            ),
            Cow::Owned(folder) => (
                Either::Right(folder.files.into_iter().map(owned)),
                Either::Right(folder.folders.into_iter().map(owned)),
            ),
        }
    }
}

impl Folder {
    /// Fill in everything this tree lacks from a lower priority `base`.
    ///
    /// Passing `&base` clones what is taken from it, passing `base` by value moves it instead.
    pub fn merge_from_base<'a>(&mut self, base: impl Into<Layer<'a>>) {
        self.overlay(base.into())
    }

    fn overlay(&mut self, base: Layer<'_>) {
        let (files, folders) = base.into_children();

        for (name, file) in files {
            if !self.files.contains_key(name.as_ref()) {
                trace!("taking file {} from base", name);
                self.files.insert(name.into_owned(), file.into_owned());
            }
        }

        for (name, folder) in folders {
            match self.folders.get_mut(name.as_ref()) {
                Some(existing) => existing.overlay(Layer(folder)),
                None => {
                    trace!("taking folder {} from base", name);
                    self.folders.insert(name.into_owned(), folder.into_owned());
                }
            }
        }
    }

    /// Merge layers given from the highest to the lowest priority into a single tree
    pub fn from_layers<'a, L: Into<Layer<'a>>>(layers: impl IntoIterator<Item = L>) -> ResourceTree {
        layers
            .into_iter()
            .fold(ResourceTree::default(), |mut merged, layer| {
                merged.merge_from_base(layer);
                merged
            })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::tree::{FileEntry, Folder};

    fn tree(files: &[(&str, &str)]) -> Folder {
        let mut root = Folder::default();
        for (path, content) in files {
            let (parents, name) = match path.rsplit_once('/') {
                Some((parents, name)) => (Some(parents), name),
                None => (None, *path),
            };
            let folder = parents
                .into_iter()
                .flat_map(|p| p.split('/'))
                .fold(&mut root, |folder, segment| folder.folder_entry(segment));
            folder
                .files
                .insert(name.to_owned(), FileEntry::new(content.as_bytes().to_vec()));
        }
        root
    }

    fn content(root: &Folder, path: &str) -> Option<String> {
        root.file(path)
            .map(|f| String::from_utf8_lossy(f.as_slice()).into_owned())
    }

    #[test]
    fn recipient_wins_on_conflict() {
        let mut top = tree(&[("a/b.txt", "top"), ("c.txt", "top")]);
        let base = tree(&[("a/b.txt", "base"), ("c.txt", "base")]);

        top.merge_from_base(&base);

        assert_eq!(content(&top, "a/b.txt").as_deref(), Some("top"));
        assert_eq!(content(&top, "c.txt").as_deref(), Some("top"));
    }

    #[test]
    fn base_fills_missing_paths() {
        let mut top = tree(&[("a/b.txt", "top")]);
        let base = tree(&[("a/c.txt", "base"), ("d/e/f.txt", "base"), ("g.txt", "base")]);

        top.merge_from_base(&base);

        assert_eq!(content(&top, "a/b.txt").as_deref(), Some("top"));
        assert_eq!(content(&top, "a/c.txt").as_deref(), Some("base"));
        assert_eq!(content(&top, "d/e/f.txt").as_deref(), Some("base"));
        assert_eq!(content(&top, "g.txt").as_deref(), Some("base"));
        assert_eq!(top.file_count(), 4);
    }

    #[test]
    fn empty_folders_are_carried_over() {
        let mut top = Folder::default();
        let mut base = Folder::default();
        base.folder_entry("models").folder_entry("block");

        top.merge_from_base(&base);
        assert!(top.folder("models/block").is_some());
    }

    #[test]
    fn file_and_folder_namespaces_do_not_interact() {
        let mut top = tree(&[("a", "file")]);
        let base = tree(&[("a/b", "nested")]);

        top.merge_from_base(base);

        assert_eq!(content(&top, "a").as_deref(), Some("file"));
        assert_eq!(content(&top, "a/b").as_deref(), Some("nested"));
    }

    #[test]
    fn copy_and_move_agree() {
        let top = tree(&[("a/b.txt", "top"), ("x.txt", "top")]);
        let base = tree(&[("a/b.txt", "base"), ("a/c/d.txt", "base"), ("y.txt", "base")]);

        let mut copied = top.clone();
        copied.merge_from_base(&base);

        let mut moved = top;
        moved.merge_from_base(base.clone());

        assert_eq!(copied, moved);
    }

    #[test]
    fn copy_leaves_base_untouched() {
        let mut top = tree(&[("a/b.txt", "top")]);
        let base = tree(&[("a/b.txt", "base"), ("a/c.txt", "base")]);
        let snapshot = base.clone();

        top.merge_from_base(&base);
        assert_eq!(base, snapshot);
    }

    #[test]
    fn self_merge_is_idempotent() {
        let mut top = tree(&[("a/b.txt", "1"), ("a/c/d.txt", "2"), ("e.txt", "3")]);
        let copy = top.clone();

        top.merge_from_base(&copy);
        assert_eq!(top, copy);

        top.merge_from_base(copy.clone());
        assert_eq!(top, copy);
    }

    #[test]
    fn layers_resolve_by_priority() {
        let l0 = tree(&[("a.txt", "l0")]);
        let l1 = tree(&[("a.txt", "l1"), ("b.txt", "l1")]);
        let l2 = tree(&[("a.txt", "l2"), ("b.txt", "l2"), ("c/d.txt", "l2")]);

        let mut merged = l0.clone();
        merged.merge_from_base(&l1);
        merged.merge_from_base(&l2);

        assert_eq!(content(&merged, "a.txt").as_deref(), Some("l0"));
        assert_eq!(content(&merged, "b.txt").as_deref(), Some("l1"));
        assert_eq!(content(&merged, "c/d.txt").as_deref(), Some("l2"));

        assert_eq!(Folder::from_layers([l0, l1, l2]), merged);
    }
}
