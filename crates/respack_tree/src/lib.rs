//! This library builds in-memory resource trees from zip resource packs and layers them on top of
//! each other.
//!
//! # Resource Trees
//!
//! A resource pack is a zip archive whose entries are named by slash separated relative paths,
//! such as `assets/minecraft/textures/block/stone.png`. This crate turns the flat list of entries
//! into a hierarchy of [`Folder`]s, each holding named sub-folders and named [`FileEntry`] buffers
//! with the decompressed content.
//!
//! ## Entry Names
//!
//! | Entry name                 | Segments                         | Meaning                        |
//! |----------------------------|----------------------------------|--------------------------------|
//! | `a/b/c.png`                | `["a", "b", "c.png"]`            | file `c.png` in folder `a/b`   |
//! | `/a/b.png`                 | `["a", "b.png"]`                 | a leading slash is ignored     |
//! | `a/b/`                     | `["a", "b", ""]`                 | directory marker for `a/b`     |
//! | `a`                        | `["a"]`                          | file `a` at the root           |
//!
//! Folders implied by a file's path are created even when the archive has no directory marker for
//! them. Files and folders live in separate namespaces, so `a` and `a/` may both exist.
//!
//! ## Importing
//!
//! [`ResourceTree::from_zip`] validates the path (non-empty, a regular file, `.zip` extension by
//! default), opens the archive, and imports every entry. The import is best effort: an entry that
//! cannot be read is reported through the [`report::Reporter`] that was passed in and the import
//! carries on with the next entry. The returned [`build::BuildResult`] carries both the tree and a
//! flag telling whether everything was read.
//!
//! ## Layering
//!
//! Packs are usually stacked, with a user pack overriding only some of the files of a vanilla
//! pack. [`Folder::merge_from_base`] folds a lower priority tree into a higher priority one. The
//! higher priority tree always keeps what it has, the base only contributes missing paths. The base
//! can be passed by reference, which clones what is taken, or by value, which moves it.
//!
//! ```no_run
//! use respack_tree::{build::BuildOptions, report::Collector, ResourceTree};
//!
//! let mut collector = Collector::default();
//! let result = ResourceTree::from_layered_zips(
//!     ["my_pack.zip", "vanilla.zip"],
//!     &BuildOptions::default(),
//!     &mut collector,
//! );
//!
//! for report in collector.reports() {
//!     eprintln!("{}: {}", report.severity, report.message);
//! }
//! let stone = result.tree.file("assets/minecraft/textures/block/stone.png");
//! ```
//!

pub mod archive;
pub mod build;
pub mod error;
pub mod merge;
pub mod path;
pub mod report;
pub mod tree;

pub use archive::Archive;
pub use build::{BuildOptions, BuildResult};
pub use merge::Layer;
pub use tree::{FileEntry, Folder, ResourceTree};
