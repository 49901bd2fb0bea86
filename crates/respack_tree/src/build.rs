//! Building resource trees from archives
//!

use bon::Builder;
use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
};
use tracing::{debug, instrument};
use zip::ZipArchive;

use crate::{
    archive::Archive,
    error::{Error, Result},
    path::{is_directory_marker, split_by_slash},
    report::{Reporter, Severity},
    tree::{Folder, ResourceTree},
};

/// Options for how archives are validated before being imported
#[derive(Debug, Clone, Builder)]
pub struct BuildOptions {
    /// The extension, without the leading dot, that archive filenames must carry
    #[builder(into, default = String::from("zip"))]
    pub extension: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The outcome of importing one archive
///
/// `success` is false when the archive was rejected or when any entry failed to read. In the
/// latter case `tree` still contains every entry that could be read.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// The imported tree, possibly partial or empty
    pub tree: ResourceTree,
    /// Whether every step of the import succeeded
    pub success: bool,
}

impl BuildResult {
    fn failed() -> Self {
        Self::default()
    }

    /// Split into the tree and the success flag
    pub fn into_parts(self) -> (ResourceTree, bool) {
        (self.tree, self.success)
    }
}

impl Folder {
    /// Validate, open and import a zip archive from disk.
    ///
    /// Rejected or unreadable archives produce an empty tree. Entries that fail to read are
    /// reported and skipped, the rest of the archive is still imported.
    ///
    /// ```no_run
    /// use respack_tree::{build::BuildOptions, report::TracingReporter, ResourceTree};
    ///
    /// let (tree, ok) =
    ///     ResourceTree::from_zip("vanilla.zip", &BuildOptions::default(), &mut TracingReporter)
    ///         .into_parts();
    /// if !ok {
    ///     eprintln!("vanilla.zip was only partially imported");
    /// }
    /// println!("{} files", tree.file_count());
    /// ```
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_zip<R: Reporter + ?Sized>(
        path: impl AsRef<Path>,
        options: &BuildOptions,
        reporter: &mut R,
    ) -> BuildResult {
        let path = path.as_ref();

        let mut zip = match validate(path, options).and_then(|_| open_zip(path)) {
            Ok(zip) => zip,
            Err(err) => {
                reporter.report_error(&err);
                return BuildResult::failed();
            }
        };

        let mut tree = Folder::default();
        let success = tree.import_entries(&mut zip, reporter);
        BuildResult { tree, success }
    }

    /// Import a zip archive from any seekable reader, skipping filename validation.
    #[instrument(skip_all)]
    pub fn from_zip_reader<R: Read + Seek, P: Reporter + ?Sized>(
        reader: R,
        reporter: &mut P,
    ) -> BuildResult {
        let mut zip = match ZipArchive::new(reader) {
            Ok(zip) => zip,
            Err(err) => {
                reporter.report_error(&Error::from(err));
                return BuildResult::failed();
            }
        };

        let mut tree = Folder::default();
        let success = tree.import_entries(&mut zip, reporter);
        BuildResult { tree, success }
    }

    /// Import every entry of an opened archive into this folder.
    ///
    /// Returns false if at least one entry could not be read. Failures are reported and do not
    /// stop the remaining entries from being imported.
    pub fn import_entries<A: Archive + ?Sized, R: Reporter + ?Sized>(
        &mut self,
        archive: &mut A,
        reporter: &mut R,
    ) -> bool {
        let mut success = true;

        for index in 0..archive.len() {
            let Some(name) = archive.name_for_index(index).map(str::to_owned) else {
                reporter.report_error(&Error::MissingEntryName(index));
                success = false;
                continue;
            };

            if name.is_empty() {
                reporter.report(
                    Severity::Warning,
                    &format!("skipping entry with an empty name at index {index}"),
                );
                continue;
            }

            debug!("importing {}", name);

            let segments = split_by_slash(&name);
            let Some((file_name, parents)) = segments.split_last() else {
                continue;
            };

            let folder = parents
                .iter()
                .fold(&mut *self, |folder, segment| folder.folder_entry(segment));

            if is_directory_marker(&name) {
                continue;
            }

            let dest = folder.files.entry((*file_name).to_owned()).or_default();
            dest.clear();

            if let Err(err) = read_entry(archive, index, &name, dest) {
                reporter.report_error(&err);
                success = false;
            }
        }

        success
    }

    /// Build several archives and layer them, the first path having the highest priority.
    ///
    /// The result is successful only if every archive imported fully. A rejected archive contributes
    /// nothing to the merged tree.
    pub fn from_layered_zips<P, R>(
        paths: impl IntoIterator<Item = P>,
        options: &BuildOptions,
        reporter: &mut R,
    ) -> BuildResult
    where
        P: AsRef<Path>,
        R: Reporter + ?Sized,
    {
        let mut merged = BuildResult {
            tree: Folder::default(),
            success: true,
        };

        for path in paths {
            let layer = Self::from_zip(path, options, reporter);
            merged.success &= layer.success;
            merged.tree.merge_from_base(layer.tree);
        }

        merged
    }
}

fn validate(path: &Path, options: &BuildOptions) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::EmptyPath);
    }

    if !path.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    if path.extension().and_then(|e| e.to_str()) != Some(options.extension.as_str()) {
        return Err(Error::WrongExtension {
            path: path.to_path_buf(),
            expected: options.extension.clone(),
        });
    }

    Ok(())
}

fn open_zip(path: &Path) -> Result<ZipArchive<File>> {
    File::open(path)
        .map_err(zip::result::ZipError::from)
        .and_then(ZipArchive::new)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn read_entry<A: Archive + ?Sized>(
    archive: &mut A,
    index: usize,
    name: &str,
    dest: &mut Vec<u8>,
) -> Result<()> {
    let entry = archive.by_index(index).map_err(|source| Error::EntryOpen {
        index,
        name: name.to_owned(),
        source: Box::new(source),
    })?;

    let expected = entry.size();

    let actual = entry
        .take(expected)
        .read_to_end(dest)
        .map_err(|source| Error::EntryRead {
            index,
            name: name.to_owned(),
            source,
        })? as u64;

    if actual < expected {
        return Err(Error::EntryTruncated {
            index,
            name: name.to_owned(),
            expected,
            actual,
        });
    }

    Ok(())
}
