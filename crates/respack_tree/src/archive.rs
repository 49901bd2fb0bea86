//! Types for reading entries out of an archive
//!
//! The tree builder only needs to enumerate entries by index, learn their names, and open a stream
//! over their decompressed bytes. [`Archive`] captures exactly that, and is implemented for
//! [`zip::ZipArchive`].

use std::{
    fmt::{self, Debug},
    io::{Read, Seek},
};

use zip::ZipArchive;

use crate::error::{Error, Result};

/// An opened entry of an archive
pub struct ArchiveEntry<'a> {
    size: u64,
    reader: Box<dyn Read + 'a>,
}

impl Debug for ArchiveEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ArchiveEntry({} bytes)", self.size)
    }
}

impl<'a> ArchiveEntry<'a> {
    /// Wrap a stream with the size it declares
    pub fn new(size: u64, reader: impl Read + 'a) -> Self {
        Self {
            size,
            reader: Box::new(reader),
        }
    }

    /// Get the size of the entry, in bytes, when uncompressed
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Read for ArchiveEntry<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

/// A source of named entries
pub trait Archive {
    /// Number of entries, including directory markers
    fn len(&self) -> usize;

    /// Whether the archive contains no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the full name of an entry, if it's present
    fn name_for_index(&self, index: usize) -> Option<&str>;

    /// Open an entry for reading
    fn by_index(&mut self, index: usize) -> Result<ArchiveEntry<'_>>;
}

impl<R: Read + Seek> Archive for ZipArchive<R> {
    fn len(&self) -> usize {
        ZipArchive::len(self)
    }

    fn name_for_index(&self, index: usize) -> Option<&str> {
        ZipArchive::name_for_index(self, index)
    }

    fn by_index(&mut self, index: usize) -> Result<ArchiveEntry<'_>> {
        let file = ZipArchive::by_index(self, index).map_err(Error::from)?;
        Ok(ArchiveEntry::new(file.size(), file))
    }
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Read, Write};

    use pretty_assertions::assert_eq;
    use zip::{write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};

    use super::Archive;
    use crate::error::Result;

    fn zip_with(entries: &[(&str, &[u8])]) -> Result<ZipArchive<Cursor<Vec<u8>>>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, data) in entries {
            writer.start_file(*name, options)?;
            writer.write_all(data)?;
        }
        let buffer = writer.finish()?;
        Ok(ZipArchive::new(buffer)?)
    }

    #[test]
    fn zip_entries_are_enumerable() -> Result<()> {
        let mut zip = zip_with(&[("a.txt", b"Hello World"), ("b/c.txt", b"World Hello")])?;

        assert_eq!(Archive::len(&zip), 2);
        assert_eq!(Archive::name_for_index(&zip, 1), Some("b/c.txt"));
        assert_eq!(Archive::name_for_index(&zip, 2), None);

        let mut entry = Archive::by_index(&mut zip, 0)?;
        assert_eq!(entry.size(), 11);

        let mut buffer = Vec::new();
        entry.read_to_end(&mut buffer)?;
        assert_eq!(buffer, b"Hello World");

        Ok(())
    }

    #[test]
    fn missing_index_is_an_error() -> Result<()> {
        let mut zip = zip_with(&[("a.txt", b"x")])?;
        assert!(Archive::by_index(&mut zip, 5).is_err());
        Ok(())
    }
}
