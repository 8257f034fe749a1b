//! Whole-file text access, memory mapped when the `mmap` feature is on

use std::fs::File;
use std::path::{Path, PathBuf};

#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};

use crate::{Error, Result};

enum Contents {
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// An input file opened for line-oriented parsing
pub struct TextFile {
    path: PathBuf,
    contents: Contents,
}

impl TextFile {
    /// Open and map (or read) `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| Error::io(&path, e))?;
        let contents = Self::load(&path, file)?;
        Ok(Self { path, contents })
    }

    #[cfg(feature = "mmap")]
    fn load(path: &Path, file: File) -> Result<Contents> {
        let len = file.metadata().map_err(|e| Error::io(path, e))?.len();
        if len == 0 {
            // zero-length mappings are rejected by the OS
            return Ok(Contents::Owned(Vec::new()));
        }
        // SAFETY: the mapping is read-only and owned by `TextFile`, which
        // hands out borrows no longer than itself. Input files are not
        // expected to change while a run is in progress.
        let map = unsafe { MmapOptions::new().map(&file) }.map_err(|e| Error::io(path, e))?;
        Ok(Contents::Mapped(map))
    }

    #[cfg(not(feature = "mmap"))]
    fn load(path: &Path, file: File) -> Result<Contents> {
        use std::io::{BufReader, Read};
        let mut bytes = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io(path, e))?;
        Ok(Contents::Owned(bytes))
    }

    /// Path the file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file bytes
    pub fn bytes(&self) -> &[u8] {
        match &self.contents {
            #[cfg(feature = "mmap")]
            Contents::Mapped(map) => &map[..],
            Contents::Owned(bytes) => &bytes[..],
        }
    }

    /// File contents as UTF-8 text
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(self.bytes())
            .map_err(|e| Error::format(&self.path, format!("not valid UTF-8 text: {e}")))
    }

    /// Non-blank lines with their 1-based line numbers
    pub fn lines(&self) -> Result<impl Iterator<Item = (usize, &str)>> {
        Ok(self
            .text()?
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty()))
    }
}

impl std::fmt::Debug for TextFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFile")
            .field("path", &self.path)
            .field("len", &self.bytes().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lines_skip_blank_and_keep_numbers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1 2\n\n  \n3 4\r\n").unwrap();
        let text = TextFile::open(file.path()).unwrap();
        let lines: Vec<(usize, &str)> = text.lines().unwrap().collect();
        assert_eq!(lines, vec![(1, "1 2"), (4, "3 4")]);
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let text = TextFile::open(file.path()).unwrap();
        assert_eq!(text.bytes().len(), 0);
        assert_eq!(text.lines().unwrap().count(), 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = TextFile::open(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, b'\n']).unwrap();
        let text = TextFile::open(file.path()).unwrap();
        assert!(matches!(text.text(), Err(Error::Format { .. })));
    }
}
