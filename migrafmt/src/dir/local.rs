use super::{check_file_name, Dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A migration directory on the local file system.
#[derive(Clone, Debug)]
pub struct LocalDir {
    path: PathBuf,
}

impl LocalDir {
    /// Open an existing directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("`{}` is not a directory", path.display()),
            ));
        }
        Ok(LocalDir {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_path(&self, name: &str) -> io::Result<PathBuf> {
        check_file_name(name)?;
        Ok(self.path.join(name))
    }
}

impl Dir for LocalDir {
    fn write_file(&self, name: &str, content: &[u8]) -> io::Result<()> {
        fs::write(self.file_path(name)?, content)
    }

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.file_path(name)?)
    }

    fn entries(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
            let entry: DirEntry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            } else {
                log::warn!("skipping non UTF-8 file name {:?}", entry.file_name());
            }
        }
        names.sort();
        Ok(names)
    }
}
