use super::{check_file_name, Dir};
use std::collections::BTreeMap;
use std::io;
use std::sync::RwLock;

/// An in-memory migration directory.
#[derive(Debug, Default)]
pub struct MemDir {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemDir {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "memory directory lock poisoned")
}

impl Dir for MemDir {
    fn write_file(&self, name: &str, content: &[u8]) -> io::Result<()> {
        check_file_name(name)?;
        let mut files = self.files.write().map_err(|_| poisoned())?;
        files.insert(name.to_string(), content.to_vec());
        Ok(())
    }

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        let files = self.files.read().map_err(|_| poisoned())?;
        files.get(name).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("migration file `{}` not found", name),
            )
        })
    }

    fn entries(&self) -> io::Result<Vec<String>> {
        let files = self.files.read().map_err(|_| poisoned())?;
        Ok(files.keys().cloned().collect())
    }
}
