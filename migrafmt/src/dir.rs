mod local;
mod mem;

pub use local::LocalDir;
pub use mem::MemDir;

use crate::filename::{parse_migration_files, FilenameError, MigrationFileName};
use crate::formatter::FormatterKind;
use std::io;
use std::path::{Component, Path};

/// A flat directory of migration files.
pub trait Dir: Send + Sync {
    /// Create or replace `name` with `content`.
    fn write_file(&self, name: &str, content: &[u8]) -> io::Result<()>;

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Names of the regular files stored directly in the directory, sorted.
    fn entries(&self) -> io::Result<Vec<String>>;

    fn contains(&self, name: &str) -> io::Result<bool> {
        Ok(self.entries()?.iter().any(|entry| entry == name))
    }
}

impl<D: Dir + ?Sized> Dir for &D {
    fn write_file(&self, name: &str, content: &[u8]) -> io::Result<()> {
        (**self).write_file(name, content)
    }

    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).read_file(name)
    }

    fn entries(&self) -> io::Result<Vec<String>> {
        (**self).entries()
    }
}

/// Accept only names naming a file directly inside a directory.
fn check_file_name(name: &str) -> io::Result<()> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single && !name.contains(&['/', '\\', '\0'][..]) {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid migration file name `{}`", name),
        ))
    }
}

/// An Error occurred while listing migration files
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Io(std::io::Error),

    #[error(transparent)]
    Filename(FilenameError),
}

impl From<std::io::Error> for ListError {
    fn from(err: std::io::Error) -> ListError {
        ListError::Io(err)
    }
}

impl From<FilenameError> for ListError {
    fn from(err: FilenameError) -> ListError {
        ListError::Filename(err)
    }
}

/// List the files of `dir` following `kind`'s naming scheme.
pub fn list_migrations(
    dir: &impl Dir,
    kind: FormatterKind,
) -> Result<Vec<MigrationFileName>, ListError> {
    let entries = dir.entries()?;
    Ok(parse_migration_files(
        entries.iter().map(String::as_str),
        kind,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_migrations_filters_by_kind() {
        let dir = MemDir::new();
        dir.write_file("V20240201112301__a.sql", b"").unwrap();
        dir.write_file("U20240201112301__a.sql", b"").unwrap();
        dir.write_file("20240201112301_b.up.sql", b"").unwrap();

        let flyway = list_migrations(&dir, FormatterKind::Flyway).unwrap();
        assert_eq!(flyway.len(), 2);
        assert!(flyway.iter().all(|f| f.name == "a"));

        let golang = list_migrations(&dir, FormatterKind::GolangMigrate).unwrap();
        assert_eq!(golang.len(), 1);
        assert_eq!(golang[0].name, "b");
    }

    #[test]
    fn file_names_are_single_components() {
        for name in ["", ".", "..", "../x.sql", "a/b.sql", "a\\b.sql", "x.sql/", "./x.sql"] {
            let err = check_file_name(name).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{name:?}");
        }
        assert!(check_file_name("20240201112301_users.up.sql").is_ok());
        assert!(check_file_name("V20240201112301__users.sql").is_ok());
    }

    #[test]
    fn contains_uses_entries() {
        let dir = MemDir::new();
        dir.write_file("x.sql", b"SELECT 1;\n").unwrap();
        assert!(dir.contains("x.sql").unwrap());
        assert!(!dir.contains("y.sql").unwrap());
    }
}
