use crate::formatter::{Direction, FormatterKind};
use regex::Regex;
use thiserror::Error;

/// An Error occurred while reading migration file names
#[derive(Debug, Error)]
pub enum FilenameError {
    #[error("invalid regex pattern")]
    InvalidRegex(#[from] regex::Error),
}

/// `{ts}_{name}.up.sql` and `{ts}_{name}.down.sql`.
pub static GOLANG_MIGRATE_FILENAME_PATTERN: &str =
    r"^(?P<version>[0-9]{14})_(?P<name>.+)\.(?P<direction>up|down)\.sql$";

/// `{ts}_{name}.sql`, up and down sections live in the same file.
pub static GOOSE_FILENAME_PATTERN: &str = r"^(?P<version>[0-9]{14})_(?P<name>.+)\.sql$";

/// `V{ts}__{name}.sql` for versioned scripts and `U{ts}__{name}.sql` for undo scripts.
pub static FLYWAY_FILENAME_PATTERN: &str =
    r"^(?P<direction>[VU])(?P<version>[0-9]{14})__(?P<name>.+)\.sql$";

/// `{ts}_{name}.sql` holding changesets with inline rollbacks.
pub static LIQUIBASE_FILENAME_PATTERN: &str = r"^(?P<version>[0-9]{14})_(?P<name>.+)\.sql$";

impl FormatterKind {
    pub fn filename_pattern(self) -> &'static str {
        match self {
            FormatterKind::GolangMigrate => GOLANG_MIGRATE_FILENAME_PATTERN,
            FormatterKind::Goose => GOOSE_FILENAME_PATTERN,
            FormatterKind::Flyway => FLYWAY_FILENAME_PATTERN,
            FormatterKind::Liquibase => LIQUIBASE_FILENAME_PATTERN,
        }
    }
}

/// A file name decomposed according to one tool's naming scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationFileName {
    pub file_name: String,
    pub version: String,
    pub name: String,
    /// `None` for tools keeping both directions in one file.
    pub direction: Option<Direction>,
}

impl std::fmt::Display for MigrationFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.version, self.name)?;
        if let Some(direction) = self.direction {
            write!(f, " ({})", direction)?;
        }
        Ok(())
    }
}

fn parse_direction(kind: FormatterKind, value: &str) -> Option<Direction> {
    match (kind, value) {
        (FormatterKind::GolangMigrate, "up") | (FormatterKind::Flyway, "V") => Some(Direction::Up),
        (FormatterKind::GolangMigrate, "down") | (FormatterKind::Flyway, "U") => {
            Some(Direction::Down)
        }
        _ => None,
    }
}

/// Pick the names following `kind`'s naming scheme, ordered by version then name.
///
/// Names that do not match are skipped.
pub fn parse_migration_files<'a>(
    file_names: impl IntoIterator<Item = &'a str>,
    kind: FormatterKind,
) -> Result<Vec<MigrationFileName>, FilenameError> {
    let regex = Regex::new(kind.filename_pattern())?;
    let mut files: Vec<MigrationFileName> = file_names
        .into_iter()
        .filter_map(|file_name| {
            let captures = regex.captures(file_name)?;
            Some(MigrationFileName {
                file_name: file_name.to_string(),
                version: captures.name("version")?.as_str().to_string(),
                name: captures.name("name")?.as_str().to_string(),
                direction: captures
                    .name("direction")
                    .and_then(|m| parse_direction(kind, m.as_str())),
            })
        })
        .collect();
    files.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.direction.cmp(&b.direction))
    });
    Ok(files)
}
