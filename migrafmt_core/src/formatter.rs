mod flyway;
mod golang_migrate;
mod goose;
mod liquibase;

pub use flyway::FlywayFormatter;
pub use golang_migrate::GolangMigrateFormatter;
pub use goose::GooseFormatter;
pub use liquibase::LiquibaseFormatter;

use crate::plan::{Change, Plan};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// Length of a rendered `YYYYMMDDHHMMSS` timestamp.
pub const TIMESTAMP_LEN: usize = 14;

/// Layout of migration versions, shared by rendering and parsing.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year][month][day][hour][minute][second]");

/// An Error occurred while rendering a plan
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid plan: name must not be empty")]
    EmptyName,

    #[error("invalid plan `{name}`: name must be usable as a single file name component")]
    NameNotFileSafe { name: String },

    #[error("invalid plan `{name}`: marked reversible but change #{index} has no reverse statement")]
    MissingReverse { name: String, index: usize },

    #[error("invalid plan `{name}`: every change has a reverse statement but the plan is marked irreversible")]
    NotMarkedReversible { name: String },

    #[error("cannot render migration version: {0}")]
    Timestamp(String),
}

impl FormatError {
    /// True for every error caused by an ill-formed plan.
    pub fn is_invalid_plan(&self) -> bool {
        !matches!(self, FormatError::Timestamp(_))
    }
}

/// A migration tool name that no formatter answers to
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown formatter `{kind}` (expected one of golang-migrate, goose, flyway, liquibase)")]
pub struct UnknownFormatterError {
    pub kind: String,
}

/// Which half of a migration a statement block belongs to.
#[derive(Ord, PartialOrd, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Source of the instant stamped into rendered file names.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in UTC.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a single instant.
#[derive(Copy, Clone, Debug)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Render an instant as the 14-digit `YYYYMMDDHHMMSS` migration version.
pub fn timestamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.format(TIMESTAMP_FORMAT)
}

/// A rendered migration file, ready to be written byte for byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationFile {
    name: String,
    content: String,
}

impl MigrationFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        MigrationFile {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (String, String) {
        (self.name, self.content)
    }
}

impl std::fmt::Display for MigrationFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.content.len())
    }
}

/// Converts a plan into the files expected by one migration tool.
pub trait Formatter: Send + Sync {
    /// Clock read once per [`Formatter::format`] call.
    fn clock(&self) -> &dyn Clock;

    /// Render an already validated plan using `version` as the timestamp.
    fn render(&self, plan: &Plan, version: &str) -> Vec<MigrationFile>;

    fn format(&self, plan: &Plan) -> Result<Vec<MigrationFile>, FormatError> {
        plan.validate()?;
        let version = timestamp(self.clock().now())
            .map_err(|err| FormatError::Timestamp(err.to_string()))?;
        let files = self.render(plan, &version);
        log::debug!("rendered plan {} into {} file(s)", plan, files.len());
        Ok(files)
    }
}

/// Append the rendering of a single change for the given direction.
///
/// Down blocks of changes without a reverse statement render as nothing.
pub fn write_block(out: &mut String, change: &Change, direction: Direction) {
    match direction {
        Direction::Up => {
            if let Some(comment) = change.comment() {
                out.push_str("-- ");
                out.push_str(comment);
                out.push('\n');
            }
            out.push_str(change.cmd());
            out.push_str(";\n");
        }
        Direction::Down => {
            let Some(reverse) = change.reverse() else {
                return;
            };
            if let Some(comment) = change.comment() {
                out.push_str("-- reverse: ");
                out.push_str(comment);
                out.push('\n');
            }
            out.push_str(reverse);
            out.push_str(";\n");
        }
    }
}

/// Render every change of the plan. Down sections walk the changes backwards.
pub fn render_section(changes: &[Change], direction: Direction) -> String {
    let mut out = String::new();
    match direction {
        Direction::Up => changes
            .iter()
            .for_each(|change| write_block(&mut out, change, direction)),
        Direction::Down => changes
            .iter()
            .rev()
            .for_each(|change| write_block(&mut out, change, direction)),
    }
    out
}

/// Supported migration tool styles.
#[derive(Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FormatterKind {
    #[default]
    GolangMigrate,
    Goose,
    Flyway,
    Liquibase,
}

impl FormatterKind {
    pub const ALL: [FormatterKind; 4] = [
        FormatterKind::GolangMigrate,
        FormatterKind::Goose,
        FormatterKind::Flyway,
        FormatterKind::Liquibase,
    ];

    /// Formatter stamping files with the current UTC time.
    pub fn formatter(self) -> Box<dyn Formatter> {
        self.formatter_with_clock(Arc::new(SystemClock))
    }

    pub fn formatter_with_clock(self, clock: Arc<dyn Clock>) -> Box<dyn Formatter> {
        match self {
            FormatterKind::GolangMigrate => Box::new(GolangMigrateFormatter::with_clock(clock)),
            FormatterKind::Goose => Box::new(GooseFormatter::with_clock(clock)),
            FormatterKind::Flyway => Box::new(FlywayFormatter::with_clock(clock)),
            FormatterKind::Liquibase => Box::new(LiquibaseFormatter::with_clock(clock)),
        }
    }

    /// Naming scheme of the forward file.
    pub fn up_file_template(self) -> &'static str {
        match self {
            FormatterKind::GolangMigrate => "{ts}_{name}.up.sql",
            FormatterKind::Goose | FormatterKind::Liquibase => "{ts}_{name}.sql",
            FormatterKind::Flyway => "V{ts}__{name}.sql",
        }
    }

    /// Naming scheme of the reverse file, if the tool keeps one apart.
    pub fn down_file_template(self) -> Option<&'static str> {
        match self {
            FormatterKind::GolangMigrate => Some("{ts}_{name}.down.sql"),
            FormatterKind::Flyway => Some("U{ts}__{name}.sql"),
            FormatterKind::Goose | FormatterKind::Liquibase => None,
        }
    }
}

impl FromStr for FormatterKind {
    type Err = UnknownFormatterError;

    fn from_str(s: &str) -> Result<FormatterKind, UnknownFormatterError> {
        match s {
            "golang-migrate" => Ok(FormatterKind::GolangMigrate),
            "goose" => Ok(FormatterKind::Goose),
            "flyway" => Ok(FormatterKind::Flyway),
            "liquibase" => Ok(FormatterKind::Liquibase),
            _ => Err(UnknownFormatterError { kind: s.into() }),
        }
    }
}

impl std::fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatterKind::GolangMigrate => write!(f, "golang-migrate"),
            FormatterKind::Goose => write!(f, "goose"),
            FormatterKind::Flyway => write!(f, "flyway"),
            FormatterKind::Liquibase => write!(f, "liquibase"),
        }
    }
}
