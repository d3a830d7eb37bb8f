use crate::dir::Dir;
use crate::formatter::{FormatError, Formatter, FormatterKind, MigrationFile};
use crate::plan::Plan;
use std::collections::HashSet;
use thiserror::Error;

/// An Error occurred while writing a plan
#[derive(Debug, Error)]
pub enum WriterError {
    #[error(transparent)]
    Format(FormatError),

    #[error("migration file `{name}` already exists")]
    FileExists { name: String },

    #[error("formatter produced migration file `{name}` more than once")]
    DuplicateFile { name: String },

    #[error(transparent)]
    Io(std::io::Error),

    #[cfg(feature = "toml")]
    #[error("invalid writer config: {0}")]
    Config(toml::de::Error),
}

impl From<FormatError> for WriterError {
    fn from(err: FormatError) -> WriterError {
        WriterError::Format(err)
    }
}

impl From<std::io::Error> for WriterError {
    fn from(err: std::io::Error) -> WriterError {
        WriterError::Io(err)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterConfig {
    /// Migration tool whose file layout is produced.
    pub format: FormatterKind,

    /// Replace files already present in the directory instead of failing.
    pub allow_overwrite: bool,
}

impl WriterConfig {
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, WriterError> {
        toml::from_str(s).map_err(WriterError::Config)
    }
}

/// Writes rendered plans into a migration directory.
pub struct PlanWriter<D: Dir> {
    dir: D,
    formatter: Box<dyn Formatter>,
    allow_overwrite: bool,
}

impl<D: Dir> PlanWriter<D> {
    pub fn new(dir: D, formatter: Box<dyn Formatter>) -> Self {
        PlanWriter {
            dir,
            formatter,
            allow_overwrite: false,
        }
    }

    /// Writer using the formatter selected by `config` and the system clock.
    pub fn from_config(dir: D, config: &WriterConfig) -> Self {
        Self::new(dir, config.format.formatter()).allow_overwrite(config.allow_overwrite)
    }

    pub fn allow_overwrite(mut self, allow_overwrite: bool) -> Self {
        self.allow_overwrite = allow_overwrite;
        self
    }

    pub fn dir(&self) -> &D {
        &self.dir
    }

    pub fn into_dir(self) -> D {
        self.dir
    }

    /// Render `plan` without touching the directory.
    pub fn render(&self, plan: &Plan) -> Result<Vec<MigrationFile>, WriterError> {
        let files = self.formatter.format(plan)?;
        let mut seen = HashSet::new();
        for file in &files {
            if !seen.insert(file.name()) {
                return Err(WriterError::DuplicateFile {
                    name: file.name().to_string(),
                });
            }
        }
        Ok(files)
    }

    /// Render `plan` and store every resulting file. Returns the written names.
    ///
    /// Nothing is written unless the plan renders and no target file exists
    /// (or overwriting is allowed).
    pub fn write_plan(&self, plan: &Plan) -> Result<Vec<String>, WriterError> {
        let files = self.render(plan)?;
        if !self.allow_overwrite {
            let existing: HashSet<String> = self.dir.entries()?.into_iter().collect();
            if let Some(file) = files.iter().find(|f| existing.contains(f.name())) {
                return Err(WriterError::FileExists {
                    name: file.name().to_string(),
                });
            }
        }
        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let (name, content) = file.into_parts();
            self.dir.write_file(&name, content.as_bytes())?;
            log::debug!("wrote migration file {} ({} bytes)", name, content.len());
            written.push(name);
        }
        log::info!("plan {} written as {}", plan, written.join(", "));
        Ok(written)
    }
}
