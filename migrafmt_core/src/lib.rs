//! Plan model and migration-tool formatters shared by `migrafmt` and its CLI.

pub mod filename;
pub mod formatter;
pub mod plan;
