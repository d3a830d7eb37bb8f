//! YAML plan files accepted by `migrafmt render`.

use crate::cli::CliError;
use migrafmt::Plan;
use std::path::Path;

/// Parse a plan. `reversible` is derived from the changes when left out.
pub fn parse_plan(yaml: &str) -> Result<Plan, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

pub fn load_plan(path: &Path) -> Result<Plan, CliError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_plan(&yaml).map_err(|source| CliError::InvalidPlanFile {
        path: path.to_path_buf(),
        source,
    })
}
