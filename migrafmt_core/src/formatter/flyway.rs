use super::{render_section, Clock, Direction, Formatter, MigrationFile, SystemClock};
use crate::plan::Plan;
use std::sync::Arc;

/// Formatter for Flyway: a versioned `V` script and an optional `U` undo script.
#[derive(Clone)]
pub struct FlywayFormatter {
    clock: Arc<dyn Clock>,
}

impl FlywayFormatter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        FlywayFormatter { clock }
    }
}

impl Default for FlywayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for FlywayFormatter {
    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn render(&self, plan: &Plan, version: &str) -> Vec<MigrationFile> {
        let mut files = vec![MigrationFile::new(
            format!("V{}__{}.sql", version, plan.name()),
            render_section(plan.changes(), Direction::Up),
        )];
        if plan.has_down() {
            files.push(MigrationFile::new(
                format!("U{}__{}.sql", version, plan.name()),
                render_section(plan.changes(), Direction::Down),
            ));
        }
        files
    }
}
