use super::{render_section, Clock, Direction, Formatter, MigrationFile, SystemClock};
use crate::plan::Plan;
use std::sync::Arc;

/// Formatter for golang-migrate/migrate: a `.up.sql` and a `.down.sql` file per plan.
#[derive(Clone)]
pub struct GolangMigrateFormatter {
    clock: Arc<dyn Clock>,
}

impl GolangMigrateFormatter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        GolangMigrateFormatter { clock }
    }
}

impl Default for GolangMigrateFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for GolangMigrateFormatter {
    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn render(&self, plan: &Plan, version: &str) -> Vec<MigrationFile> {
        let mut files = vec![MigrationFile::new(
            format!("{}_{}.up.sql", version, plan.name()),
            render_section(plan.changes(), Direction::Up),
        )];
        if plan.has_down() {
            files.push(MigrationFile::new(
                format!("{}_{}.down.sql", version, plan.name()),
                render_section(plan.changes(), Direction::Down),
            ));
        }
        files
    }
}
