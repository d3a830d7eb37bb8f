use super::{render_section, Clock, Direction, Formatter, MigrationFile, SystemClock};
use crate::plan::Plan;
use std::sync::Arc;

const UP_MARKER: &str = "-- +goose Up\n";
const DOWN_MARKER: &str = "-- +goose Down\n";

/// Formatter for pressly/goose: one `.sql` file with `+goose` section markers.
#[derive(Clone)]
pub struct GooseFormatter {
    clock: Arc<dyn Clock>,
}

impl GooseFormatter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        GooseFormatter { clock }
    }
}

impl Default for GooseFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for GooseFormatter {
    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn render(&self, plan: &Plan, version: &str) -> Vec<MigrationFile> {
        let mut content = String::from(UP_MARKER);
        content.push_str(&render_section(plan.changes(), Direction::Up));
        if plan.has_down() {
            content.push('\n');
            content.push_str(DOWN_MARKER);
            content.push_str(&render_section(plan.changes(), Direction::Down));
        }
        vec![MigrationFile::new(
            format!("{}_{}.sql", version, plan.name()),
            content,
        )]
    }
}
