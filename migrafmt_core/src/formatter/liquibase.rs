use super::{Clock, Formatter, MigrationFile, SystemClock};
use crate::plan::{Change, Plan};
use std::sync::Arc;

const HEADER: &str = "--liquibase formatted sql\n";
const AUTHOR: &str = "atlas";

/// Formatter for Liquibase formatted SQL: one changeset per change, rollbacks inline.
#[derive(Clone)]
pub struct LiquibaseFormatter {
    clock: Arc<dyn Clock>,
}

impl LiquibaseFormatter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        LiquibaseFormatter { clock }
    }
}

impl Default for LiquibaseFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_changeset(out: &mut String, version: &str, seq: usize, change: &Change) {
    out.push_str(&format!("--changeset {}:{}-{}\n", AUTHOR, version, seq));
    if let Some(comment) = change.comment() {
        out.push_str(&format!("--comment: {}\n", comment));
    }
    out.push_str(change.cmd());
    out.push_str(";\n");
    if let Some(reverse) = change.reverse() {
        out.push_str(&format!("--rollback: {};\n", reverse));
    }
}

impl Formatter for LiquibaseFormatter {
    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn render(&self, plan: &Plan, version: &str) -> Vec<MigrationFile> {
        let mut content = String::from(HEADER);
        for (index, change) in plan.changes().iter().enumerate() {
            if index > 0 {
                content.push('\n');
            }
            // Changeset ids are 1-based and follow forward order.
            write_changeset(&mut content, version, index + 1, change);
        }
        vec![MigrationFile::new(
            format!("{}_{}.sql", version, plan.name()),
            content,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::tests::{fixed_clock, one_way_plan, tooling_plan};

    #[test]
    fn renders_changesets() {
        let files = LiquibaseFormatter::with_clock(fixed_clock())
            .format(&tooling_plan())
            .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "20240201112301_tooling-plan.sql");
        assert_eq!(
            files[0].content(),
            "--liquibase formatted sql
--changeset atlas:20240201112301-1
--comment: create table t1
CREATE TABLE t1(c int);
--rollback: DROP TABLE t1 IF EXISTS;

--changeset atlas:20240201112301-2
--comment: create table t2
CREATE TABLE t2(c int);
--rollback: DROP TABLE t2;
"
        );
    }

    #[test]
    fn omits_empty_rollback_and_comment() {
        let plan = Plan::from_changes(
            "bare",
            vec![Change::new("DELETE FROM t0"), Change::new("SELECT 1")],
        );
        let files = LiquibaseFormatter::with_clock(fixed_clock())
            .format(&plan)
            .unwrap();
        assert_eq!(
            files[0].content(),
            "--liquibase formatted sql\n--changeset atlas:20240201112301-1\nDELETE FROM t0;\n\n--changeset atlas:20240201112301-2\nSELECT 1;\n"
        );
    }

    #[test]
    fn irreversible_plan_keeps_available_rollbacks() {
        let files = LiquibaseFormatter::with_clock(fixed_clock())
            .format(&one_way_plan())
            .unwrap();
        let content = files[0].content();
        assert_eq!(content.matches("--rollback:").count(), 1);
        assert!(content.contains(
            "--changeset atlas:20240201112301-2\n--comment: purge t0\nDELETE FROM t0;\n"
        ));
    }

    #[test]
    fn empty_plan_is_header_only() {
        let files = LiquibaseFormatter::with_clock(fixed_clock())
            .format(&Plan::new("empty"))
            .unwrap();
        assert_eq!(files[0].content(), HEADER);
    }
}
