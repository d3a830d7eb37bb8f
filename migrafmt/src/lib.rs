/*!
Render schema migration plans for third-party migration tools.

`migrafmt` takes one canonical [`Plan`], an ordered list of forward SQL
statements with their reverse statements, and writes it in the file layout a
migration tool expects. Supported layouts:

| Tool | Forward file | Reverse file |
|---|---|---|
| golang-migrate | `{ts}_{name}.up.sql` | `{ts}_{name}.down.sql` |
| goose | `{ts}_{name}.sql` (`-- +goose Up` / `-- +goose Down`) | - |
| flyway | `V{ts}__{name}.sql` | `U{ts}__{name}.sql` |
| liquibase | `{ts}_{name}.sql` (changesets with inline `--rollback:`) | - |

`{ts}` is a 14-digit `YYYYMMDDHHMMSS` timestamp captured once per rendering.

## Usage

- Build a [`Plan`] from [`Change`]s.
- Pick a [`FormatterKind`] (or any type implementing [`Formatter`]).
- Write it with a [`PlanWriter`] into a [`LocalDir`], or use [`MemDir`] for a dry run.

### Example
```rust,no_run
use migrafmt::{Change, FormatterKind, LocalDir, Plan, PlanWriter};

let plan = Plan::new("tooling-plan")
    .with_change(
        Change::new("CREATE TABLE t1(c int)")
            .with_reverse("DROP TABLE t1 IF EXISTS")
            .with_comment("create table t1"),
    );
let dir = LocalDir::open("./migrations").unwrap();
let writer = PlanWriter::new(dir, FormatterKind::Goose.formatter());
for name in writer.write_plan(&plan).unwrap() {
    println!("{name}");
}
```
*/

mod dir;
mod writer;

use migrafmt_core::{filename, formatter, plan};

pub use dir::{list_migrations, Dir, ListError, LocalDir, MemDir};
pub use filename::{
    parse_migration_files, FilenameError, MigrationFileName, FLYWAY_FILENAME_PATTERN,
    GOLANG_MIGRATE_FILENAME_PATTERN, GOOSE_FILENAME_PATTERN, LIQUIBASE_FILENAME_PATTERN,
};
pub use formatter::{
    render_section, timestamp, write_block, Clock, Direction, FixedClock, FlywayFormatter,
    FormatError, Formatter, FormatterKind, GolangMigrateFormatter, GooseFormatter,
    LiquibaseFormatter, MigrationFile, SystemClock, UnknownFormatterError, TIMESTAMP_FORMAT,
    TIMESTAMP_LEN,
};
pub use plan::{Change, Plan};
pub use writer::{PlanWriter, WriterConfig, WriterError};

#[doc(hidden)]
pub use migrafmt_core as __core;
