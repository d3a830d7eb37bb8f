mod cli {
    use assert_cmd::prelude::*;
    use predicates::str::contains;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use tempfile::TempDir;

    const PLAN: &str = "name: tooling-plan
reversible: true
changes:
  - cmd: CREATE TABLE t1(c int)
    reverse: DROP TABLE t1 IF EXISTS
    comment: create table t1
  - cmd: CREATE TABLE t2(c int)
    reverse: DROP TABLE t2
    comment: create table t2
";

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let tmp_dir = TempDir::new().unwrap();
        let plan = tmp_dir.path().join("plan.yaml");
        fs::write(&plan, PLAN).unwrap();
        let migrations = tmp_dir.path().join("migrations");
        fs::create_dir(&migrations).unwrap();
        (tmp_dir, plan, migrations)
    }

    fn migrafmt(migrations: &Path) -> Command {
        let mut cmd = Command::cargo_bin("migrafmt").unwrap();
        cmd.env_remove("MIGRAFMT_CONFIG")
            .arg("-M")
            .arg(migrations);
        cmd
    }

    // `migrafmt` with no args should exit with a non-zero code.
    #[test]
    fn cli_no_args() {
        Command::cargo_bin("migrafmt").unwrap().assert().failure();
    }

    #[test]
    fn cli_version() {
        Command::cargo_bin("migrafmt")
            .unwrap()
            .args(["-V"])
            .assert()
            .stdout(contains(env!("CARGO_PKG_VERSION")));
    }

    // `migrafmt render` without a plan should exit with a non-zero code.
    #[test]
    fn render_no_args() {
        Command::cargo_bin("migrafmt")
            .unwrap()
            .args(["render"])
            .assert()
            .failure();
    }

    #[test]
    fn formats_lists_every_tool() {
        Command::cargo_bin("migrafmt")
            .unwrap()
            .args(["formats"])
            .assert()
            .success()
            .stdout(contains("golang-migrate"))
            .stdout(contains("goose"))
            .stdout(contains("V{ts}__{name}.sql"))
            .stdout(contains("liquibase"));
    }

    #[test]
    fn render_writes_golang_migrate_files() {
        let (_tmp, plan, migrations) = setup();
        migrafmt(&migrations)
            .args(["render", "--timestamp", "20240201112301", "--plan"])
            .arg(&plan)
            .assert()
            .success()
            .stdout(contains("20240201112301_tooling-plan.up.sql"));

        let up = fs::read_to_string(migrations.join("20240201112301_tooling-plan.up.sql")).unwrap();
        assert_eq!(
            up,
            "-- create table t1\nCREATE TABLE t1(c int);\n-- create table t2\nCREATE TABLE t2(c int);\n"
        );
        let down =
            fs::read_to_string(migrations.join("20240201112301_tooling-plan.down.sql")).unwrap();
        assert_eq!(
            down,
            "-- reverse: create table t2\nDROP TABLE t2;\n-- reverse: create table t1\nDROP TABLE t1 IF EXISTS;\n"
        );
    }

    #[test]
    fn render_refuses_to_overwrite() {
        let (_tmp, plan, migrations) = setup();
        for expect_success in [true, false] {
            let assert = migrafmt(&migrations)
                .args(["render", "-F", "goose", "--timestamp", "20240201112301", "--plan"])
                .arg(&plan)
                .assert();
            if expect_success {
                assert.success();
            } else {
                assert.failure().stderr(contains("already exists"));
            }
        }
        migrafmt(&migrations)
            .args([
                "render",
                "-F",
                "goose",
                "--timestamp",
                "20240201112301",
                "--allow-overwrite",
                "--plan",
            ])
            .arg(&plan)
            .assert()
            .success();
    }

    #[test]
    fn render_dry_run_writes_nothing() {
        let (_tmp, plan, migrations) = setup();
        migrafmt(&migrations)
            .args([
                "render",
                "-F",
                "liquibase",
                "--dry-run",
                "--timestamp",
                "20240201112301",
                "--plan",
            ])
            .arg(&plan)
            .assert()
            .success()
            .stdout(contains("--changeset atlas:20240201112301-2"));
        assert_eq!(fs::read_dir(&migrations).unwrap().count(), 0);
    }

    #[test]
    fn render_rejects_unknown_format() {
        let (_tmp, plan, migrations) = setup();
        migrafmt(&migrations)
            .args(["render", "-F", "sqitch", "--plan"])
            .arg(&plan)
            .assert()
            .failure()
            .stderr(contains("unknown formatter"));
    }

    #[test]
    fn render_uses_config_file() {
        let (tmp, plan, migrations) = setup();
        let config = tmp.path().join("migrafmt.toml");
        fs::write(&config, "format = \"flyway\"\n").unwrap();
        migrafmt(&migrations)
            .arg("--config")
            .arg(&config)
            .args(["render", "--timestamp", "20240201112301", "--plan"])
            .arg(&plan)
            .assert()
            .success();
        assert!(migrations.join("V20240201112301__tooling-plan.sql").is_file());
        assert!(migrations.join("U20240201112301__tooling-plan.sql").is_file());
    }

    #[test]
    fn list_shows_rendered_files() {
        let (_tmp, plan, migrations) = setup();
        migrafmt(&migrations)
            .args(["render", "-F", "flyway", "--timestamp", "20240201112301", "--plan"])
            .arg(&plan)
            .assert()
            .success();
        migrafmt(&migrations)
            .args(["list", "-F", "flyway"])
            .assert()
            .success()
            .stdout(contains("V20240201112301__tooling-plan.sql"))
            .stdout(contains("U20240201112301__tooling-plan.sql"));
    }
}
