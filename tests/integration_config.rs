use predicates::prelude::*;

mod common;
use common::TestProject;

#[test]
fn test_config_path_follows_env() {
    let project = TestProject::new().unwrap();

    project
        .makepick()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(format!("{}\n", project.config_path().display()));
}

#[test]
fn test_config_flag_overrides_env() {
    let project = TestProject::new().unwrap();
    let other = project.project_path().join("other.toml");

    project
        .makepick()
        .arg("--config")
        .arg(&other)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(format!("{}\n", other.display()));
}

#[test]
fn test_config_init_then_show() {
    let project = TestProject::new().unwrap();

    project
        .makepick()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));
    assert!(project.config_path().exists());

    project
        .makepick()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("make_executable = \"make\""))
        .stdout(predicate::str::contains("list_method = \"default\""));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let project = TestProject::new().unwrap();
    project.write_config("nice = 3\n").unwrap();

    project
        .makepick()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let content = std::fs::read_to_string(project.config_path()).unwrap();
    assert_eq!(content, "nice = 3\n");
}

#[test]
fn test_malformed_config_reported() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\n").unwrap();
    project.write_config("list_method = \"fancy\"\n").unwrap();

    project
        .makepick()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOML parsing error"));
}

#[test]
fn test_cache_targets_off_in_config() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\n").unwrap();
    project.write_config("cache_targets = false\n").unwrap();

    project.makepick().arg("list").assert().success().stdout("all\n");
}

#[test]
fn test_no_cache_flag_not_offered() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\n").unwrap();

    project
        .makepick()
        .args(["list", "--no-cache"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-cache"));
}
