use predicates::prelude::*;

mod common;
use common::TestProject;

#[test]
fn test_list_makefile_targets() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\n\tfoo\n\n.PHONY: all\nbuild:\n\tbar").unwrap();

    project.makepick().arg("list").assert().success().stdout("all\nbuild\n");
}

#[test]
fn test_list_sorted() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "zeta:\nalpha:\nmid:\nalpha: more\n").unwrap();

    project.makepick().args(["list", "--sort"]).assert().success().stdout("alpha\nmid\nzeta\n");
}

#[test]
fn test_list_sort_from_config() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "b:\na:\n").unwrap();
    project.write_config("sort_targets = true\n").unwrap();

    project.makepick().arg("list").assert().success().stdout("a\nb\n");
}

#[test]
fn test_list_from_other_directory() {
    let project = TestProject::new().unwrap();
    project.write("sub/GNUmakefile", "install:\n").unwrap();
    let dir = project.project_path().join("sub");

    project
        .makepick()
        .args(["list", "--dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout("install\n");
}

#[test]
fn test_list_json() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\ntest:\n").unwrap();

    let output = project.makepick().args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dialect"], "make");
    assert_eq!(json["targets"], serde_json::json!(["all", "test"]));
    assert!(json["file"].as_str().unwrap().ends_with("Makefile"));
}

#[test]
fn test_list_empty_makefile_warns() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", ".PHONY: nothing\n").unwrap();

    project
        .makepick()
        .arg("list")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No targets found"));
}

#[test]
fn test_list_from_project_root() {
    let project = TestProject::new().unwrap();
    project.write(".projectile", "").unwrap();
    project.write("Makefile", "root-target:\n").unwrap();
    project.write("src/deep/file.c", "").unwrap();
    let deep = project.project_path().join("src").join("deep");

    project
        .makepick()
        .current_dir(&deep)
        .args(["list", "--project"])
        .assert()
        .success()
        .stdout("root-target\n");
}

#[cfg(unix)]
mod fake_tools {
    use super::*;
    use makepick_cli::test_utils::FakeTool;

    #[test]
    fn test_list_ninja_in_build_dir() {
        let project = TestProject::new().unwrap();
        project.write("build/build.ninja", "").unwrap();
        let ninja = FakeTool::new(project.tools_path(), "ninja")
            .stdout("app: link\nmain.o: cxx\napp: link\nall: phony\n")
            .install()
            .unwrap();

        project
            .makepick()
            .args(["list", "--ninja"])
            .arg(&ninja)
            .assert()
            .success()
            .stdout("app\nmain.o\nall\n");
    }

    #[test]
    fn test_list_query_make() {
        let project = TestProject::new().unwrap();
        project.write("Makefile", "all:\n").unwrap();
        let make = FakeTool::new(project.tools_path(), "make")
            .stdout(
                "# Variables\nCC = cc\n# Files\n\n# Not a target:\nMakefile:\n\nall: lib\n\nlib:\n\n.PHONY: all\n",
            )
            .exit_code(1)
            .install()
            .unwrap();

        project
            .makepick()
            .args(["list", "--method", "qp", "--make"])
            .arg(&make)
            .assert()
            .success()
            .stdout("all\nlib\n");
    }

    #[test]
    fn test_list_query_make_unexpected_output() {
        let project = TestProject::new().unwrap();
        project.write("Makefile", "all:\n").unwrap();
        let make = FakeTool::new(project.tools_path(), "make")
            .stdout("make: *** something went wrong\n")
            .exit_code(2)
            .install()
            .unwrap();

        project
            .makepick()
            .args(["list", "--method", "qp", "--make"])
            .arg(&make)
            .assert()
            .failure()
            .stderr(predicate::str::contains("-nqp\" output"));
    }

    #[test]
    fn test_list_ninja_failure_reported() {
        let project = TestProject::new().unwrap();
        project.write("build.ninja", "").unwrap();
        let ninja = FakeTool::new(project.tools_path(), "ninja")
            .stdout("ninja: error: loading 'build.ninja'")
            .exit_code(1)
            .install()
            .unwrap();

        project
            .makepick()
            .args(["list", "--ninja"])
            .arg(&ninja)
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed"));
    }
}
