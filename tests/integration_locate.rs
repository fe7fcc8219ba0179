use predicates::prelude::*;

mod common;
use common::TestProject;

#[test]
fn test_makefile_preferred_over_ninja() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\n").unwrap();
    project.write("build.ninja", "").unwrap();

    project
        .makepick()
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Makefile (make)\n"));
}

#[test]
fn test_base_dir_before_build_subdir() {
    let project = TestProject::new().unwrap();
    project.write("build.ninja", "").unwrap();
    project.write("build/Makefile", "all:\n").unwrap();

    project
        .makepick()
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("build.ninja (ninja)\n"))
        .stdout(predicate::str::contains("build/Makefile").not());
}

#[test]
fn test_build_dir_flag_searched_first() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\n").unwrap();
    project.write("out/build.ninja", "").unwrap();

    project
        .makepick()
        .args(["locate", "--build-dir", "out", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dialect\": \"ninja\""))
        .stdout(predicate::str::contains("out"));
}

#[test]
fn test_build_dir_from_config() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\n").unwrap();
    project.write("cmake-out/build.ninja", "").unwrap();
    project.write_config("build_dir = \"cmake-out\"\n").unwrap();

    project
        .makepick()
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::contains("cmake-out"))
        .stdout(predicate::str::contains("(ninja)"));
}

#[test]
fn test_extra_dirs_from_config() {
    let project = TestProject::new().unwrap();
    project.write("_build/makefile", "all:\n").unwrap();
    project.write_config("extra_dirs = [\"_build\"]\n").unwrap();

    project
        .makepick()
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::contains("_build"))
        .stdout(predicate::str::contains("(make)"));
}

#[test]
fn test_candidates_listed_in_order() {
    let project = TestProject::new().unwrap();
    project.write("build/build.ninja", "").unwrap();

    let output = project.makepick().args(["locate", "--candidates"]).output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().map(str::trim).collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].ends_with("Makefile"));
    assert!(lines[3].ends_with("build.ninja"));
    assert!(lines[7].ends_with("build.ninja"));
}

#[test]
fn test_not_found() {
    let project = TestProject::new().unwrap();

    project
        .makepick()
        .arg("locate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No Makefile or build.ninja found"))
        .stderr(predicate::str::contains("in: ., build"));
}

#[test]
fn test_project_root_not_found() {
    let project = TestProject::new().unwrap();
    project.write("Makefile", "all:\n").unwrap();

    // Temp directories normally sit outside any repository; skip if not
    if makepick_cli::buildfile::find_project_root(project.project_path()).is_some() {
        return;
    }

    project
        .makepick()
        .args(["locate", "--project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project root found"));
}
