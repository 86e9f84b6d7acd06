use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// A throwaway project root with a CustomClean.xml and some scratch files.
struct Project {
    _tmp: TempDir,
    root: PathBuf,
}

impl Project {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        Self { _tmp: tmp, root }
    }

    fn config(&self, xml: &str) -> &Self {
        fs::write(self.root.join("CustomClean.xml"), xml).unwrap();
        self
    }

    fn files(&self, dir: &str, names: &[&str]) -> &Self {
        let dir = self.root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        for name in names {
            fs::write(dir.join(name), "scratch").unwrap();
        }
        self
    }

    fn exists(&self, rel: &str) -> bool {
        self.root.join(rel).exists()
    }

    fn customclean(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("customclean"));
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn clean(&self) -> Command {
        let mut cmd = self.customclean();
        cmd.arg("clean").arg("--project-root").arg(&self.root);
        cmd
    }
}

const CONFIG: &str = r#"<root>
  <DIRECTORIES>out</DIRECTORIES>
  <DIRECTORIES>build</DIRECTORIES>
  <IGNORE>
    <NAMEEXCEPTIONS>README</NAMEEXCEPTIONS>
    <FILETYPEEXCEPTIONS>.keep</FILETYPEEXCEPTIONS>
  </IGNORE>
</root>"#;

#[test]
fn cleans_configured_directories() {
    let project = Project::new();
    project
        .config(CONFIG)
        .files("out", &["a.o", "b.o", "README.txt"])
        .files("build", &["app.exe", "notes.keep"]);

    project
        .clean()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Clean Complete: 3 Files deleted\n"))
        .stdout(predicate::str::contains("Directories cleaned: out build\n"))
        .stdout(predicate::str::contains("Ignored files named: README\n"))
        .stdout(predicate::str::contains("Ignored file extensions: .keep\n"));

    assert!(!project.exists("out/a.o"));
    assert!(!project.exists("build/app.exe"));
    assert!(project.exists("out/README.txt"));
    assert!(project.exists("build/notes.keep"));
}

#[test]
fn missing_directory_does_not_fail_the_run() {
    let project = Project::new();
    project.config(CONFIG).files("build", &["x.bin", "y.bin"]);

    project
        .clean()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Clean Complete: 2 Files deleted\n"))
        .stdout(predicate::str::contains("Directories cleaned: build\n"))
        .stdout(predicate::str::contains("Directories not found: out\n"));
}

#[test]
fn second_run_is_a_no_op() {
    let project = Project::new();
    project.config(CONFIG).files("out", &["a.o"]);

    project.clean().assert().success();
    project
        .clean()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Clean Complete: 0 Files deleted\n"));
}

#[test]
fn dry_run_keeps_everything() {
    let project = Project::new();
    project.config(CONFIG).files("out", &["a.o", "b.o"]);

    project
        .clean()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Dry Run: 2 Files would be deleted\n"));

    assert!(project.exists("out/a.o"));
    assert!(project.exists("out/b.o"));
}

#[test]
fn missing_config_is_an_error() {
    let project = Project::new();
    project.files("out", &["a.o"]);

    project
        .clean()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not be found"));

    assert!(project.exists("out/a.o"));
}

#[test]
fn malformed_config_deletes_nothing() {
    let project = Project::new();
    project
        .config("<root><DIRECTORIES>out</root>")
        .files("out", &["a.o"]);

    project
        .clean()
        .assert()
        .failure()
        .stderr(predicate::str::contains("not properly formatted XML"));

    assert!(project.exists("out/a.o"));
}

#[test]
fn empty_config_deletes_nothing() {
    let project = Project::new();
    project.config("<root/>").files("out", &["a.o"]);

    project
        .clean()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Clean Complete: 0 Files deleted\n"));

    assert!(project.exists("out/a.o"));
}

#[test]
fn init_then_clean() {
    let project = Project::new();
    project.files("bin", &["app.exe", "README.md", ".gitignore"]);

    project
        .customclean()
        .arg("init")
        .arg("--project-root")
        .arg(&project.root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    project
        .customclean()
        .arg("init")
        .arg("--project-root")
        .arg(&project.root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    project
        .clean()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Clean Complete: 1 Files deleted\n"));

    assert!(!project.exists("bin/app.exe"));
    assert!(project.exists("bin/README.md"));
    assert!(project.exists("bin/.gitignore"));
}
