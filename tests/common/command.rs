use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", "-m", message])
}

/// Write the given files, stage them all, and commit.
pub fn stage_and_commit(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (name, content) in files {
        write_file(FileSpec::new(dir.join(name), content.to_string()));
    }
    for (name, _) in files {
        run_gitlet_command(dir, &["add", name]).assert().success();
    }
    gitlet_commit(dir, message).assert().success();
}

/// Digest of the commit HEAD resolves to, read straight off the disk
/// layout: HEAD names a branch, the branch file holds the digest.
pub fn head_commit_id(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))
        .expect("Failed to read HEAD");
    let branch_ref = head
        .trim()
        .strip_prefix("ref: ")
        .expect("HEAD is not a symbolic reference");

    std::fs::read_to_string(dir.join(".gitlet").join(branch_ref))
        .expect("Failed to read branch file")
        .trim()
        .to_string()
}

pub fn branch_commit_id(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(".gitlet").join("refs").join("heads").join(name))
        .expect("Failed to read branch file")
        .trim()
        .to_string()
}
