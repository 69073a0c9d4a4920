mod common;

use assert_fs::TempDir;
use common::command::{head_commit_id, init_repository_dir, repository_dir, run_gitlet_command};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_creates_the_expected_layout(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let gitlet = repository_dir.path().join(".gitlet");
    assert!(gitlet.join("objects").join("blobs").is_dir());
    assert!(gitlet.join("objects").join("commits").is_dir());
    assert!(gitlet.join("refs").join("heads").join("master").is_file());
    assert!(gitlet.join("index").is_file());

    let head = std::fs::read_to_string(gitlet.join("HEAD")).unwrap();
    assert_eq!(head.trim(), "ref: refs/heads/master");
}

#[rstest]
fn every_repository_starts_from_the_same_initial_commit(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let first = head_commit_id(repository_dir.path());

    let second_dir = TempDir::new().unwrap();
    run_gitlet_command(second_dir.path(), &["init"])
        .assert()
        .success();
    let second = head_commit_id(second_dir.path());

    assert_eq!(first, second);
}

#[rstest]
fn init_refuses_an_existing_repository(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A Gitlet version-control system already exists in the current directory.",
        ));
}

#[rstest]
fn commands_outside_a_repository_fail(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Not in an initialized Gitlet directory.",
        ));
}

#[rstest]
fn initial_log_shows_the_epoch_commit(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("===")
                .and(predicate::str::contains("initial commit"))
                .and(predicate::str::contains("Date: Thu Jan 1 00:00:00 1970 +0000")),
        );
}
