mod common;

use assert_fs::TempDir;
use common::command::{
    branch_commit_id, head_commit_id, init_repository_dir, run_gitlet_command, stage_and_commit,
};
use common::file::{FileSpec, read_file, write_file};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// A split commit on master with a `other` branch forked off it.
#[fixture]
fn forked_repository(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    stage_and_commit(dir, &[("base.txt", "base\n")], "split point");
    run_gitlet_command(dir, &["branch", "other"]).assert().success();

    init_repository_dir
}

#[rstest]
fn merging_an_ancestor_branch_is_a_no_op(forked_repository: TempDir) {
    let dir = forked_repository.path();
    stage_and_commit(dir, &[("extra.txt", "extra\n")], "ahead of other");
    let tip = head_commit_id(dir);

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));

    // no commit was created
    assert_eq!(head_commit_id(dir), tip);
}

#[rstest]
fn merging_a_descendant_branch_fast_forwards(forked_repository: TempDir) {
    let dir = forked_repository.path();
    let split_tip = head_commit_id(dir);
    stage_and_commit(dir, &[("extra.txt", "extra\n")], "ahead of other");
    let master_tip = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    run_gitlet_command(dir, &["merge", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    // fast-forward is a branch checkout: HEAD moves to `master`, the
    // old current branch pointer stays put, the working tree catches up
    let head = std::fs::read_to_string(dir.join(".gitlet").join("HEAD")).unwrap();
    assert_eq!(head.trim(), "ref: refs/heads/master");
    assert_eq!(branch_commit_id(dir, "master"), master_tip);
    assert_eq!(branch_commit_id(dir, "other"), split_tip);
    assert_eq!(read_file(dir, "extra.txt"), "extra\n");
}

#[rstest]
fn non_overlapping_changes_merge_cleanly(forked_repository: TempDir) {
    let dir = forked_repository.path();
    stage_and_commit(dir, &[("x.txt", "from master\n")], "master work");
    let master_tip = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    stage_and_commit(dir, &[("y.txt", "from other\n")], "other work");
    let other_tip = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    run_gitlet_command(dir, &["merge", "other"]).assert().success();

    // both sides' files are present, plus the untouched base
    assert_eq!(read_file(dir, "x.txt"), "from master\n");
    assert_eq!(read_file(dir, "y.txt"), "from other\n");
    assert_eq!(read_file(dir, "base.txt"), "base\n");

    // the merge commit has both parents, first parent first
    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Merged other into master.").and(predicate::str::contains(
                format!("Merge: {} {}", &master_tip[..7], &other_tip[..7]),
            )),
        );
}

#[rstest]
fn a_deletion_on_the_other_side_is_carried_over(forked_repository: TempDir) {
    let dir = forked_repository.path();
    stage_and_commit(dir, &[("x.txt", "from master\n")], "master work");

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    run_gitlet_command(dir, &["rm", "base.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "-m", "dropped base"]).assert().success();

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    run_gitlet_command(dir, &["merge", "other"]).assert().success();

    assert!(!dir.join("base.txt").exists());
    assert_eq!(read_file(dir, "x.txt"), "from master\n");
}

#[rstest]
fn conflicting_changes_produce_a_marker_file(forked_repository: TempDir) {
    let dir = forked_repository.path();
    stage_and_commit(dir, &[("base.txt", "master version\n")], "master side");
    let master_tip = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    stage_and_commit(dir, &[("base.txt", "other version\n")], "other side");
    let other_tip = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    let expected = "\
<<<<<<< HEAD
master version
=======
other version
>>>>>>>
";
    assert_eq!(read_file(dir, "base.txt"), expected);

    // the conflict is committed: a merge commit with both parents exists
    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Merged other into master.").and(predicate::str::contains(
                format!("Merge: {} {}", &master_tip[..7], &other_tip[..7]),
            )),
        );
}

#[rstest]
fn merge_refuses_uncommitted_changes(forked_repository: TempDir) {
    let dir = forked_repository.path();
    write_file(FileSpec::new(dir.join("pending.txt"), "pending\n".to_string()));
    run_gitlet_command(dir, &["add", "pending.txt"]).assert().success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You have uncommitted changes."));
}

#[rstest]
fn merge_refuses_an_unknown_branch(forked_repository: TempDir) {
    run_gitlet_command(forked_repository.path(), &["merge", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("A branch with that name does not exist."));
}

#[rstest]
fn merge_refuses_the_current_branch(forked_repository: TempDir) {
    run_gitlet_command(forked_repository.path(), &["merge", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot merge a branch with itself."));
}

#[rstest]
fn merge_refuses_to_overwrite_an_untracked_file(forked_repository: TempDir) {
    let dir = forked_repository.path();
    stage_and_commit(dir, &[("x.txt", "from master\n")], "master work");

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    stage_and_commit(dir, &[("y.txt", "from other\n")], "other work");

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    // y.txt exists untracked and the merge would write it
    write_file(FileSpec::new(dir.join("y.txt"), "scratch\n".to_string()));

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));
    assert_eq!(read_file(dir, "y.txt"), "scratch\n");
}
