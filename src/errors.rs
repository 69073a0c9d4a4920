//! Domain error taxonomy.
//!
//! Every variant carries the exact message shown to the user. The CLI
//! prints the message and exits nonzero; none of these are ever retried
//! in-process. I/O failures are not part of this taxonomy; they
//! propagate through `anyhow` as fatal errors with context attached.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GitletError {
    #[error("A Gitlet version-control system already exists in the current directory.")]
    RepositoryExists,

    #[error("Not in an initialized Gitlet directory.")]
    NotARepository,

    #[error("File does not exist.")]
    FileDoesNotExist,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Ambiguous commit id prefix: {0}.")]
    AmbiguousPrefix(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No such branch exists.")]
    NoSuchBranchCheckout,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict,
}
