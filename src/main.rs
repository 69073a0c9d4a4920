use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A miniature content-addressable version-control system",
    long_about = "Gitlet is a miniature version-control system: an object store for \
    blobs and commits, a staging area, branches, and three-way merge. \
    It operates on plain files in the current directory and keeps all of \
    its state under .gitlet.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(about = "Unstage a file and stop tracking it")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
        #[arg(index = 1, conflicts_with = "message", help = "The commit message")]
        inline_message: Option<String>,
    },
    #[command(about = "Show the first-parent history of the current commit")]
    Log,
    #[command(about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(about = "Show branches, staged changes, and working-tree state")]
    Status,
    #[command(
        about = "Restore a file or switch branches",
        long_about = "Three forms: `checkout <branch>` switches branches, \
        `checkout -- <file>` restores a file from the current commit, and \
        `checkout <commit> -- <file>` restores a file from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or commit id")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore, after --")]
        file: Option<String>,
    },
    #[command(about = "Create a new branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(about = "Move the current branch to the given commit")]
    Reset {
        #[arg(index = 1, help = "Full or abbreviated commit id")]
        commit: String,
    },
    #[command(about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;
    let repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;

    match cli.command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(&file),
        Commands::Rm { file } => repository.rm(&file),
        Commands::Commit {
            message,
            inline_message,
        } => {
            let message = message.or(inline_message).unwrap_or_default();
            repository.commit(&message)
        }
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(&message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (Some(commit), Some(file)) => repository.checkout_file_from_commit(&commit, &file),
            (None, Some(file)) => repository.checkout_file(&file),
            (Some(branch), None) => repository.checkout_branch(&branch),
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Branch { name } => repository.branch(&name),
        Commands::RmBranch { name } => repository.rm_branch(&name),
        Commands::Reset { commit } => repository.reset(&commit),
        Commands::Merge { branch } => repository.merge(&branch),
    }
}
