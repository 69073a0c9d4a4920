//! Repository context.
//!
//! All state a command needs is carried explicitly by this object:
//! nothing consults process-global directories, so tests can spin up
//! isolated repositories side by side. Output goes through an injected
//! writer for the same reason.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::stage::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub const GITLET_DIR: &str = ".gitlet";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    stage: RefCell<Stage>,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let gitlet_path = path.join(GITLET_DIR);

        let database = Database::new(gitlet_path.join("objects").into_boxed_path());
        let stage = Stage::new(gitlet_path.join("index"));
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(gitlet_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            stage: RefCell::new(stage),
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> std::path::PathBuf {
        self.path.join(GITLET_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn stage(&'_ self) -> RefMut<'_, Stage> {
        self.stage.borrow_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    /// Every command except `init` starts here.
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(GitletError::NotARepository.into())
        }
    }

    /// Digest of the commit HEAD resolves to.
    pub fn current_commit_id(&self) -> anyhow::Result<ObjectId> {
        self.refs.read_head_oid()
    }

    /// The commit HEAD resolves to.
    pub fn current_commit(&self) -> anyhow::Result<Commit> {
        let oid = self.current_commit_id()?;
        self.database.load_commit(&oid)
    }
}
