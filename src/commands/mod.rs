//! Porcelain commands, one file per command, implemented as methods on
//! [`Repository`](crate::areas::repository::Repository). Each command
//! rehydrates the persisted state it needs, validates its preconditions
//! before touching anything, and writes its updates back.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
