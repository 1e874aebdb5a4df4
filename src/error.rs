//! Crate error type.
//!
//! Two classes of failure exist and only one of them is fatal:
//! - Resource acquisition (`NotATty`, `TerminalSize`, `RawMode`) is raised
//!   from `Screen::new` before any terminal state is touched. Callers should
//!   treat it as unrecoverable.
//! - Plain I/O errors from writing to the terminal mid-session.
//!
//! User cancellation is never an error: widgets encode it in their result
//! values (`MenuOutcome::Cancelled`, `Option::None`).

use std::io;

/// Toolkit error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Standard input is not attached to a terminal.
    #[error("stdin is not a terminal")]
    NotATty,

    /// The terminal size query failed at startup.
    #[error("failed to query terminal size")]
    TerminalSize(#[source] io::Error),

    /// Raw mode could not be entered or left.
    #[error("failed to switch terminal raw mode")]
    RawMode(#[source] io::Error),

    /// I/O failure while talking to the terminal.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
