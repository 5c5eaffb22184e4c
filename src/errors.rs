use thiserror::Error;

/// Structural/configuration errors detected once, at runner construction.
///
/// These are programmer mistakes in the declared command tree (or an empty
/// argument vector), not runtime conditions. They are never retried and are
/// fatal to the runner instance that recorded them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("command {0:?} must contain only letters, digits, '-', '_', ':' and '.'")]
    InvalidName(String),

    #[error("command alias {0:?} must contain only letters, digits, '-', '_', ':' and '.'")]
    InvalidAlias(String),

    #[error("command {0:?} is reserved")]
    ReservedName(String),

    #[error("command alias {0:?} is reserved")]
    ReservedAlias(String),

    #[error("duplicate command {0:?}")]
    DuplicateName(String),

    #[error("duplicate command alias {0:?}")]
    DuplicateAlias(String),

    #[error("command {0:?} must have subcommands")]
    EmptyGroup(String),

    #[error("no args provided")]
    NoArgs,
}

/// Errors surfaced by [`Runner::run`](crate::Runner::run).
///
/// Handler-returned errors pass through the [`Error::Exec`] variant unchanged
/// so callers can downcast to the original error, including [`ExitCode`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot init runner: {0}")]
    Init(#[from] InitError),

    #[error("no such command {0:?}")]
    UnknownCommand(String),

    #[error("no arguments for subcommand {0:?}")]
    MissingSubcommand(String),

    #[error(transparent)]
    Exec(#[from] anyhow::Error),
}

impl Error {
    /// Exit status requested by the failed handler, if it returned an
    /// [`ExitCode`] anywhere in its error chain.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Exec(err) => err
                .chain()
                .find_map(|cause| cause.downcast_ref::<ExitCode>())
                .map(|code| code.0),
            _ => None,
        }
    }
}

/// Error carrying the intended process exit status.
///
/// Return this from a handler to make [`Runner::exit`](crate::Runner::exit)
/// terminate the process with the given status:
///
/// ```
/// use cmdtree::ExitCode;
///
/// fn handler() -> anyhow::Result<()> {
///     Err(ExitCode(42).into())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("code {0}")]
pub struct ExitCode(pub i32);
