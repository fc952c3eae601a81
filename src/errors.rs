//! Error types for spawn operations

use nix::errno::Errno;
use thiserror::Error;

/// Result type for spawn operations
pub type Result<T> = std::result::Result<T, SpawnError>;

/// Errors that can occur while creating a child process
#[derive(Error, Debug)]
pub enum SpawnError {
    /// An OS primitive failed; carries the name of the failing call and
    /// the errno it reported.
    #[error("{call} failed: {errno}")]
    Syscall { call: &'static str, errno: Errno },

    #[error("argument vector must not be empty")]
    EmptyArgv,

    #[error("argument contains an interior nul byte")]
    NulByte(#[from] std::ffi::NulError),
}

impl SpawnError {
    /// Wrap the current `errno` as a failure of `call`.
    pub(crate) fn last_os_error(call: &'static str) -> Self {
        SpawnError::Syscall {
            call,
            errno: Errno::last(),
        }
    }

    /// Wrap a status returned directly by a call in the `posix_spawn`
    /// family, which reports errors as a return value instead of `errno`.
    pub(crate) fn from_status(call: &'static str, status: i32) -> Self {
        SpawnError::Syscall {
            call,
            errno: Errno::from_raw(status),
        }
    }

    /// The underlying OS error code, if this is a syscall failure.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            SpawnError::Syscall { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}
