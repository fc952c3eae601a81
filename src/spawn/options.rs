//! Per-descriptor spawn options

use std::os::unix::io::RawFd;

/// Action applied to a file descriptor in the child before exec.
///
/// Close is the only action this binding performs; the variant list is
/// the extension point for richer descriptor handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FdAction {
    /// Close the descriptor in the child before the program image is loaded.
    Close,
}

/// Options consulted by [`posix_spawn`](crate::spawn::posix_spawn).
///
/// The standard streams get explicit flags; any other descriptor goes
/// through the open-ended `(fd, action)` list. The `vfork_spawn` path
/// accepts these options for interface symmetry but does not apply them.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    pub close_stdin: bool,
    pub close_stdout: bool,
    pub close_stderr: bool,
    /// Actions for raw descriptor numbers outside the standard streams.
    pub fd_actions: Vec<(RawFd, FdAction)>,
}

impl SpawnOptions {
    /// Options that leave every inherited descriptor alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Close standard input in the child.
    pub fn close_stdin(mut self) -> Self {
        self.close_stdin = true;
        self
    }

    /// Close standard output in the child.
    pub fn close_stdout(mut self) -> Self {
        self.close_stdout = true;
        self
    }

    /// Close standard error in the child. The baseline `/dev/null`
    /// redirection still applies afterwards, so the child never execs
    /// with descriptor 2 invalid.
    pub fn close_stderr(mut self) -> Self {
        self.close_stderr = true;
        self
    }

    /// Close an arbitrary descriptor in the child. Negative descriptors
    /// are ignored when the actions are applied.
    pub fn close_fd(mut self, fd: RawFd) -> Self {
        self.fd_actions.push((fd, FdAction::Close));
        self
    }

    /// Every descriptor selected for closing, standard streams first.
    pub(crate) fn close_fds(&self) -> impl Iterator<Item = RawFd> + '_ {
        let streams = [
            (0, self.close_stdin),
            (1, self.close_stdout),
            (2, self.close_stderr),
        ];
        streams
            .into_iter()
            .filter_map(|(fd, close)| close.then_some(fd))
            .chain(self.fd_actions.iter().filter_map(|(fd, action)| {
                (*fd >= 0 && *action == FdAction::Close).then_some(*fd)
            }))
    }
}
