//! Spawn via `vfork` + `execvp`

use crate::errors::{Result, SpawnError};
use crate::spawn::argv::CArgv;
use crate::spawn::options::SpawnOptions;
use log::{debug, warn};
use nix::unistd::Pid;
use std::os::raw::c_char;

// Not exposed by the libc crate.
extern "C" {
    fn vfork() -> libc::pid_t;
}

/// Spawn `argv` through `vfork` + `execvp`, returning the child's pid.
///
/// The calling thread is suspended until the child either replaces its
/// image or exits. `env` and `options` are accepted for symmetry with
/// [`posix_spawn`](crate::spawn::posix_spawn) but are not applied on this
/// path; the child inherits the parent's environment and descriptors.
///
/// A failed exec is not reported here: the child exits with status 1 and
/// the caller observes that through the usual wait machinery.
pub fn vfork_spawn(
    argv: &[String],
    env: Option<&[(String, String)]>,
    options: &SpawnOptions,
) -> Result<Pid> {
    let cargv = CArgv::new(argv)?;

    if env.is_some() {
        warn!("environment override ignored; child inherits the parent environment");
    }
    if options.close_fds().next().is_some() {
        warn!("descriptor options are not applied by the vfork path");
    }
    debug!("vfork spawn: {}", argv[0]);

    let pid = unsafe { vfork() };
    if pid < 0 {
        return Err(SpawnError::last_os_error("vfork"));
    }

    if pid == 0 {
        // Address space is still shared with the suspended parent: from
        // here until exec or _exit, only async-signal-safe calls, no
        // allocation, no unwinding. Everything was marshalled above.
        unsafe {
            libc::execvp(cargv.program(), cargv.as_ptr() as *const *const c_char);
            libc::_exit(1);
        }
    }

    Ok(Pid::from_raw(pid))
}
