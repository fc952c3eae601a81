//! Spawn via `posix_spawnp` with per-descriptor file actions

use crate::errors::{Result, SpawnError};
use crate::spawn::argv::CArgv;
use crate::spawn::options::SpawnOptions;
use log::{debug, warn};
use nix::unistd::Pid;
use std::ffi::CStr;
use std::mem::MaybeUninit;
use std::os::raw::c_char;

const DEV_NULL: &CStr = c"/dev/null";

// The child runs with the caller's inherited environment.
extern "C" {
    static environ: *const *mut c_char;
}

/// Spawn `argv` through `posix_spawnp`, returning the child's pid.
///
/// Descriptors selected in `options` are closed in the child before exec;
/// afterwards descriptor 2 is unconditionally opened onto `/dev/null` for
/// writing, so the child never execs with standard error invalid. On glibc
/// the spawn attributes request the vfork-based implementation.
///
/// `env` is accepted for interface symmetry but not applied; the child
/// inherits the parent's environment.
pub fn posix_spawn(
    argv: &[String],
    env: Option<&[(String, String)]>,
    options: &SpawnOptions,
) -> Result<Pid> {
    let cargv = CArgv::new(argv)?;

    if env.is_some() {
        warn!("environment override ignored; child inherits the parent environment");
    }
    debug!("posix_spawnp: {}", argv[0]);

    let mut file_actions = MaybeUninit::<libc::posix_spawn_file_actions_t>::uninit();
    let mut attr = MaybeUninit::<libc::posix_spawnattr_t>::uninit();

    unsafe {
        libc::posix_spawn_file_actions_init(file_actions.as_mut_ptr());
        for fd in options.close_fds() {
            libc::posix_spawn_file_actions_addclose(file_actions.as_mut_ptr(), fd);
        }
        libc::posix_spawn_file_actions_addopen(
            file_actions.as_mut_ptr(),
            2,
            DEV_NULL.as_ptr(),
            libc::O_WRONLY,
            0,
        );

        libc::posix_spawnattr_init(attr.as_mut_ptr());
        #[cfg(all(target_os = "linux", target_env = "gnu"))]
        libc::posix_spawnattr_setflags(
            attr.as_mut_ptr(),
            libc::POSIX_SPAWN_USEVFORK as libc::c_short,
        );

        let mut pid: libc::pid_t = 0;
        let status = libc::posix_spawnp(
            &mut pid,
            cargv.program(),
            file_actions.as_ptr(),
            attr.as_ptr(),
            cargv.as_ptr(),
            environ,
        );

        // Both structures are released whether or not the spawn succeeded.
        libc::posix_spawn_file_actions_destroy(file_actions.as_mut_ptr());
        libc::posix_spawnattr_destroy(attr.as_mut_ptr());

        if status != 0 {
            return Err(SpawnError::from_status("posix_spawnp", status));
        }

        Ok(Pid::from_raw(pid))
    }
}

/// Whether this build requests the vfork-based `posix_spawn`
/// implementation through the spawn attributes.
pub fn uses_vfork_attribute() -> bool {
    cfg!(all(target_os = "linux", target_env = "gnu"))
}
