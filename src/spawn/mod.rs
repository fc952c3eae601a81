//! Spawn layer: low-overhead process creation
//!
//! Two engines, both returning the child's pid as soon as the kernel has
//! created it:
//!
//! - **vfork**: `vfork` + `execvp`, the calling thread suspended until the
//!   child replaces its image or exits
//! - **posix_spawn**: `posix_spawnp` with per-descriptor file actions and
//!   a mandatory `/dev/null` redirection of standard error
//!
//! Neither engine supervises the child after creation; a failed exec shows
//! up only in the child's exit status.

pub(crate) mod argv;
pub mod options;
pub mod posix;
pub mod vfork;

pub use options::{FdAction, SpawnOptions};
pub use posix::{posix_spawn, uses_vfork_attribute};
pub use vfork::vfork_spawn;

#[cfg(test)]
mod tests;
