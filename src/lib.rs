//! fastspawn: minimal vfork/posix_spawn binding
//!
//! Exposes two low-level process-creation primitives, skipping the usual
//! fork-and-copy path for latency-sensitive callers.
//!
//! # Modules
//!
//! - **spawn**: the two spawn engines plus argv/option marshalling
//! - **errors**: typed spawn failures carrying the failing call and errno
//! - **python**: `pyo3` extension module (feature `python`)
//!
//! Both engines run the child with the caller's inherited environment and
//! return as soon as the kernel has created the process; nothing here
//! supervises the child afterwards.
//!
//! # Example
//!
//! ```ignore
//! use fastspawn::{posix_spawn, SpawnOptions};
//!
//! let argv = vec!["echo".to_string(), "hello".to_string()];
//! let pid = posix_spawn(&argv, None, &SpawnOptions::new().close_stdin())?;
//! println!("spawned {}", pid);
//! ```

pub mod errors;
pub mod spawn;

#[cfg(feature = "python")]
mod python;

pub use errors::{Result, SpawnError};
pub use spawn::{posix_spawn, uses_vfork_attribute, vfork_spawn, FdAction, SpawnOptions};
