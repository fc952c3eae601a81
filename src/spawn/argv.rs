//! Argument-vector marshalling for the exec-family calls

use crate::errors::{Result, SpawnError};
use std::ffi::CString;
use std::os::raw::c_char;

/// An argument vector converted to the C shape expected by `execvp` and
/// `posix_spawnp`: owned null-terminated strings plus a pointer table
/// ending in a null sentinel.
///
/// The pointer table borrows from `strings`; it stays valid for as long
/// as the `CArgv` is alive and the vectors are not mutated.
#[derive(Debug)]
pub(crate) struct CArgv {
    strings: Vec<CString>,
    ptrs: Vec<*mut c_char>,
}

impl CArgv {
    /// Marshal `argv` into C form. Fails on an empty vector or on any
    /// element containing an interior nul byte.
    pub(crate) fn new(argv: &[String]) -> Result<Self> {
        if argv.is_empty() {
            return Err(SpawnError::EmptyArgv);
        }

        let strings = argv
            .iter()
            .map(|arg| CString::new(arg.as_str()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut ptrs: Vec<*mut c_char> = strings
            .iter()
            .map(|s| s.as_ptr() as *mut c_char)
            .collect();
        ptrs.push(std::ptr::null_mut());

        Ok(CArgv { strings, ptrs })
    }

    /// Pointer to `argv[0]`, the program name resolved via the search path.
    pub(crate) fn program(&self) -> *const c_char {
        self.strings[0].as_ptr()
    }

    /// Pointer table in `char *const argv[]` form.
    pub(crate) fn as_ptr(&self) -> *const *mut c_char {
        self.ptrs.as_ptr()
    }
}
