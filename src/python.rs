//! Python extension module
//!
//! Exposes the two spawn engines to Python. Options arrive as a dict in
//! the host language's dynamic shape; only entries of the form
//! `{"stdin"|"stdout"|"stderr"|<fd>: "close"}` are acted on, everything
//! else is left untouched.

use crate::errors::SpawnError;
use crate::spawn::{FdAction, SpawnOptions};
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::collections::HashMap;

fn to_py_err(err: SpawnError) -> PyErr {
    match err {
        SpawnError::Syscall { call, errno } => {
            PyOSError::new_err((errno as i32, format!("{call} failed")))
        }
        other => PyValueError::new_err(other.to_string()),
    }
}

fn options_from_dict(dict: Option<&PyDict>) -> SpawnOptions {
    let mut options = SpawnOptions::new();
    let Some(dict) = dict else {
        return options;
    };

    for (key, value) in dict.iter() {
        // Only the "close" directive is recognized.
        if value.extract::<&str>().map_or(true, |v| v != "close") {
            continue;
        }

        if let Ok(name) = key.extract::<&str>() {
            match name {
                "stdin" => options.close_stdin = true,
                "stdout" => options.close_stdout = true,
                "stderr" => options.close_stderr = true,
                _ => {}
            }
        } else if let Ok(fd) = key.extract::<i32>() {
            if fd >= 0 {
                options.fd_actions.push((fd, FdAction::Close));
            }
        }
    }

    options
}

fn env_pairs(env: Option<HashMap<String, String>>) -> Option<Vec<(String, String)>> {
    env.map(|map| map.into_iter().collect())
}

#[pyfunction]
#[pyo3(name = "vfork_spawn", signature = (argv, env = None, options = None))]
fn py_vfork_spawn(
    py: Python<'_>,
    argv: Vec<String>,
    env: Option<HashMap<String, String>>,
    options: Option<&PyDict>,
) -> PyResult<i32> {
    let options = options_from_dict(options);
    let env = env_pairs(env);
    let pid = py
        .allow_threads(|| crate::spawn::vfork_spawn(&argv, env.as_deref(), &options))
        .map_err(to_py_err)?;
    Ok(pid.as_raw())
}

#[pyfunction]
#[pyo3(name = "posix_spawn", signature = (argv, env = None, options = None))]
fn py_posix_spawn(
    py: Python<'_>,
    argv: Vec<String>,
    env: Option<HashMap<String, String>>,
    options: Option<&PyDict>,
) -> PyResult<i32> {
    let options = options_from_dict(options);
    let env = env_pairs(env);
    let pid = py
        .allow_threads(|| crate::spawn::posix_spawn(&argv, env.as_deref(), &options))
        .map_err(to_py_err)?;
    Ok(pid.as_raw())
}

#[pymodule]
fn fastspawn(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_vfork_spawn, m)?)?;
    m.add_function(wrap_pyfunction!(py_posix_spawn, m)?)?;
    Ok(())
}
