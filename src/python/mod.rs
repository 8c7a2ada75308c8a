//! Python surface: the `depot` extension module.
//!
//! Registration and failure signaling use the hosting runtime's own
//! mechanisms: the two operations are added to the module object at
//! initialization, and every error (bad arguments, native failure,
//! library loading, bridge-internal) raises the single registered
//! [`DepotError`] exception type.
//!
//! Process-wide state (the operation registry and the opened engine
//! library) lives in write-once cells, so repeated module initialization
//! is safe and cheap. The native call runs synchronously with the GIL
//! held; the engine is expected to answer quickly.

use once_cell::sync::OnceCell;
use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use crate::error::SdkError;
use crate::native::SharedLibrary;
use crate::ops::{Registry, LIST_BUNDLES, LIST_REPOS};

create_exception!(
    depot,
    DepotError,
    PyException,
    "Raised when a depot operation fails or is called with bad arguments."
);

/// Operation registry; built once per process.
static REGISTRY: OnceCell<Registry> = OnceCell::new();

/// Engine handle; opened lazily at the first call and kept for the process
/// lifetime. A failed open is cached and re-reported on subsequent calls.
static LIBRARY: OnceCell<Result<SharedLibrary, SdkError>> = OnceCell::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

fn library() -> PyResult<&'static SharedLibrary> {
    LIBRARY
        .get_or_init(SharedLibrary::open_default)
        .as_ref()
        .map_err(|e| DepotError::new_err(e.to_string()))
}

/// Extract the positional arguments as strings, raising the operation's
/// usage line through the module error type on any arity or type mismatch.
fn string_args(name: &str, args: &Bound<'_, PyTuple>) -> PyResult<Vec<String>> {
    let op = registry()
        .get(name)
        .ok_or_else(|| DepotError::new_err(format!("unknown operation: {}", name)))?;

    if args.len() != op.params().len() {
        return Err(DepotError::new_err(op.usage()));
    }

    let mut out = Vec::with_capacity(args.len());
    for item in args.iter() {
        let arg: String = item
            .extract()
            .map_err(|_| DepotError::new_err(op.usage()))?;
        out.push(arg);
    }
    Ok(out)
}

fn run(name: &str, args: &Bound<'_, PyTuple>) -> PyResult<String> {
    let argv = string_args(name, args)?;
    let lib = library()?;
    let arg_refs: Vec<&str> = argv.iter().map(String::as_str).collect();
    registry()
        .invoke(lib, name, &arg_refs)
        .map_err(|e| DepotError::new_err(e.to_string()))
}

/// List all depot repositories.
#[pyfunction]
#[pyo3(signature = (*args))]
fn list_repos(args: &Bound<'_, PyTuple>) -> PyResult<String> {
    run(LIST_REPOS, args)
}

/// List all bundles in a repository.
#[pyfunction]
#[pyo3(signature = (*args))]
fn list_bundles(args: &Bound<'_, PyTuple>) -> PyResult<String> {
    run(LIST_BUNDLES, args)
}

/// depot is a module to manage versioned data at scale; this extension
/// exposes the listing operations of the native engine.
#[pymodule]
fn depot(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(list_repos, m)?)?;
    m.add_function(wrap_pyfunction!(list_bundles, m)?)?;
    m.add("DepotError", py.get_type_bound::<DepotError>())?;
    // Alias kept for callers of the previous SDK generation that catch
    // `depot.error`.
    m.add("error", py.get_type_bound::<DepotError>())?;
    Ok(())
}
