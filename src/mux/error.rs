//! Routing errors
//!
//! `ConflictError` is returned while the route table is built and means the table is
//! misconfigured. `NotFoundError` is returned per request and ends up as a 404.

use hyper::Method;
use thiserror::Error;

/// Two routes cannot coexist in the trie.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    /// The same (path, method) pair was registered twice.
    #[error("conflict location: {method} {path} is already registered")]
    DuplicateRoute { method: Method, path: String },

    /// A different variable name was registered at an existing dynamic position.
    #[error("conflict location: {path} binds {{{requested}}} where {{{existing}}} is already registered")]
    VariableConflict {
        path: String,
        existing: String,
        requested: String,
    },
}

/// No handler is registered for the requested (path, method) pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("handler not found: {method} {path}")]
pub struct NotFoundError {
    pub method: Method,
    pub path: String,
}
