//! httpmux: a method + path request router
//!
//! Routes are path templates made of `/`-separated segments; a segment written as
//! `{name}` (ASCII letters only) captures whatever single segment the request has at
//! that position. Registration builds a segment trie once at startup, and each
//! request is then resolved in one pass over its path.
//!
//! ```no_run
//! use httpmux::mux::{var, Router};
//! use httpmux::http::build_text_response;
//! use hyper::{body::Bytes, Method, Request, StatusCode};
//!
//! let mut router = Router::new();
//! router.handle_func(Method::GET, "/v1/users/{uid}", |req: Request<Bytes>| async move {
//!     let uid = var(&req, "uid").unwrap_or_default().to_string();
//!     build_text_response(StatusCode::OK, uid)
//! });
//! ```

pub mod config;
pub mod demo;
pub mod http;
pub mod logger;
pub mod mux;
pub mod server;

pub use mux::{ConflictError, NotFoundError, RouteVariable, Router, RoutingTrie, Vars};
