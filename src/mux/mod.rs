//! Request multiplexer
//!
//! Routes an incoming (method, path) pair to exactly one registered handler:
//! - `trie`: prefix trie over path segments, literal and `{name}` segments
//! - `router`: registration and dispatch on top of the trie
//! - `vars`: captured path variables, exposed to handlers through request extensions
//!
//! Routes are registered once at startup and the table is read-only afterwards,
//! so `Router` is shared between connection tasks behind an `Arc` without locks.

mod error;
pub mod router;
pub mod trie;
pub mod vars;

pub use error::{ConflictError, NotFoundError};
pub use router::{decoded_path, Handler, HandlerFuture, HandlerRef, Router};
pub use trie::RoutingTrie;
pub use vars::{var, vars, RouteVariable, Vars};
