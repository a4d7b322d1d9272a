//! Request dispatch
//!
//! `Router` owns the routing trie. Routes are registered with `handle`/`handle_func`
//! during startup; `serve` then resolves each request, attaches the captured `Vars`
//! to the request extensions and awaits the handler.
//!
//! Routes match the percent-decoded path: `/users/john%20doe` binds `john doe`, and an
//! encoded `%2F` separates segments like a literal `/`.

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::str::Utf8Error;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;

use super::error::ConflictError;
use super::trie::RoutingTrie;
use crate::http;
use crate::logger;

/// Boxed response future returned by a `Handler`
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response<Full<Bytes>>> + Send>>;

/// Processes one request and produces its response.
///
/// Implemented for any `Fn(Request<Bytes>) -> impl Future<Output = Response<_>>`, so
/// plain async functions and closures can be registered directly.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<Bytes>) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Bytes>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response<Full<Bytes>>> + Send + 'static,
{
    fn call(&self, req: Request<Bytes>) -> HandlerFuture {
        Box::pin(self(req))
    }
}

/// Shared handle to a registered handler
pub type HandlerRef = Arc<dyn Handler>;

/// Request path with percent-escapes decoded, the form routes are matched against.
///
/// Fails when the decoded bytes are not UTF-8.
pub fn decoded_path<B>(req: &Request<B>) -> Result<Cow<'_, str>, Utf8Error> {
    percent_decode_str(req.uri().path()).decode_utf8()
}

/// Method + path multiplexer
#[derive(Default)]
pub struct Router {
    trie: RoutingTrie<HandlerRef>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            trie: RoutingTrie::new(),
        }
    }

    /// Number of registered routes
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Register `handler`, returning the conflict instead of panicking.
    pub fn try_handle(
        &mut self,
        method: Method,
        path: &str,
        handler: HandlerRef,
    ) -> Result<(), ConflictError> {
        let display_method = method.clone();
        match self.trie.insert(path, method, handler) {
            Ok(()) => {
                logger::log_route_registered(&display_method, path);
                Ok(())
            }
            Err(e) => {
                logger::log_route_conflict(&e);
                Err(e)
            }
        }
    }

    /// Register `handler` for `method` on the path template `path`.
    ///
    /// # Panics
    ///
    /// Panics if the route conflicts with one already registered. A conflicting
    /// route table is a programming error and must not reach the serving phase.
    pub fn handle(&mut self, method: Method, path: &str, handler: HandlerRef) {
        if let Err(e) = self.try_handle(method, path, handler) {
            panic!("{e}");
        }
    }

    /// Register a function or closure as the handler.
    ///
    /// # Panics
    ///
    /// Same as [`Router::handle`].
    pub fn handle_func<H: Handler>(&mut self, method: Method, path: &str, handler: H) {
        self.handle(method, path, Arc::new(handler));
    }

    /// Dispatch `req` to its handler, or answer 404 without calling any handler.
    ///
    /// A path that does not decode to UTF-8 is answered with 400.
    pub async fn serve(&self, mut req: Request<Bytes>) -> Response<Full<Bytes>> {
        let found = match decoded_path(&req) {
            Ok(path) => self
                .trie
                .lookup(&path, req.method())
                .map(|(handler, vars)| (Arc::clone(handler), vars)),
            Err(e) => {
                logger::log_debug(&format!(
                    "[Router] Undecodable path {}: {e}",
                    req.uri().path()
                ));
                return http::build_400_response();
            }
        };

        let (handler, vars) = match found {
            Ok(found) => found,
            Err(e) => {
                logger::log_route_not_found(&e);
                return http::build_404_response();
            }
        };

        req.extensions_mut().insert(vars);
        handler.call(req).await
    }
}
