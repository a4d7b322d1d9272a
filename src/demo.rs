//! Sample route table served by the `httpmux` binary
//!
//! Every handler echoes what the router resolved: its own name, the request method
//! and decoded path, and the captured variables.

use std::borrow::Cow;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;

use crate::http;
use crate::mux::{decoded_path, vars, Handler, Router, Vars};

#[derive(Debug, Serialize)]
struct Described<'a> {
    name: &'a str,
    method: &'a str,
    path: &'a str,
    vars: &'a Vars,
}

/// Handler that reports `name` and the request it resolved
pub fn describe(name: &'static str) -> impl Handler {
    move |req: Request<Bytes>| async move { describe_request(name, &req) }
}

fn describe_request(name: &str, req: &Request<Bytes>) -> Response<Full<Bytes>> {
    let path = decoded_path(req).unwrap_or(Cow::Borrowed(req.uri().path()));
    let body = Described {
        name,
        method: req.method().as_str(),
        path: &path,
        vars: vars(req),
    };
    http::build_json_response(StatusCode::OK, &body)
}

/// Build the sample route table
pub fn router() -> Router {
    let mut router = Router::new();
    router.handle_func(Method::GET, "/v1/users", describe("get users"));
    router.handle_func(Method::POST, "/v1/users", describe("create new user"));
    router.handle_func(Method::GET, "/v1/users/{uid}", describe("get users detail"));
    router
}
