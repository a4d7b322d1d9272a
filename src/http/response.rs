//! HTTP response building module
//!
//! Builders never panic: if `Response::builder` rejects its input the failure is
//! logged and a bare response with the same body is returned.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 page not found\n")
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::BAD_REQUEST, "400 Bad Request\n")
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large\n")
}

/// Build plain-text response
pub fn build_text_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_response(status, TEXT_PLAIN, body.into())
}

/// Build JSON response, or 500 if `value` cannot be serialized
pub fn build_json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(mut body) => {
            body.push(b'\n');
            build_response(status, "application/json", Bytes::from(body))
        }
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize JSON response: {e}"));
            build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error\n")
        }
    }
}

fn build_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("X-Content-Type-Options", "nosniff")
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            let mut resp = Response::new(Full::new(body));
            *resp.status_mut() = status;
            resp
        })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
