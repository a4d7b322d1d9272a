// Connection handling module
// Accepts one TCP connection, serves its requests through the router

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;

use super::state::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Accept a connection, enforcing the connection limit.
///
/// The counter is incremented before the limit check so two concurrent accepts
/// cannot both slip under the limit.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
) {
    let prev_count = state.active_connections.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            state.active_connections.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, peer_addr, Arc::clone(state));
}

/// Serve a single connection in a spawned task.
///
/// HTTP/1.1 with keep-alive when `keep_alive_timeout > 0`. The whole connection is
/// bounded by `max(read_timeout, write_timeout)`.
fn handle_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout = Duration::from_secs(state.config.connection_timeout());

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handle_request(req, peer_addr, Arc::clone(&service_state))),
        );

        match tokio::time::timeout(timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout.as_secs()
            )),
        }

        state.active_connections.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Read the body, dispatch through the router and write the access log line.
async fn handle_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut entry = AccessLogEntry::from_request(&req, peer_addr);

    let response = match read_body(req, state.config.http.max_body_size).await {
        Ok(req) => state.router.serve(req).await,
        Err(resp) => resp,
    };

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Buffer the request body, rejecting anything larger than `max_body_size`.
async fn read_body(
    req: Request<Incoming>,
    max_body_size: u64,
) -> Result<Request<Bytes>, Response<Full<Bytes>>> {
    if let Some(len) = req.body().size_hint().exact() {
        if len > max_body_size {
            logger::log_warning(&format!(
                "Request body too large: {len} bytes (max: {max_body_size})"
            ));
            return Err(http::build_413_response());
        }
    }

    let (parts, body) = req.into_parts();
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);

    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(Request::from_parts(parts, collected.to_bytes())),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_warning(&format!("Request body exceeded {max_body_size} bytes"));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(http::build_400_response())
        }
    }
}
