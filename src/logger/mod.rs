//! Logger module
//!
//! Provides logging utilities for the router server including:
//! - Server lifecycle logging
//! - Route registration and dispatch logging
//! - Access logging with multiple formats
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::fmt;
use std::net::SocketAddr;

use chrono::Local;
use hyper::Method;

use crate::config::{Config, LoggingConfig};
use crate::mux::{ConflictError, NotFoundError};

/// Severity of a log line, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    /// Parse a configured level name, falling back to `Info` for unknown names
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" | "trace" => Self::Debug,
            _ => Self::Info,
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        Level::parse(&config.level),
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

fn log(level: Level, message: &str) {
    let line = format!("{} [{level}] {message}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"));
    match writer::get() {
        Some(w) if level <= w.level() => w.write(level, &line),
        Some(_) => {}
        None if level <= Level::Warn => eprintln!("{line}"),
        None if level == Level::Info => println!("{line}"),
        None => {}
    }
}

pub fn log_error(message: &str) {
    log(Level::Error, message);
}

pub fn log_warning(message: &str) {
    log(Level::Warn, message);
}

pub fn log_info(message: &str) {
    log(Level::Info, message);
}

pub fn log_debug(message: &str) {
    log(Level::Debug, message);
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, routes: usize) {
    log_info("======================================");
    log_info("httpmux started successfully");
    log_info(&format!("Listening on: http://{addr}"));
    log_info(&format!("Routes registered: {routes}"));
    log_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        log_info(&format!("Max connections: {max}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    log_info("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl fmt::Debug) {
    log_error(&format!("[Connection] Failed to serve connection: {err:?}"));
}

pub fn log_route_registered(method: &Method, path: &str) {
    log_debug(&format!("[Router] Registered {method} {path}"));
}

pub fn log_route_conflict(err: &ConflictError) {
    log_error(&format!("[Router] Rejected route: {err}"));
}

pub fn log_route_not_found(err: &NotFoundError) {
    log_debug(&format!("[Router] {err}"));
}

pub fn log_shutdown(active_connections: usize) {
    log_info(&format!(
        "[Shutdown] Listener closed, {active_connections} connection(s) still draining"
    ));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}
