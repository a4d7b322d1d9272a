// Server module entry
// Listener setup, accept loop, per-connection serving and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;
pub mod state;

// `loop` is a keyword, so the file is mounted as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::run;
pub use signal::shutdown_signal;
pub use state::AppState;
