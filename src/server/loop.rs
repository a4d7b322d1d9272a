// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::state::AppState;
use crate::logger;

/// Accept connections on `listener` until `shutdown` resolves.
///
/// Connections already accepted keep running in their own tasks; only the
/// listener is closed.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()>,
) -> std::io::Result<()> {
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => break,
        }
    }

    drop(listener);
    logger::log_shutdown(state.active_connections());
    Ok(())
}
