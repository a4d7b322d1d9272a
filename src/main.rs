use std::sync::Arc;

use httpmux::config::Config;
use httpmux::{demo, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    // Route table is complete before the first connection is accepted
    let router = demo::router();
    logger::log_server_start(&listener.local_addr()?, &cfg, router.len());

    let state = Arc::new(server::AppState::new(cfg, router));
    server::run(listener, state, server::shutdown_signal()).await?;
    Ok(())
}
