use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, worker count from config when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(config::AppState::new(cfg));

    // Explicit startup step: make sure the log directory exists before
    // the first request can arrive
    state.store.init_dir().map_err(|e| {
        logger::log_error(&format!(
            "Failed to create log directory '{}': {e}",
            state.config.ingest.log_dir.display()
        ));
        e
    })?;

    // Bind failure is the one fatal startup error: diagnostic, then
    // non-zero exit via the propagated Err
    let listener = server::create_listener(addr).map_err(|e| {
        logger::log_error(&format!("Failed to bind {addr}: {e}"));
        e
    })?;

    logger::log_server_start(&addr, &state.config);

    // LocalSet for spawn_local support in connection tasks
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run_accept_loop(listener, state))
        .await
}
