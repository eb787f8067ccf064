use report_server::{print_banner, setup_environment, Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    print_banner();

    tracing::info!("Hotel report server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (backend client + snapshot cache)
    let state = ServerState::initialize(&config);

    // 4. Serve HTTP until ctrl-c
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
