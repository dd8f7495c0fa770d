use anyhow::Context;
use portal_server::{
    get_configuration, get_socket_address, initialize_tracing, no_routes, ApiServerBuilder,
};
use portal_shared::telemetry;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (file, path) = telemetry::create_trace_file("portal-server")
        .context("failed to create file for traces")?;
    initialize_tracing("portal_server", "info", file);
    println!("Traces being written to: {path:?}");

    let configuration = get_configuration().context("failed to read configuration")?;
    let addr = get_socket_address(&configuration.application)
        .context("failed to get socket address")?;
    let (server, _port) = ApiServerBuilder::new(configuration, env!("CARGO_PKG_VERSION"))
        .build_runnable_api_server(addr, no_routes, no_routes)
        .context("failed to initialize API Server")?;

    match server.run().await {
        Ok(()) => info!("API Server has exited with Ok(())"),
        Err(e) => {
            error!(
                error.cause_chain = ?e,
                error.message = %e,
                "API Server resulted in an error: {e}"
            );
            return Err(e);
        }
    }
    Ok(())
}
