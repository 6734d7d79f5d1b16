//! HTTP API server command

use super::helpers::{build_service, resolve_config, GlobalArgs};
use std::net::SocketAddr;
use tracing::debug;
use triage_core::{
    api::{ApiServer, ApiServerConfig},
    error::Result,
};

/// Handle API server startup command
pub async fn handle(addr: Option<String>, args: &GlobalArgs) -> Result<()> {
    debug!("Starting HTTP API server...");

    let config = resolve_config(args)?;
    let addr = addr.unwrap_or_else(|| config.listen_addr.clone());
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", addr, e))?;

    let service = build_service(&config).await?;

    println!();
    println!("Triage API Server");
    println!();
    println!("   Address: http://{}", socket_addr);
    println!("   Database: {}", config.database_path);
    println!("   Model: {}", config.model_path);
    println!();
    println!("   Endpoints:");
    println!("   - GET    /tasks - List tasks");
    println!("   - POST   /tasks - Add a task");
    println!("   - POST   /tasks/:id/priority - Set your priority");
    println!("   - DELETE /tasks/:id - Delete a task");
    println!("   - POST   /predict - Suggest a priority");
    println!("   - POST   /retrain - Retrain the model");
    println!("   - GET    /metrics - Model performance");
    println!("   - GET    /health - Health check");
    println!();

    let server = ApiServer::new(ApiServerConfig { addr: socket_addr }, service);
    server.serve().await?;

    Ok(())
}
