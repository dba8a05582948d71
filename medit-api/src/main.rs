//! Medit API Server
//!
//! Main entry point for the Medit health-consultation backend

use medit_api::start_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    start_server().await?;
    Ok(())
}
