//! `munglog serve`: start the HTTP gateway.

use std::sync::Arc;

use super::load_controller;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let (mut config, controller) = load_controller()?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🐶 Munglog Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:     {}", config.model);
    println!("   Filter:    {}", config.filter.strategy);

    munglog_gateway::start(&config.gateway, Arc::new(controller)).await?;

    Ok(())
}
