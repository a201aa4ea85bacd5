//! Server startup utilities.

use fitlog_config::ServerConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    _______ __  __
   / ____(_) /_/ /___  ____ _
  / /_  / / __/ / __ \/ __ `/
 / __/ / / /_/ / /_/ / /_/ /
/_/   /_/\__/_/\____/\__, /
                    /____/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(server: &ServerConfig, cache_backend: &str) {
    let separator = "=".repeat(60);
    let addr = server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("Cache:     {}", cache_backend);
    info!("{}", separator);
}
