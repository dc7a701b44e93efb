//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_vault;

pub async fn cmd_serve(
    data_dir: Option<&Path>,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    cors_origins: Vec<String>,
) -> Result<()> {
    let vault = open_vault(data_dir)?;

    println!("🚀 Starting Kharch web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if cors_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS origins: {}", cors_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = kharch_server::ServerConfig {
        allowed_origins: cors_origins,
    };

    let static_dir_str = static_dir.and_then(|p| p.to_str());
    kharch_server::serve(vault, host, port, static_dir_str, config).await?;

    Ok(())
}
