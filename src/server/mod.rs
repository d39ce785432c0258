//! Preview server for the generated site

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::{ServeDir, ServeFile};

use crate::Site;

/// Serve the public directory
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let public_dir = site.public_dir.clone();
    let not_found = public_dir.join("404.html");

    let serve = ServeDir::new(&public_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(not_found));

    let app = Router::new().fallback_service(serve);

    // "localhost" is common in docs but not a bindable address
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Serving {} at http://{}:{}", public_dir.display(), ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
