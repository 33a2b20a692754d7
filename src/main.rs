use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use social_butler::{
    api,
    config,
    gemini::{GeminiClient, GenerativeService},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new()?;
    config::Config::print_env_vars();

    let client = GeminiClient::from_config(&config)?;
    tracing::info!(text_model = client.text_model(), image_model = client.image_model(), "Gemini client ready");
    let service: Arc<dyn GenerativeService> = Arc::new(client);
    let state = Arc::new(api::routes::AppState::new(service));

    let app = api::routes::router(state, config.max_upload_bytes);

    // Run our application with safe parsing
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 8189", port_str);
        8189
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
