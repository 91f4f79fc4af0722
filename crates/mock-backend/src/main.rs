use anyhow::Result;
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "griddle-mock-backend", about = "Mock burger joint order service")]
struct Args {
    #[arg(long, default_value = "127.0.0.1", help = "Address to bind")]
    bind: String,
    #[arg(long, default_value_t = 8000, help = "Port to listen on")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_target(false).compact().init();

    let address = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(bind_address = %address, "mock order backend listening");

    axum::serve(listener, griddle_mock_backend::router()).await?;
    Ok(())
}
