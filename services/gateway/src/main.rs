use gateway::TcpGateway;
use std::net::SocketAddr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(9000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("starting order book gateway");

    TcpGateway::new().run(addr)?;
    Ok(())
}
