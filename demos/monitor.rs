//! Monitor - subscribe to a destination and print every frame.
//!
//! This demo shows:
//! - Connecting and logging in with the thin client
//! - Subscribing to a destination
//! - Draining frames in a loop
//!
//! # Running against a local broker
//!
//! ```sh
//! cargo run --example monitor -- localhost 61613 /queue/test
//! ```

use stompwire::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port: u16 = args.next().as_deref().unwrap_or("61613").parse()?;
    let destination = args.next().unwrap_or_else(|| "/queue/test".to_string());

    let mut client = Client::connect(&host, port).await?;
    client.login(&host, None, None).await?;
    client.subscribe(&destination, "monitor-0").await?;

    loop {
        let frame = client.next().await?;
        println!(
            "{} {:?} ({} body bytes)",
            frame.command,
            frame.headers,
            frame.body_len()
        );
    }
}
