//! Inject - send one message to a destination and disconnect.
//!
//! # Running against a local broker
//!
//! ```sh
//! cargo run --example inject -- localhost 61613 /queue/test "hello"
//! ```

use stompwire::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port: u16 = args.next().as_deref().unwrap_or("61613").parse()?;
    let destination = args.next().unwrap_or_else(|| "/queue/test".to_string());
    let message = args.next().unwrap_or_else(|| "hello".to_string());

    let mut client = Client::connect(&host, port).await?;
    client.login(&host, None, None).await?;
    client.send(&destination, message.as_bytes()).await?;
    client.disconnect("inject-0").await?;

    println!("sent {} bytes to {}", message.len(), destination);
    Ok(())
}
