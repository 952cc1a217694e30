//! Send protocol commands to the simulator over its WebSocket.
//!
//! Responses for queued commands arrive asynchronously, once the frame
//! loop dispatches them, so after sending we listen for a short while
//! and print whatever comes back.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Parser)]
#[command(about = "Send commands to the quadcopter simulator")]
struct Args {
    /// Command lines to send, e.g. "up 50" "left 300"
    #[arg(required = true)]
    commands: Vec<String>,

    /// Server base URL (default: QUADSIM_URL or http://localhost:9990)
    #[arg(long)]
    url: Option<String>,

    /// Seconds to wait for responses after sending
    #[arg(long, default_value_t = 10)]
    wait: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let base = quadsim_cli::base_url(args.url.as_deref());
    let ws_url = quadsim_cli::command_ws_url(&base);

    let (mut socket, _) = connect_async(&ws_url)
        .await
        .with_context(|| format!("connecting to {}", ws_url))?;

    for command in &args.commands {
        socket
            .send(Message::Text(command.clone()))
            .await
            .with_context(|| format!("sending '{}'", command))?;
        println!("sent: {}", command);
    }

    let mut remaining = args.commands.len();
    let deadline = tokio::time::sleep(Duration::from_secs(args.wait));
    tokio::pin!(deadline);

    while remaining > 0 {
        tokio::select! {
            frame = socket.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        println!("response: {}", text);
                        remaining -= 1;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        eprintln!("socket error: {}", err);
                        break;
                    }
                    None => break,
                }
            }
            _ = &mut deadline => {
                eprintln!("timed out with {} response(s) outstanding", remaining);
                break;
            }
        }
    }

    socket.close(None).await.ok();
    Ok(())
}
