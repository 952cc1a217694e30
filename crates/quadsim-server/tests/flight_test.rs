//! End-to-end flight tests over the real transport.
//!
//! Run with: cargo test --test flight_test -- --ignored
//!
//! Requires a running quadsim server at http://localhost:9990
//! or set QUADSIM_TEST_URL.

use futures_util::{SinkExt, StreamExt};
use reqwest::Client;
use serde_json::{json, Value};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

fn base_url() -> String {
    std::env::var("QUADSIM_TEST_URL").unwrap_or_else(|_| "http://localhost:9990".to_string())
}

fn ws_url() -> String {
    format!("{}/v1/command", base_url().replacen("http", "ws", 1))
}

async fn advance_frame(client: &Client, fps: f64) -> Value {
    client
        .post(format!("{}/v1/frame", base_url()))
        .json(&json!({ "fps": fps }))
        .send()
        .await
        .expect("frame request")
        .json()
        .await
        .expect("snapshot json")
}

#[tokio::test]
#[ignore] // Run only when server is running
async fn test_up_command_flies_to_altitude() {
    let (mut socket, _) = connect_async(ws_url()).await.expect("connect");
    let client = Client::new();

    socket
        .send(Message::Text("up 100".to_string()))
        .await
        .expect("send command");

    // Drive frames until the copter comes to rest at altitude.
    let mut snap = advance_frame(&client, 30.0).await;
    for _ in 0..5000 {
        snap = advance_frame(&client, 30.0).await;
        if snap["copter_status"] == "atrest" && snap["queue_depth"] == 0 {
            break;
        }
    }

    let z = snap["copter_destination"]["z"].as_f64().unwrap();
    assert!((z - 100.0 / 30.48).abs() < 1e-6);

    // The dispatch response arrives on the command socket.
    let reply = socket.next().await.expect("response frame").expect("ws ok");
    assert_eq!(reply.into_text().unwrap(), "ok");
}

#[tokio::test]
#[ignore]
async fn test_invalid_command_gets_immediate_error() {
    let (mut socket, _) = connect_async(ws_url()).await.expect("connect");

    socket
        .send(Message::Text("flyaway 10".to_string()))
        .await
        .expect("send command");

    let reply = socket.next().await.expect("response frame").expect("ws ok");
    assert_eq!(reply.into_text().unwrap(), "Invalid Command");
}

#[tokio::test]
#[ignore]
async fn test_connection_flag_follows_socket() {
    let client = Client::new();

    let (socket, _) = connect_async(ws_url()).await.expect("connect");
    let snap: Value = client
        .get(format!("{}/v1/state", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snap["connected"], true);

    drop(socket);
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let snap: Value = client
        .get(format!("{}/v1/state", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snap["connected"], false);
}
