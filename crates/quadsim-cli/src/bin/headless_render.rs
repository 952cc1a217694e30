//! Headless stand-in for the renderer.
//!
//! Drives the frame endpoint at a fixed rate, printing the copter's
//! position each frame, and stops once the copter is at rest with an
//! empty queue (or the frame budget runs out). Useful for watching a
//! flight from a terminal and for exercising the tick loop end to end.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use quadsim_core::Snapshot;

#[derive(Parser)]
#[command(about = "Drive the simulator's frame loop without a window")]
struct Args {
    /// Server base URL (default: QUADSIM_URL or http://localhost:9990)
    #[arg(long)]
    url: Option<String>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Maximum number of frames to run
    #[arg(long, default_value_t = 100_000)]
    frames: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0, "fps must be positive");

    let base = quadsim_cli::base_url(args.url.as_deref());
    let client = reqwest::Client::new();
    let frame_url = format!("{}/v1/frame", base.trim_end_matches('/'));
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / args.fps));

    for frame in 0..args.frames {
        interval.tick().await;

        let snapshot: Snapshot = client
            .post(&frame_url)
            .json(&json!({ "fps": args.fps }))
            .send()
            .await
            .with_context(|| format!("posting frame to {}", frame_url))?
            .error_for_status()?
            .json()
            .await
            .context("decoding snapshot")?;

        let pos = snapshot.copter_position;
        println!(
            "frame {:>6}  copter ({:>8.3}, {:>8.3}, {:>8.3})  {:?}  queue {}",
            frame, pos.x, pos.y, pos.z, snapshot.copter_status, snapshot.queue_depth
        );

        if snapshot.copter_status == quadsim_core::MotionStatus::AtRest
            && snapshot.queue_depth == 0
            && frame > 0
        {
            println!("copter at rest, done");
            break;
        }
    }

    Ok(())
}
