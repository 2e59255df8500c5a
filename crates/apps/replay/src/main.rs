use std::fs;
use std::path::PathBuf;

use analytics::records::LocationRecord;
use clap::Parser;
use runtime::clock::ManualClock;
use session::{HeatmapSession, SessionOptions};
use surface::{ContainerId, HeadlessHost, HostEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replays a captured sequence of location-array refreshes through a
/// heatmap session on a headless surface, then prints the host operations
/// the session performed.
///
/// The capture file is JSON: an array of refreshes, each an array of
/// location records as delivered by the analytics feed.
#[derive(Debug, Parser)]
#[command(name = "replay")]
struct Args {
    /// Capture file to replay.
    capture: PathBuf,

    /// Seconds advanced between refreshes.
    #[arg(long, default_value_t = 1.0)]
    step_s: f64,

    /// Simulate a container resize burst before every refresh.
    #[arg(long)]
    resize: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let raw = fs::read_to_string(&args.capture)?;
    let refreshes: Vec<Vec<LocationRecord>> = serde_json::from_str(&raw)?;
    info!(
        refreshes = refreshes.len(),
        capture = %args.capture.display(),
        "replaying capture"
    );

    let mut host = HeadlessHost::new();
    let mut clock = ManualClock::new();
    let mut session = HeatmapSession::with_options(SessionOptions::default());
    let container = ContainerId(1);

    session.mount(&mut host, container);
    let surface = session
        .surface()
        .ok_or("session did not create a surface")?;
    let ready = host.complete_creation(surface);
    session.handle_event(&mut host, ready, clock.now());

    for (index, records) in refreshes.iter().enumerate() {
        clock.advance(args.step_s);
        if args.resize {
            for _ in 0..3 {
                session.handle_event(
                    &mut host,
                    HostEvent::ContainerResized(container),
                    clock.advance(0.01),
                );
            }
        }
        let stats = session.update(&mut host, records);
        session.tick(&mut host, clock.advance(surface::RESIZE_DEBOUNCE_S * 2.0));
        info!(refresh = index, ?stats, "refresh applied");
    }

    session.unmount(&mut host);

    for op in host.ops() {
        println!("{op:?}");
    }
    Ok(())
}
