use std::time::Duration;

use laterjoin::prelude::*;
use serde::Deserialize;

const BUILTIN_SCRIPT: &str = include_str!("../scripts/late_joiners.json");

// ---------------------------------------------------------------------------
// Script format
// ---------------------------------------------------------------------------

/// One line of the script: an event or console command, at a time offset.
#[derive(Debug, Deserialize)]
struct Step {
    at_secs: u64,
    #[serde(flatten)]
    action: Action,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Action {
    Command { command: String },
    Event(RoundEvent),
}

fn parse_script(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Prints each side effect as it happens and keeps a record of it.
#[derive(Default)]
struct PrintingHost {
    record: RecordingHost,
}

impl Host for PrintingHost {
    fn change_role(&mut self, participant: ParticipantId, role: Role) {
        println!("           host: {participant} -> {role}");
        self.record.change_role(participant, role);
    }

    fn set_door_locked(&mut self, door: &str, locked: bool) {
        let state = if locked { "locked" } else { "unlocked" };
        println!("           host: door {door} {state}");
        self.record.set_door_locked(door, locked);
    }
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Replays `steps` through a fresh driver and returns the final snapshot
/// with everything the host was asked to do.
///
/// Meant for a paused Tokio clock: the sleeps between steps complete
/// instantly while the spawn window timer still fires at the right
/// moment.
async fn replay(config: EngineConfig, steps: Vec<Step>) -> Result<(RoundSnapshot, RecordingHost), LaterJoinError> {
    let driver = spawn_driver(RoundEngine::new(config.clone()), PrintingHost::default(), 64);
    let console = Console::new(driver.clone(), ConfigSource::Inline(config));
    let start = tokio::time::Instant::now();

    for step in steps {
        tokio::time::sleep_until(start + Duration::from_secs(step.at_secs)).await;
        match step.action {
            Action::Event(event) => {
                println!("[{:>5}s] {event:?}", step.at_secs);
                match driver.send_event(event).await? {
                    EventReply::Ack => {}
                    reply => println!("           reply: {reply:?}"),
                }
            }
            Action::Command { command } => {
                println!("[{:>5}s] console: {command}", step.at_secs);
                match console.execute_line(&command).await {
                    Ok(reply) => println!("           reply: {reply}"),
                    Err(LaterJoinError::Command(e)) => println!("           error: {e}"),
                    Err(e) => return Err(e),
                }
            }
        }
    }

    let snapshot = driver.snapshot().await?;
    let host = driver.shutdown().await?;
    Ok((snapshot, host.record))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Usage: `scripted-round [SCRIPT.json] [CONFIG.json]`
#[tokio::main(flavor = "current_thread", start_paused = true)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    laterjoin::init_tracing();

    let mut args = std::env::args().skip(1);
    let script = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => BUILTIN_SCRIPT.to_string(),
    };
    let config = match args.next() {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig {
            rng_seed: Some(2024),
            ..EngineConfig::default()
        },
    };

    let steps = parse_script(&script)?;
    tracing::info!(steps = steps.len(), "replaying script");

    let (snapshot, host) = replay(config, steps).await?;
    println!("\n{} host effects", host.effects().len());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
