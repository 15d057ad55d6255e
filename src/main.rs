//! Demo runner: boots one in-memory session and scripts every player
//! through nights and votes until the game ends.

use std::collections::HashSet;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use nocturne::domain::roles::capabilities_for;
use nocturne::domain::session::Phase;
use nocturne::engine::{Engine, SessionHandle};
use nocturne::protocol::{Intent, Notification};
use nocturne::{telemetry, EngineConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment; see
    // EngineConfig for the recognized keys.
    let config = EngineConfig::from_env();
    let engine = Engine::in_memory(config);

    let names: Vec<String> = ["Ada", "Briar", "Cole", "Dara", "Edwin", "Fern"]
        .iter()
        .map(|n| n.to_string())
        .collect();
    let handle = engine.create_session(&names).await?;
    let mut rx = handle.subscribe();

    // Act once per window: keyed by (phase bucket, day, turn).
    let mut acted: HashSet<(u8, u32, u8)> = HashSet::new();

    loop {
        match rx.recv().await {
            Ok(Notification::SessionEnded {
                reason,
                winner,
                roster,
            }) => {
                info!(reason, winner = ?winner, survivors = roster.iter().filter(|r| r.survived).count(), "Game over");
                break;
            }
            Ok(Notification::Countdown { .. }) => drive(&handle, &mut acted).await,
            Ok(notification) => debug!(?notification, "Session event"),
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
    Ok(())
}

/// Scripted players: each night the current turn's actors pick the first
/// living other player; each vote everyone piles onto the same target.
async fn drive(handle: &SessionHandle, acted: &mut HashSet<(u8, u32, u8)>) {
    let Ok(state) = handle.state().await else {
        return;
    };

    match state.phase {
        Phase::PerformAction => {
            if !acted.insert((1, state.day, state.current_turn)) {
                return;
            }
            let actors: Vec<_> = state
                .living()
                .filter(|p| p.priority == state.current_turn)
                .cloned()
                .collect();
            for actor in actors {
                let caps = capabilities_for(actor.role, actor.alignment);
                let Some(action) = caps.actions.first() else {
                    continue;
                };
                let Some(target) = state.living().find(|t| t.id != actor.id) else {
                    continue;
                };
                let _ = handle
                    .handle(actor.id, Intent::SelectTarget { target: target.id })
                    .await;
                let _ = handle
                    .handle(actor.id, Intent::SubmitAction { action: *action })
                    .await;
            }
        }
        Phase::Vote => {
            if !acted.insert((2, state.day, 0)) {
                return;
            }
            let living: Vec<_> = state.living().cloned().collect();
            for voter in &living {
                let target = living.iter().find(|t| t.id != voter.id).map(|t| t.id);
                let _ = handle
                    .handle(voter.id, Intent::CastVote { target })
                    .await;
            }
        }
        _ => {}
    }
}
