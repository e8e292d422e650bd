//! A complete game driven locally by the mock judge.
//!
//! Three players, three rounds, no network: the demo creates a room,
//! starts the game, and submits mock-judge verdicts for drawing
//! snapshots until the game finishes, printing each verdict and the
//! final scoreboard. Run with `RUST_LOG=info` to watch the room's
//! lifecycle transitions.

use sketchparty_judge::{MockEvaluator, evaluate_drawing};
use sketchparty_protocol::{Player, RoomStatus, RoundStatus};
use sketchparty_room::{CreateRoomOptions, RoomConfig, RoomRegistry};
use tracing_subscriber::EnvFilter;

/// A stand-in for a canvas export; the mock judge never looks at it.
const SNAPSHOT: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut registry = RoomRegistry::new(RoomConfig::default());

    let (room, host) = registry.create_room(CreateRoomOptions {
        host_name: "Ada".into(),
        target_round_count: Some(3),
        prompt_pool: Some(
            ["cat", "rocket", "umbrella", "dinosaur"]
                .map(String::from)
                .to_vec(),
        ),
    });
    println!("room {} created by {}", room.id, host.name);

    let (_, grace) = registry.join_room(&room.id, "Grace").await?;
    let (_, linus) = registry.join_room(&room.id, "Linus").await?;
    let players = [host, grace, linus];

    registry.start_game(&room.id, players[0].id.clone()).await?;
    println!("game started: {} rounds", room.target_round_count);

    let judge = MockEvaluator;
    let mut submissions = 0usize;

    loop {
        let Some(round) = registry.current_round(&room.id).await? else {
            break;
        };
        if round.status != RoundStatus::Active {
            break;
        }

        // Players take turns submitting snapshots; the judge guesses
        // from the round's full candidate list.
        let artist: &Player = &players[submissions % players.len()];
        let evaluation =
            evaluate_drawing(&judge, SNAPSHOT, &round.choices).await;
        submissions += 1;

        let outcome = registry
            .apply_evaluation(&room.id, artist.id.clone(), evaluation.clone())
            .await?;

        if outcome.matched {
            println!(
                "round {}: {} wins — the judge saw {:?} (confidence {:.2})",
                round.index, artist.name, evaluation.guess,
                evaluation.confidence,
            );
        } else if let Some(prompt) = outcome.correct_prompt {
            println!(
                "round {}: judge guessed {:?}, but the prompt is {:?} — keep drawing",
                round.index, evaluation.guess, prompt,
            );
        }

        if outcome.room.status == RoomStatus::Finished {
            break;
        }
    }

    let snapshot = registry.public_room(&room.id).await?;
    println!("\nfinal scores after {submissions} submissions:");
    let mut standings = snapshot.players.clone();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    for player in standings {
        println!("  {:<8} {}", player.name, player.score);
    }

    Ok(())
}
