//! Simon Says entry point
//!
//! Native: plays one autopilot game in the terminal, persisting the high
//! score to `simon_says.json`. The web build uses `platform::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use simon_says::persistence::FileStore;
    use simon_says::platform;
    use simon_says::sim::{Autopilot, GameEvent, Phase};
    use simon_says::Engine;

    /// Host timer period
    const TICK_MS: u64 = 100;
    /// Chance the autopilot fumbles a signal
    const MISTAKE_CHANCE: f64 = 0.05;
    /// Stop runaway demos (about an hour of game time)
    const MAX_TICKS: u64 = 36_000;

    platform::init_logging();
    log::info!("Simon Says (native) starting...");

    let seed = platform::initial_seed();
    let mut engine = Engine::new(FileStore::new("simon_says.json"), seed);
    let mut pilot = Autopilot::new(seed ^ 0x5eed, MISTAKE_CHANCE);
    engine.start();

    for _ in 0..MAX_TICKS {
        for event in engine.drain_events() {
            pilot.observe(&event);
            match event {
                GameEvent::RoundStarted { round } => log::info!("Round {}", round),
                GameEvent::SignalLit(signal) => log::info!("  shows {}", signal),
                GameEvent::Mistake { lives_left } => {
                    log::info!("  mistake! {} lives left", lives_left)
                }
                GameEvent::GameOver {
                    score,
                    new_high_score,
                } => {
                    log::info!("Game over: score {}", score);
                    if new_high_score {
                        log::info!("New high score!");
                    }
                }
                _ => log::debug!("{:?}", event),
            }
        }

        if engine.phase() == Phase::GameOver {
            break;
        }

        if let Some(signal) = pilot.next_move(&engine.snapshot()) {
            log::debug!("  answers {}", signal);
            engine.submit_color(signal);
        }
        engine.tick(TICK_MS);
    }

    let snap = engine.snapshot();
    println!(
        "Final score {} after {} rounds (high score {})",
        snap.score, snap.round, snap.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WebGame, this is just to satisfy the compiler
}
