//! Stack Tower entry point
//!
//! The browser build starts from `stack_tower::web`. Natively there is no
//! renderer, so this runs a headless autoplay session: the oscillator sweeps,
//! a jittery "player" clicks near the tower center, debris is animated and
//! cleaned up, and the run is logged until it ends.
//!
//! Usage: `stack-tower [seed] [skill]` where skill is the worst click offset
//! in units (default 0.35).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let skill = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.35);

    log::info!("Stack Tower (native autoplay) seed {} skill {}", seed, skill);
    let summary = autoplay::run(seed, skill);
    println!(
        "score {} | height {} | perfect {} | debris spawned {} | {:.1}s simulated",
        summary.score, summary.height, summary.perfect, summary.debris, summary.seconds
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is stack_tower::web::init, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use stack_tower::debris::DebrisField;
    use stack_tower::sim::{DropOutcome, GameEngine, GamePhase};

    /// Fixed frame step (60 Hz)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a round that never lines up
    const MAX_FRAMES_PER_ROUND: u32 = 60 * 30;
    const MAX_ROUNDS: u32 = 500;

    pub struct Summary {
        pub score: u32,
        pub height: u32,
        pub perfect: u32,
        pub debris: u32,
        pub seconds: f64,
    }

    pub fn run(seed: u64, skill: f32) -> Summary {
        let mut engine = GameEngine::new(seed);
        // Separate stream so the player's aim does not shift debris spin
        let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);
        let mut debris = DebrisField::new();
        let mut clock = 0.0f64;
        let mut perfect = 0;
        let mut spawned = 0;

        engine.start();

        for _ in 0..MAX_ROUNDS {
            if engine.phase() != GamePhase::Playing {
                break;
            }

            let mut osc = engine.oscillator();
            let aim = if skill > 0.0 {
                player.random_range(-skill..skill)
            } else {
                0.0
            };

            // Wait until the box passes the aim point
            let tolerance = osc.speed * FRAME_DT;
            for _ in 0..MAX_FRAMES_PER_ROUND {
                osc.step(FRAME_DT);
                clock += f64::from(FRAME_DT);
                advance_debris(&mut engine, &mut debris, clock);
                if (osc.offset() - aim).abs() <= tolerance {
                    break;
                }
            }

            let (x, z) = osc.drop_coords();
            match engine.drop(x, z) {
                DropOutcome::Placed {
                    quality, piece_id, ..
                } => {
                    if quality == stack_tower::sim::DropQuality::Perfect {
                        perfect += 1;
                    }
                    if piece_id.is_some() {
                        spawned += 1;
                    }
                }
                DropOutcome::GameOver { score, new_best } => {
                    log::info!("Run over: score {} (new best: {})", score, new_best);
                }
                DropOutcome::Ignored => {}
            }
        }

        // Let the last pieces finish falling
        while !engine.state().falling_pieces.is_empty() {
            clock += f64::from(FRAME_DT);
            advance_debris(&mut engine, &mut debris, clock);
        }

        let state = engine.state();
        Summary {
            score: state.score,
            height: state.height(),
            perfect,
            debris: spawned,
            seconds: clock,
        }
    }

    fn advance_debris(engine: &mut GameEngine, debris: &mut DebrisField, clock: f64) {
        debris.sync(&engine.state().falling_pieces, clock);
        for id in debris.finished(clock) {
            engine.remove_falling_piece(id);
        }
    }
}
