//! Gigi Run entry point
//!
//! The browser build drives the core through `gigi_run::web`. Natively this
//! runs a headless scripted playthrough, which is handy for tuning work:
//!
//! ```text
//! RUST_LOG=debug gigi-run [tuning.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use gigi_run::sim::{GameEvent, TickInput, TickOutcome};
    use gigi_run::{Session, Tuning, UiCommand};

    env_logger::init();
    log::info!("Gigi Run (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            Tuning::from_json(&std::fs::read_to_string(path)?)?
        }
        None => Tuning::default(),
    };

    let mut session = Session::new(tuning, 800.0, 600.0);
    session.apply(UiCommand::Play)?;
    session.apply(UiCommand::ChooseCharacter("Gigi".into()))?;
    // No loader natively; every sprite falls back to the placeholder
    for key in session.assets().pending_keys() {
        session.assets().complete(&key, Ok(gigi_run::assets::Sprite::placeholder()));
    }

    // Hold right, hop every 40 ticks
    const MAX_TICKS: u64 = 60 * 120;
    let mut outcome = TickOutcome::None;
    for t in 0..MAX_TICKS {
        let input = TickInput {
            right: true,
            up: t % 40 < 2,
            ..Default::default()
        };
        let report = session.frame(&input);
        for event in &session.sim().events {
            match event {
                GameEvent::CoinCollected { .. } => {
                    log::info!("Coin! score={}", session.sim().score)
                }
                other => log::debug!("{:?}", other),
            }
        }
        if report.outcome != TickOutcome::None {
            outcome = report.outcome;
            break;
        }
    }

    let sim = session.sim();
    println!(
        "{:?} after {} ticks: x={:.1} score={} phase={:?}",
        outcome,
        sim.time_ticks,
        sim.player.pos.x,
        sim.score,
        session.phase()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is gigi_run::web::start
}
