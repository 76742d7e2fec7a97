//! Sheep Counter entry point
//!
//! Headless demo: runs a session with a bot that clicks one uncounted sheep
//! at a time, logging round results and the round clock.
//!
//! Usage: `sheep-counter [catalog.json] [seed]`

use sheep_counter::consts::SIM_DT;
use sheep_counter::sim::{GameEvent, LevelPhase};
use sheep_counter::{GameConfig, GameError, Session};

/// Seconds the bot waits between clicks
const BOT_CLICK_INTERVAL: f32 = 0.7;
/// Rounds to play before exiting
const DEMO_ROUNDS: u32 = 4;
/// Hard stop for the demo (simulated seconds)
const DEMO_TIME_LIMIT: f32 = 600.0;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    log::info!("Sheep Counter (headless) starting, seed {seed}");
    let mut session = Session::new(config, seed)?;

    let mut since_click = 0.0;
    let mut elapsed = 0.0;
    while session.rounds_played < DEMO_ROUNDS && elapsed < DEMO_TIME_LIMIT {
        since_click += SIM_DT;
        elapsed += SIM_DT;

        let round = session.round();
        if round.level.phase == LevelPhase::Playing && since_click >= BOT_CLICK_INTERVAL {
            if let Some(sheep) = round.sheep.iter().find(|s| !s.is_counted()) {
                let id = sheep.id;
                session.click(id);
            }
            since_click = 0.0;
        }

        session.step()?;

        for event in session.drain_events() {
            match event {
                GameEvent::SheepCounted { sheep, count, total } => {
                    println!(
                        "[{}] TIME: {}  sheep {sheep} counted ({count}/{total})",
                        session.round().level.id,
                        session.round().level.timer.reading()
                    );
                }
                GameEvent::DoubleCounted { sheep } => {
                    println!("sheep {sheep} was already counted!");
                }
                GameEvent::LoadLevel(id) => println!("-> loading {id}"),
                _ => {}
            }
        }
    }

    println!(
        "Played {} rounds: {} won, {} lost",
        session.rounds_played, session.wins, session.losses
    );
    Ok(())
}
