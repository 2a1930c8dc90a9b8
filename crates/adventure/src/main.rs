//! Headless adventure run
//!
//! Loads a simulation config and a level, places the treasure and monsters,
//! drives the player through a scripted tour and plans routes to and from
//! the player at the end.
//!
//! ```text
//! adventure [LEVEL] [--config PATH] [--seed N] [--monsters N]
//! ```
//!
//! `LEVEL` is a layout file or the name of a shipped level.

mod script;

use std::path::PathBuf;

use adventure_engine::config::{Config, SimulationConfig};
use adventure_engine::foundation::math::Vec3;
use adventure_engine::level::LevelLayout;
use adventure_engine::LevelSession;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ASSETS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");
const FRAME_SECS: f32 = 1.0 / 60.0;

struct Options {
    config: PathBuf,
    level: PathBuf,
    seed: u64,
    monsters: usize,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut options = Self {
            config: PathBuf::from(format!("{ASSETS}/simulation.toml")),
            level: PathBuf::from(format!("{ASSETS}/levels/city.ron")),
            seed: 7,
            monsters: 3,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => options.config = PathBuf::from(value(&mut args, "--config")?),
                "--seed" => options.seed = value(&mut args, "--seed")?.parse()?,
                "--monsters" => options.monsters = value(&mut args, "--monsters")?.parse()?,
                flag if flag.starts_with("--") => return Err(format!("unknown option {flag}").into()),
                level if level.ends_with(".ron") => options.level = PathBuf::from(level),
                level => options.level = PathBuf::from(format!("{ASSETS}/levels/{level}.ron")),
            }
        }

        Ok(options)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} needs a value"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = Options::parse(std::env::args().skip(1))?;
    let config = SimulationConfig::load_from_file(&options.config)?;
    let layout = LevelLayout::load(&options.level)?;
    log::info!("Starting level '{}'", layout.name);

    let mut session = LevelSession::start(config, layout.build_obstacles());
    let mut rng = StdRng::seed_from_u64(options.seed);

    let spawn = session.config().spawn.clone();
    let treasure = session.place_spawn(&spawn.treasure, &mut rng);
    log::info!("Treasure at {:?}", treasure);
    let monsters: Vec<_> = (0..options.monsters)
        .map(|_| session.place_spawn(&spawn.monster, &mut rng))
        .collect();
    for (index, monster) in monsters.iter().enumerate() {
        log::info!("Monster {} at {:?}", index, monster);
    }

    for segment in script::tour() {
        if let Some(kind) = segment.pickup {
            session.apply_effect(kind);
            log::info!("Picked up {:?}", kind);
        }
        let input = segment.input();
        for _ in 0..segment.ticks {
            session.tick(&input, FRAME_SECS);
        }
        log::debug!("After {} ticks the player is at {:?}", session.ticks(), session.player().position);
    }

    let player = session.player().position;
    log::info!("Tour finished at {:?} after {} ticks", player, session.ticks());

    report_route(&session, "Player to treasure", player, treasure);
    for (index, monster) in monsters.iter().enumerate() {
        report_route(&session, &format!("Monster {index} to player"), *monster, player);
    }

    session.restart();
    log::info!("Restarted at {:?}", session.player().position);
    Ok(())
}

fn report_route(session: &LevelSession, label: &str, from: Vec3, to: Vec3) {
    let path = session.find_path(from, to);
    match path.last() {
        Some(end) => log::info!("{label}: {} waypoints ending at {:?}", path.len(), end),
        None => log::info!("{label}: no route"),
    }
}
