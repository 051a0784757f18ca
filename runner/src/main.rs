// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for playing and simulating games
// ═══════════════════════════════════════════════════════════════════════

mod shell;

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use war_agents::{run_session, RandomCommander, SessionResult};
use war_engine::mission::Mission;
use war_engine::types::*;
use war_engine::{GameConfig, GameSession, SetupError};

#[derive(Parser)]
#[command(name = "war", about = "Turn-based territory conquest")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TiesArg {
    Defender,
    Attacker,
}

#[derive(Clone, Copy, ValueEnum)]
enum FailedAttackArg {
    NoCost,
    LoseTroop,
}

#[derive(clap::Args)]
struct MapArgs {
    /// JSON map file (defaults to the built-in five-territory map)
    #[arg(short, long)]
    map: Option<PathBuf>,
    /// Who wins when both dice match (overrides the map file)
    #[arg(long, value_enum)]
    ties: Option<TiesArg>,
    /// What a repelled attack costs the attacker (overrides the map file)
    #[arg(long, value_enum)]
    failed_attack: Option<FailedAttackArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        #[arg(short, long)]
        seed: Option<u64>,
        #[command(flatten)]
        map: MapArgs,
    },
    /// Run N headless games with a random commander
    Simulate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 100)]
        games: u32,
        #[arg(long, default_value_t = 10_000)]
        max_commands: usize,
        /// Chance (0 to 1) that the commander checks its mission instead of attacking
        #[arg(long, default_value_t = 0.0)]
        status_rate: f64,
        /// Print one JSON result per game instead of a summary
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        map: MapArgs,
    },
    /// Validate a map and print its starting table
    Show {
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        map: MapArgs,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Play { seed, map } => cmd_play(seed, &map),
        Commands::Simulate { seed, games, max_commands, status_rate, json, map } => {
            let batch = Batch { seed, games, max_commands, status_rate };
            cmd_simulate(&batch, json, &map)
        }
        Commands::Show { json, map } => cmd_show(json, &map),
    }
}

struct Batch {
    seed: u64,
    games: u32,
    max_commands: usize,
    status_rate: f64,
}

fn load_config(args: &MapArgs) -> Result<GameConfig, SetupError> {
    let mut config = match &args.map {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(ties) = args.ties {
        config.rules.ties = match ties {
            TiesArg::Defender => TieBreak::Defender,
            TiesArg::Attacker => TieBreak::Attacker,
        };
    }
    if let Some(cost) = args.failed_attack {
        config.rules.failed_attack = match cost {
            FailedAttackArg::NoCost => FailedAttack::NoCost,
            FailedAttackArg::LoseTroop => FailedAttack::AttackerLosesTroop,
        };
    }
    Ok(config)
}

fn cmd_play(seed: Option<u64>, args: &MapArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("playing with seed {}", seed);
    let mut session = GameSession::new(&config, seed)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    shell::run_interactive(&mut session, &mut input, &mut out)?;
    Ok(())
}

fn cmd_simulate(batch: &Batch, json: bool, args: &MapArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    // fail fast on a bad map before spawning games
    config.build_registry()?;
    let Batch { seed, games, max_commands, status_rate } = *batch;

    let results: Vec<(u64, Result<SessionResult, String>)> = (0..games)
        .into_par_iter()
        .map(|g| {
            let game_seed = seed.wrapping_add(u64::from(g) * 1000);
            let result = GameSession::new(&config, game_seed)
                .map_err(|e| e.to_string())
                .and_then(|mut session| {
                    let mut commander =
                        RandomCommander::new(game_seed).with_status_rate(status_rate);
                    run_session(&mut session, &mut commander, max_commands)
                });
            (game_seed, result)
        })
        .collect();

    if json {
        for (game_seed, result) in &results {
            match result {
                Ok(r) => println!("{}", serde_json::json!({ "seed": game_seed, "result": r })),
                Err(e) => println!("{}", serde_json::json!({ "seed": game_seed, "error": e })),
            }
        }
        return Ok(());
    }

    println!("=== Simulation: {} games, seed={} ===\n", games, seed);

    let mut won = 0u32;
    let mut aborted = 0u32;
    let mut errors = 0u32;
    let mut battles = 0u64;
    let mut eliminate = (0u32, 0u32);
    let mut conquer = (0u32, 0u32);

    for (game_seed, result) in &results {
        match result {
            Ok(r) => {
                battles += r.battles as u64;
                let is_win = r.final_state == SessionState::Won;
                let tally = match r.mission {
                    Mission::EliminateFaction { .. } => &mut eliminate,
                    Mission::ConquerCount { .. } => &mut conquer,
                };
                tally.0 += 1;
                if is_win {
                    won += 1;
                    tally.1 += 1;
                } else {
                    aborted += 1;
                }
            }
            Err(e) => {
                errors += 1;
                eprintln!("Game seed {}: ERROR -- {}", game_seed, e);
            }
        }
    }

    let finished = won + aborted;
    let pct = |n: u32, d: u32| if d > 0 { n as f64 / d as f64 * 100.0 } else { 0.0 };
    println!("  Won:     {:>5} ({:.1}%)", won, pct(won, finished));
    println!("  Stuck:   {:>5} ({:.1}%)", aborted, pct(aborted, finished));
    println!("  Errors:  {:>5}", errors);
    println!();
    println!("  Eliminate missions: {:>4} won of {:<4}", eliminate.1, eliminate.0);
    println!("  Conquer missions:   {:>4} won of {:<4}", conquer.1, conquer.0);
    if finished > 0 {
        println!("\n  Average battles per game: {:.1}", battles as f64 / finished as f64);
    }
    Ok(())
}

fn cmd_show(json: bool, args: &MapArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let registry = config.build_registry()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }

    println!("Player army: {}", config.player());
    println!(
        "Rules: ties to {:?}, failed attack {:?}",
        config.rules.ties, config.rules.failed_attack
    );
    println!("Armies:");
    for faction in registry.factions() {
        println!(
            "  {:<15} {} territories, {} troops",
            faction.as_str(), registry.count_owned_by(&faction), registry.total_troops_of(&faction)
        );
    }
    shell::print_map(&mut std::io::stdout(), registry.territories())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("war").chain(args.iter().copied())).unwrap()
    }

    fn write_map(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("war-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_missing_map_is_io_error() {
        let cli = parse(&["show", "--map", "/nonexistent/war/map.json"]);
        let Commands::Show { map, .. } = &cli.command else {
            panic!("expected show");
        };
        assert!(matches!(load_config(map), Err(SetupError::Io(_))));
        assert!(run(cli).is_err());
    }

    #[test]
    fn test_invalid_map_fails_before_play_starts() {
        let path = write_map(
            "zero-target",
            r#"{
                "conquer_target": 0,
                "territories": [
                    { "name": "America", "owner": "Blue", "troops": 3 },
                    { "name": "Europa", "owner": "Green", "troops": 2 }
                ]
            }"#,
        );
        let map = path.to_string_lossy().into_owned();

        // play never reaches stdin: the session is refused during setup
        let err = run(parse(&["play", "--seed", "1", "--map", &map])).unwrap_err();
        assert!(err.to_string().contains("unreachable"));
        assert!(run(parse(&["show", "--map", &map])).is_err());
        assert!(run(parse(&["simulate", "--games", "2", "--map", &map])).is_err());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_flags_override_map_rules() {
        let cli = parse(&["show", "--ties", "attacker", "--failed-attack", "lose-troop"]);
        let Commands::Show { map, .. } = &cli.command else {
            panic!("expected show");
        };
        let config = load_config(map).unwrap();
        assert_eq!(config.rules.ties, TieBreak::Attacker);
        assert_eq!(config.rules.failed_attack, FailedAttack::AttackerLosesTroop);
    }

    #[test]
    fn test_simulate_default_map() {
        let cli = parse(&["simulate", "--games", "3", "--status-rate", "0.3", "--json"]);
        assert!(run(cli).is_ok());
    }
}
