//! Card Clash - Main Binary
//!
//! Console front-end for the two-player card battle engine

use anyhow::Context;
use cardclash::{
    game::{
        GameLoop, GameState, InteractiveController, PlayerController, RandomController,
        RewardSchedule, ScriptedController, VerbosityLevel,
    },
    loader::CatalogLoader,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Controller type for each seat
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ControllerType {
    /// Interactive console player via stdin
    Human,
    /// Makes random choices
    Random,
    /// Fixed script of predetermined choices (requires --pN-script)
    Scripted,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "cardclash")]
#[command(about = "Card Clash - two-player card battle engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match
    Play {
        /// Card catalog file (archetype,name,attack,defense,health per line)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Player 1 controller type
        #[arg(long, value_enum, default_value = "human")]
        p1: ControllerType,

        /// Player 2 controller type
        #[arg(long, value_enum, default_value = "random")]
        p2: ControllerType,

        /// Player 1 name
        #[arg(long, default_value = "Player 1")]
        p1_name: String,

        /// Player 2 name
        #[arg(long, default_value = "Player 2")]
        p2_name: String,

        /// Scripted choices for player 1 (space or comma separated, e.g. "1 1 2" or "1,1,2")
        #[arg(long, value_name = "CHOICES")]
        p1_script: Option<String>,

        /// Scripted choices for player 2 (space or comma separated, e.g. "1 1 2" or "1,1,2")
        #[arg(long, value_name = "CHOICES")]
        p2_script: Option<String>,

        /// Random seed for deterministic matches
        #[arg(long)]
        seed: Option<u64>,

        /// Starting cards dealt to each player
        #[arg(long, default_value_t = 2)]
        starting_cards: usize,

        /// Wall-clock budget per turn, in seconds
        #[arg(long, default_value_t = 60)]
        turn_budget_secs: u64,

        /// Stop the match after this many rounds
        #[arg(long)]
        max_rounds: Option<u32>,

        /// Coins awarded to the round winner
        #[arg(long, default_value_t = 10)]
        reward_winner: i64,

        /// Consolation coins awarded to the round loser
        #[arg(long, default_value_t = 3)]
        reward_loser: i64,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Run seeded random-vs-random matches (for balance checks and profiling)
    Sim {
        /// Card catalog file
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Number of matches to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        /// Base random seed (match i uses seed + i)
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Round cap per match
        #[arg(long, default_value_t = 200)]
        max_rounds: u32,

        /// Write per-match results as JSON to this file
        #[arg(long, value_name = "FILE")]
        json_out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            catalog,
            p1,
            p2,
            p1_name,
            p2_name,
            p1_script,
            p2_script,
            seed,
            starting_cards,
            turn_budget_secs,
            max_rounds,
            reward_winner,
            reward_loser,
            verbosity,
        } => run_play(PlayConfig {
            catalog,
            p1,
            p2,
            p1_name,
            p2_name,
            p1_script,
            p2_script,
            seed,
            starting_cards,
            turn_budget_secs,
            max_rounds,
            rewards: RewardSchedule::new(reward_winner, reward_loser),
            verbosity: verbosity.into(),
        }),
        Commands::Sim {
            catalog,
            games,
            seed,
            max_rounds,
            json_out,
        } => run_sim(catalog, games, seed, max_rounds, json_out),
    }
}

struct PlayConfig {
    catalog: PathBuf,
    p1: ControllerType,
    p2: ControllerType,
    p1_name: String,
    p2_name: String,
    p1_script: Option<String>,
    p2_script: Option<String>,
    seed: Option<u64>,
    starting_cards: usize,
    turn_budget_secs: u64,
    max_rounds: Option<u32>,
    rewards: RewardSchedule,
    verbosity: VerbosityLevel,
}

/// Parse a script string like "1 1 2" or "1,1,2" into choice indices
fn parse_script(script: &str) -> anyhow::Result<Vec<usize>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("invalid script entry '{s}'"))
        })
        .collect()
}

fn build_controller(
    kind: ControllerType,
    player_id: cardclash::core::PlayerId,
    script: Option<&str>,
    seed: Option<u64>,
) -> anyhow::Result<Box<dyn PlayerController>> {
    Ok(match kind {
        ControllerType::Human => Box::new(InteractiveController::new(player_id)),
        ControllerType::Random => match seed {
            Some(seed) => Box::new(RandomController::with_seed(player_id, seed)),
            None => Box::new(RandomController::new(player_id)),
        },
        ControllerType::Scripted => {
            let script =
                script.context("scripted controller requires --p1-script / --p2-script")?;
            Box::new(ScriptedController::new(player_id, parse_script(script)?))
        }
    })
}

fn run_play(config: PlayConfig) -> anyhow::Result<()> {
    let catalog = CatalogLoader::load_from_file(&config.catalog)
        .with_context(|| format!("failed to load catalog {}", config.catalog.display()))?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut game =
        GameState::new_two_player(&config.p1_name, &config.p2_name, catalog, seed)
            .with_reward_schedule(config.rewards);
    game.deal_starting_cards(config.starting_cards)?;

    let p1_id = game.players[0].id;
    let p2_id = game.players[1].id;
    // Seats get distinct derived seeds so random-vs-random isn't mirrored
    let mut controller1 =
        build_controller(config.p1, p1_id, config.p1_script.as_deref(), Some(seed))?;
    let mut controller2 = build_controller(
        config.p2,
        p2_id,
        config.p2_script.as_deref(),
        Some(seed.wrapping_add(1)),
    )?;

    let mut game_loop = GameLoop::new(&mut game)
        .with_turn_budget(Duration::from_secs(config.turn_budget_secs))
        .with_verbosity(config.verbosity);
    if let Some(max_rounds) = config.max_rounds {
        game_loop = game_loop.with_max_rounds(max_rounds);
    }

    let result = game_loop.run_match(controller1.as_mut(), controller2.as_mut())?;

    println!("\nMatch finished after {} round(s) (seed {seed})", result.rounds);
    match result.winner {
        Some(id) => println!("Winner: {}", game.get_player(id)?.name),
        None => println!("No winner."),
    }
    Ok(())
}

fn run_sim(
    catalog_path: PathBuf,
    games: usize,
    base_seed: u64,
    max_rounds: u32,
    json_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let catalog = CatalogLoader::load_from_file(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    let mut results = Vec::with_capacity(games);
    let mut p1_wins = 0usize;
    let mut p2_wins = 0usize;

    for i in 0..games {
        let seed = base_seed.wrapping_add(i as u64);
        let mut game = GameState::new_two_player("P1", "P2", catalog.clone(), seed);
        game.deal_starting_cards(2)?;

        let p1_id = game.players[0].id;
        let p2_id = game.players[1].id;
        let mut controller1 = RandomController::with_seed(p1_id, seed);
        let mut controller2 = RandomController::with_seed(p2_id, seed.wrapping_add(1));

        let result = GameLoop::new(&mut game)
            .with_max_rounds(max_rounds)
            .with_verbosity(VerbosityLevel::Silent)
            .run_match(&mut controller1, &mut controller2)?;

        match result.winner {
            Some(id) if id == p1_id => p1_wins += 1,
            Some(_) => p2_wins += 1,
            None => {}
        }
        results.push(result);
    }

    println!(
        "{games} matches: P1 won {p1_wins}, P2 won {p2_wins}, {} undecided",
        games - p1_wins - p2_wins
    );

    if let Some(path) = json_out {
        let json = serde_json::to_string_pretty(&results)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Results written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_formats() {
        assert_eq!(parse_script("1 1 2").unwrap(), vec![1, 1, 2]);
        assert_eq!(parse_script("1,1,2").unwrap(), vec![1, 1, 2]);
        assert_eq!(parse_script(" 3,  4 ").unwrap(), vec![3, 4]);
        assert!(parse_script("1 x 2").is_err());
    }

    #[test]
    fn test_verbosity_arg_parsing() {
        let arg: VerbosityArg = "verbose".parse().unwrap();
        assert_eq!(VerbosityLevel::from(arg), VerbosityLevel::Verbose);
        let arg: VerbosityArg = "1".parse().unwrap();
        assert_eq!(VerbosityLevel::from(arg), VerbosityLevel::Minimal);
        assert!("loud".parse::<VerbosityArg>().is_err());
    }
}
