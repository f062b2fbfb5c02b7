//! Headless Battle Runner
//!
//! Builds both armies from a unit catalog with the preset generator, runs
//! the battle with the frontline attack decision, and prints the result.

use clap::Parser;
use heroes_tactics::battle::{
    Army, BattleEventLog, BattleLog, BattleSimulator, CancelToken, FrontlineAttack, PathFinder,
    PresetGenerator, TracingBattleLog, Unit, UnitCatalog,
};
use heroes_tactics::core::{set_config, Result, TacticsConfig};
use serde::Serialize;

/// Headless Battle Runner - preset vs preset battles
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Generate two armies from a unit catalog and simulate the battle")]
struct Args {
    /// Unit template catalog (TOML)
    #[arg(long, default_value = "data/units.toml")]
    catalog: String,

    /// Optional tactics config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<String>,

    /// Point budget for the computer army
    #[arg(long, default_value_t = 1500)]
    computer_budget: i64,

    /// Point budget for the player army
    #[arg(long, default_value_t = 1500)]
    player_budget: i64,

    /// Maximum rounds before the battle is called (overrides config)
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every action through tracing
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleResult {
    outcome: String,
    rounds: u32,
    actions: u32,
    kills: usize,
    player_units: usize,
    player_survivors: usize,
    player_points: u64,
    computer_units: usize,
    computer_survivors: usize,
    computer_points: u64,
    seed: u64,
}

/// Forwards each report to every inner sink
struct FanOut<'a>(Vec<&'a mut dyn BattleLog>);

impl BattleLog for FanOut<'_> {
    fn report(&mut self, actor: &Unit, target: Option<&Unit>) {
        for sink in self.0.iter_mut() {
            sink.report(actor, target);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose {
            "heroes_tactics=debug"
        } else {
            "heroes_tactics=warn"
        })
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => TacticsConfig::load(path)?,
        None => TacticsConfig::default(),
    };
    if let Some(max_rounds) = args.max_rounds {
        config.max_rounds = Some(max_rounds);
    }
    if config.max_rounds.is_none() {
        // Holds can repeat forever when every melee target is walled in
        config.max_rounds = Some(1000);
    }
    if set_config(config.clone()).is_err() {
        tracing::warn!("Global tactics config already set; using local copy");
    }

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let catalog = UnitCatalog::load(&args.catalog)?;

    let generator = PresetGenerator::from_config(&config);
    let mut computer = generator.generate(catalog.templates(), args.computer_budget);
    let mut player: Army = generator
        .generate(catalog.templates(), args.player_budget)
        .mirrored(config.field_width);

    tracing::info!(
        "Computer army: {} units ({} points), player army: {} units ({} points)",
        computer.units.len(),
        computer.points,
        player.units.len(),
        player.points
    );

    let mut decision = FrontlineAttack::with_seed(PathFinder::from_config(&config), seed);
    let mut events = BattleEventLog::new();
    let mut tracing_log = TracingBattleLog;
    let mut log = if args.verbose {
        FanOut(vec![
            &mut events as &mut dyn BattleLog,
            &mut tracing_log as &mut dyn BattleLog,
        ])
    } else {
        FanOut(vec![&mut events as &mut dyn BattleLog])
    };

    let summary = BattleSimulator::from_config(&config).simulate(
        &mut player,
        &mut computer,
        &mut decision,
        Some(&mut log),
        &CancelToken::new(),
    )?;
    drop(log);

    let result = BattleResult {
        outcome: format!("{:?}", summary.outcome),
        rounds: summary.rounds,
        actions: summary.actions,
        kills: events.kills(),
        player_units: player.units.len(),
        player_survivors: player.alive_count(),
        player_points: player.points,
        computer_units: computer.units.len(),
        computer_survivors: computer.alive_count(),
        computer_points: computer.points,
        seed,
    };

    match args.format.as_str() {
        "text" => {
            println!("Battle Result");
            println!("=============");
            println!("Outcome: {}", result.outcome);
            println!("Rounds: {} ({} actions, {} kills)", result.rounds, result.actions, result.kills);
            println!(
                "Player: {}/{} survivors ({} points)",
                result.player_survivors, result.player_units, result.player_points
            );
            println!(
                "Computer: {}/{} survivors ({} points)",
                result.computer_survivors, result.computer_units, result.computer_points
            );
            println!("Seed: {}", result.seed);
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            eprintln!("Unknown format '{}', defaulting to json", args.format);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
