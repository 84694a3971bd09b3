use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minimax_connect_four::ai::{Agent, MinimaxAgent, RandomAgent, SessionStats};
use minimax_connect_four::arena::{play_game, MatchTally};
use minimax_connect_four::config::{validate_depth, AppConfig};
use minimax_connect_four::game::Player;

/// Run headless Connect Four matches between agents.
#[derive(Parser)]
#[command(name = "arena", about = "Pit Connect Four agents against each other")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// First agent: "minimax", "minimax:<depth>" or "random"
    #[arg(long, default_value = "minimax")]
    red: AgentSpec,

    /// Second agent: "minimax", "minimax:<depth>" or "random"
    #[arg(long, default_value = "random")]
    yellow: AgentSpec,

    /// Alternate colors every game
    #[arg(long)]
    swap: bool,

    /// Seed for random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Print one JSON object per game instead of a summary
    #[arg(long)]
    json: bool,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

/// Agent named on the command line. A bare `minimax` uses the configured depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgentSpec {
    Minimax(Option<usize>),
    Random,
}

impl FromStr for AgentSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None if s == "random" => Ok(AgentSpec::Random),
            None if s == "minimax" => Ok(AgentSpec::Minimax(None)),
            Some(("minimax", depth)) => depth
                .parse()
                .map(|d| AgentSpec::Minimax(Some(d)))
                .map_err(|e| format!("bad depth '{depth}': {e}")),
            _ => Err(format!(
                "unknown agent '{s}' (expected 'random', 'minimax' or 'minimax:<depth>')"
            )),
        }
    }
}

impl fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentSpec::Minimax(Some(depth)) => write!(f, "minimax:{depth}"),
            AgentSpec::Minimax(None) => f.write_str("minimax"),
            AgentSpec::Random => f.write_str("random"),
        }
    }
}

impl AgentSpec {
    fn build(self, default_depth: usize, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            AgentSpec::Minimax(depth) => Box::new(MinimaxAgent::new(depth.unwrap_or(default_depth))),
            AgentSpec::Random => match seed {
                Some(seed) => Box::new(RandomAgent::seeded(seed)),
                None => Box::new(RandomAgent::new()),
            },
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    for (flag, spec) in [("--red", cli.red), ("--yellow", cli.yellow)] {
        if let AgentSpec::Minimax(Some(depth)) = spec {
            validate_depth(flag, depth)?;
        }
    }

    let depth = config.search.depth;
    let specs = [cli.red, cli.yellow];
    let mut agents = [
        specs[0].build(depth, cli.seed),
        specs[1].build(depth, cli.seed.map(|s| s.wrapping_add(1))),
    ];

    let mut by_color = MatchTally::new();
    let mut wins = [0usize; 2];
    let mut search = [SessionStats::new(), SessionStats::new()];

    for game in 0..cli.games {
        // Index into `agents` of whoever plays Red this game
        let red = if cli.swap { game % 2 } else { 0 };
        let yellow = 1 - red;

        let [first, second] = &mut agents;
        let (red_agent, yellow_agent) = if red == 0 {
            (first.as_mut(), second.as_mut())
        } else {
            (second.as_mut(), first.as_mut())
        };
        let record = play_game(red_agent, yellow_agent)
            .with_context(|| format!("game {} aborted", game + 1))?;

        by_color.record_game(&record);
        match record.winner() {
            Some(Player::Red) => wins[red] += 1,
            Some(Player::Yellow) => wins[yellow] += 1,
            None => {}
        }
        search[red].merge(record.stats_for(Player::Red));
        search[yellow].merge(record.stats_for(Player::Yellow));

        if cli.json {
            let line = serde_json::json!({
                "game": game + 1,
                "red": specs[red].to_string(),
                "yellow": specs[yellow].to_string(),
                "record": record,
            });
            println!("{}", serde_json::to_string(&line)?);
        }
    }

    info!(
        games = by_color.games(),
        red_wins = by_color.red_wins,
        yellow_wins = by_color.yellow_wins,
        draws = by_color.draws,
        "match finished"
    );

    if !cli.json {
        print_summary(&specs, &wins, &search, &by_color);
    }
    Ok(())
}

fn print_summary(
    specs: &[AgentSpec; 2],
    wins: &[usize; 2],
    search: &[SessionStats; 2],
    by_color: &MatchTally,
) {
    let games = by_color.games();
    println!("{} games", games);
    for i in 0..2 {
        println!(
            "  {:<12} {:>4} wins ({:.1}%)",
            specs[i].to_string(),
            wins[i],
            100.0 * wins[i] as f32 / games as f32
        );
        if search[i].moves > 0 {
            println!(
                "  {:<12} {} nodes over {} moves, avg {} nodes/move, {:.3}s thinking",
                "",
                search[i].total_nodes,
                search[i].moves,
                search[i].average_nodes(),
                search[i].total_seconds
            );
        }
    }
    println!(
        "  draws        {:>4}      ({:.1}%)",
        by_color.draws,
        100.0 * by_color.draw_rate()
    );
    println!(
        "  by color: Red {:.1}%, Yellow {:.1}%",
        100.0 * by_color.win_rate(Player::Red),
        100.0 * by_color.win_rate(Player::Yellow)
    );
}
