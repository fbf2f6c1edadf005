use anyhow::Context;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use command::{Command, HELP};
use pipeflow_core::{
    Coord, Coord2, CountdownTick, Difficulty, GameConfig, GameSession, PieceWeights, Snapshot,
};
use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pipeflow", version, about = "Lay pipes before the water runs out of them")]
struct Cli {
    #[arg(long, default_value_t = 12)]
    width: Coord,
    #[arg(long, default_value_t = 8)]
    height: Coord,
    /// Start cell as `col,row` [default: 0,1]
    #[arg(long, value_parser = parse_coords)]
    start: Option<Coord2>,
    /// End cell as `col,row` [default: width-2,height-2]
    #[arg(long, value_parser = parse_coords)]
    end: Option<Coord2>,
    /// Number of pieces offered at once
    #[arg(long, default_value_t = GameConfig::DEFAULT_SUPPLY_CAPACITY)]
    supply: usize,
    #[arg(long, default_value_t = 55)]
    curved: u32,
    #[arg(long, default_value_t = 30)]
    straight: u32,
    #[arg(long, default_value_t = 15)]
    four_way: u32,
    /// Seed for the piece supply, picked from the clock when absent
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = DifficultyArg::Medium)]
    difficulty: DifficultyArg,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::with_size((self.width, self.height));
        if let Some(start) = self.start {
            config.start = start;
        }
        if let Some(end) = self.end {
            config.end = end;
        }
        config.supply_capacity = self.supply;
        config.weights = PieceWeights::new(self.curved, self.straight, self.four_way);
        config
            .with_seed(self.seed.unwrap_or_else(clock_seed))
            .with_difficulty(self.difficulty.into())
    }
}

fn parse_coords(arg: &str) -> Result<Coord2, String> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected col,row, got {arg:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<Coord>()
            .map_err(|err| format!("{part:?}: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = cli.config();
    log::info!("Starting with seed {}", config.seed);
    let mut session = GameSession::new(config).context("cannot start game")?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "Water flows in {} countdown ticks, then every {} ms. Type help for commands.",
        session.countdown_remaining(),
        session.config().difficulty.flow_interval_ms()
    )?;
    write!(stdout, "{}", render::board(&Snapshot::from_session(&session)))?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err:#}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Command::Json => {
                let snapshot = Snapshot::from_session(&session);
                writeln!(stdout, "{}", serde_json::to_string_pretty(&snapshot)?)?;
                continue;
            }
            Command::Show => {}
            Command::Place { slot, coords } => {
                if let Err(err) = session.place_piece(slot, coords) {
                    writeln!(stdout, "{err}")?;
                    continue;
                }
            }
            Command::Rotate { slot } => {
                if let Err(err) = session.rotate_supply_piece(slot) {
                    writeln!(stdout, "{err}")?;
                    continue;
                }
            }
            Command::Tick => {
                let report = session.tick();
                log::debug!(
                    "Tick wetted {:?}, flow is {:?}",
                    report.wetted,
                    session.flow_state()
                );
            }
            Command::Countdown => match session.countdown_tick() {
                Ok(CountdownTick::Running(remaining)) => writeln!(stdout, "{remaining}...")?,
                Ok(CountdownTick::Expired) => writeln!(stdout, "The water is running, tick away.")?,
                Err(err) => writeln!(stdout, "{err}")?,
            },
        }

        let snapshot = Snapshot::from_session(&session);
        write!(stdout, "{}", render::board(&snapshot))?;
        if let Some(message) = render::outcome(&snapshot) {
            writeln!(stdout, "{message}")?;
        }
        stdout.flush()?;
    }

    Ok(())
}
