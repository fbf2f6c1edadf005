use anyhow::{Context, bail};
use pipeflow_core::Coord2;
use std::str::FromStr;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Place { slot: usize, coords: Coord2 },
    Rotate { slot: usize },
    Tick,
    Countdown,
    Show,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  place <slot> <col> <row>   put a supply piece on the board
  rotate <slot>              turn a supply piece a quarter clockwise
  tick                       advance the water one step
  countdown                  count down towards releasing the water
  show                       draw the board
  json                       print the game as JSON
  help                       this text
  quit                       leave";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };
        let mut number = |what: &str| -> anyhow::Result<i64> {
            let word = words.next().with_context(|| format!("missing {what}"))?;
            word.parse()
                .with_context(|| format!("{what} must be a number, got {word:?}"))
        };

        let command = match name {
            "place" | "p" => Command::Place {
                slot: number("slot")?.try_into().context("slot must not be negative")?,
                coords: (
                    number("column")?.try_into().context("column out of range")?,
                    number("row")?.try_into().context("row out of range")?,
                ),
            },
            "rotate" | "r" => Command::Rotate {
                slot: number("slot")?.try_into().context("slot must not be negative")?,
            },
            "tick" | "t" => Command::Tick,
            "countdown" | "c" => Command::Countdown,
            "show" | "s" => Command::Show,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, try help"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected {extra:?} after {name}");
        }
        Ok(command)
    }
}
