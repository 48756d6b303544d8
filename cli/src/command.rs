use anyhow::{Error, anyhow};
use std::str::FromStr;
use twenty48_core::Direction;

/// One line of user input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Start,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Command::*;
        use Direction::*;

        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Move(Up),
            "down" | "s" | "j" => Move(Down),
            "left" | "a" | "h" => Move(Left),
            "right" | "d" | "l" => Move(Right),
            "new" | "n" | "start" => Start,
            "quit" | "q" | "exit" => Quit,
            other => return Err(anyhow!("Unknown command `{other}`")),
        })
    }
}
