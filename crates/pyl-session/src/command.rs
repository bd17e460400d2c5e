//! Parsing of short text commands.

use std::str::FromStr;

use pyl_core::DieId;

use crate::error::SessionError;

/// A parsed player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `r` / `roll`
    Roll,
    /// `b` / `bank`
    Bank,
    /// `reset`
    Reset,
    /// `die`
    BuyDie,
    /// `side`
    AddSide,
    /// `face`
    AddWinningFace,
    /// `roller`
    BuyAutoRoller,
    /// `toggle roller`
    ToggleAutoRoller,
    /// `banker`
    BuyAutoBanker,
    /// `toggle banker`
    ToggleAutoBanker,
    /// `target <n>`, clamped into range when applied
    Target(i64),
    /// `select <id>`
    Select(DieId),
    /// `destroy <id>`
    Destroy(DieId),
    /// `wait <ms>`, at most [`MAX_WAIT_MS`]
    Wait(u64),
    /// `status`
    Status,
    /// `help`
    Help,
}

/// Longest time a single `wait` lets pass: one hour.
pub const MAX_WAIT_MS: u64 = 3_600_000;

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  r, roll          Roll all dice
  b, bank          Bank the pot
  reset            Start a new game
  die              Buy another die
  side             Add a side to the selected die
  face             Add a winning face to the selected die
  roller           Buy or upgrade the Auto Roller
  toggle roller    Start or stop the Auto Roller
  banker           Buy the Auto Banker
  toggle banker    Enable or disable the Auto Banker
  target <n>       Set the Auto Banker target
  select <id>      Select a die for upgrades
  destroy <id>     Destroy a die (repeat to confirm)
  wait <ms>        Let time pass for the automation (up to an hour)
  status           Show the game state
  help             Show this help";

fn number<T: FromStr>(name: &str, arg: &str) -> Result<T, SessionError> {
    if arg.is_empty() {
        return Err(SessionError::InvalidArgument(format!("{name} needs a number")));
    }
    let digits = arg.trim_start_matches('#');
    digits
        .parse()
        .map_err(|_| SessionError::InvalidArgument(format!("not a number: {arg}")))
}

/// An integer that saturates instead of failing when out of `i64` range.
fn saturating_integer(name: &str, arg: &str) -> Result<i64, SessionError> {
    if let Ok(n) = number::<i64>(name, arg) {
        return Ok(n);
    }
    let (negative, digits) = match arg.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, arg),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return number(name, arg);
    }
    Ok(if negative { i64::MIN } else { i64::MAX })
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let rest = parts.next().map(str::trim).unwrap_or("");

        let command = match (cmd.as_str(), rest.to_lowercase().as_str()) {
            ("r" | "roll", "") => Command::Roll,
            ("b" | "bank", "") => Command::Bank,
            ("reset", "") => Command::Reset,
            ("die", "") => Command::BuyDie,
            ("side", "") => Command::AddSide,
            ("face", "") => Command::AddWinningFace,
            ("roller", "") => Command::BuyAutoRoller,
            ("banker", "") => Command::BuyAutoBanker,
            ("toggle", "roller") => Command::ToggleAutoRoller,
            ("toggle", "banker") => Command::ToggleAutoBanker,
            ("target", _) => Command::Target(saturating_integer("target", rest)?),
            ("select", _) => Command::Select(DieId(number("select", rest)?)),
            ("destroy", _) => Command::Destroy(DieId(number("destroy", rest)?)),
            ("wait", _) => {
                let ms = match number::<u64>("wait", rest) {
                    Err(_) if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) => {
                        MAX_WAIT_MS
                    }
                    parsed => parsed?,
                };
                Command::Wait(ms.min(MAX_WAIT_MS))
            }
            ("status", "") => Command::Status,
            ("help" | "?", _) => Command::Help,
            _ => return Err(SessionError::UnknownCommand(trimmed.to_string())),
        };
        Ok(command)
    }
}
