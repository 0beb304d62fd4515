//! Parse console lines into commands
//!
//! The console accepts short verbs (`rods 40`, `repair pump`, `siphon 2000`)
//! alongside the session controls (`tick`, `run <n>`, `status`, `quit`).

use crate::command::Command;
use crate::core::error::{MeltdownError, Result};
use crate::core::types::Component;
use crate::llm::advisor::AdvisoryTopic;

/// One line of console input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleInput {
    Tick,
    Run(u64),
    Status,
    Help,
    Quit,
    Advise(AdvisoryTopic),
    Command(Command),
}

pub const HELP: &str = "\
Session:
  tick / t              advance one tick
  run <n>               advance n ticks
  status / s            show the full board
  advise <topic>        ask the advisor (ticker, meltdown, audit, profit, advice)
  quit / q              exit
Reactor:
  rods <0-100>          set control rod insertion
  valve <0-100>         set steam valve opening
  pump                  toggle the coolant pump
  repair <pump|turbine|condenser>
  refuel                reload fuel
  upgrade               upgrade the coolant pump
  autoscram             install the auto-SCRAM
Finance:
  spe                   create a Special Purpose Entity
  lobby                 buy a lobbying shield
  cook                  cook the books
  shred                 shred documents
  siphon <amount>       move cash offshore
  borrow <amount>       draw on the credit line";

pub fn parse_input(line: &str) -> Result<ConsoleInput> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(MeltdownError::UnknownCommand(String::new()));
    };
    let verb = verb.to_ascii_lowercase();
    let arg = words.next();

    let input = match verb.as_str() {
        "tick" | "t" => ConsoleInput::Tick,
        "run" => ConsoleInput::Run(parse_number(line, arg)?),
        "status" | "s" => ConsoleInput::Status,
        "help" | "h" | "?" => ConsoleInput::Help,
        "quit" | "q" | "exit" => ConsoleInput::Quit,
        "advise" | "advice" => ConsoleInput::Advise(
            arg.unwrap_or("advice")
                .parse::<AdvisoryTopic>()
                .map_err(|_| unknown(line))?,
        ),
        "rods" | "rod" => ConsoleInput::Command(Command::SetControlRod(parse_number(line, arg)?)),
        "valve" => ConsoleInput::Command(Command::SetSteamValve(parse_number(line, arg)?)),
        "pump" => ConsoleInput::Command(Command::TogglePump),
        "repair" => {
            let component = arg
                .ok_or_else(|| unknown(line))?
                .parse::<Component>()
                .map_err(|_| unknown(line))?;
            ConsoleInput::Command(Command::Repair(component))
        }
        "spe" => ConsoleInput::Command(Command::CreateSpe),
        "lobby" => ConsoleInput::Command(Command::Lobby),
        "cook" => ConsoleInput::Command(Command::CookBooks),
        "shred" => ConsoleInput::Command(Command::ShredDocuments),
        "siphon" => ConsoleInput::Command(Command::SiphonToOffshore(parse_number(line, arg)?)),
        "borrow" => ConsoleInput::Command(Command::Borrow(parse_number(line, arg)?)),
        "refuel" => ConsoleInput::Command(Command::Refuel),
        "upgrade" => ConsoleInput::Command(Command::UpgradePump),
        "autoscram" => ConsoleInput::Command(Command::InstallAutoScram),
        _ => return Err(unknown(line)),
    };
    Ok(input)
}

fn parse_number<T: std::str::FromStr>(line: &str, arg: Option<&str>) -> Result<T> {
    arg.and_then(|a| a.parse().ok()).ok_or_else(|| unknown(line))
}

fn unknown(line: &str) -> MeltdownError {
    MeltdownError::UnknownCommand(line.trim().to_string())
}
