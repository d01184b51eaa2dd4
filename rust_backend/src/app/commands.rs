//! Typed commands of the terminal session.

use crate::api::DisplayMode;
use crate::controller::InputField;
use crate::error::{ExplorerError, ExplorerResult};

pub const HELP: &str = "\
Pages:
  page search|planner|summary   switch the page being drawn
Flight search:
  airports                      list departure airports
  from <airport>                choose the departure airport
  to <airport>                  choose the arrival airport
  flight <code>                 price analysis of a flight
Planner:
  mode <0-4>                    0 availability, 1 days booked, 2 frequency,
                                3 by airline, 4 correlation
  inputs                        show the inputs of the current mode
  set <field> <value>           fields: source, destination, flight,
                                attribute, second_attribute, class, style
  graph                         draw the current mode
Data summary:
  summary [page]                show the summary text and chart
  next | prev                   move between summary pages
Other:
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Page(DisplayMode),
    Airports,
    From(String),
    To(String),
    Flight(String),
    Mode(usize),
    Inputs,
    Set(InputField, String),
    Graph,
    Summary(Option<usize>),
    Next,
    Previous,
}

impl Command {
    /// Parse one input line; blank lines yield `None`.
    pub fn parse(line: &str) -> ExplorerResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "page" => Command::Page(parse_page(rest)?),
            "airports" => Command::Airports,
            "from" => Command::From(required(word, rest)?),
            "to" => Command::To(required(word, rest)?),
            "flight" => Command::Flight(required(word, rest)?),
            "mode" => Command::Mode(parse_index("mode", rest)?),
            "inputs" => Command::Inputs,
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| ExplorerError::invalid_selection("set", rest))?;
                Command::Set(field.parse()?, value.trim().to_string())
            }
            "graph" => Command::Graph,
            "summary" if rest.is_empty() => Command::Summary(None),
            "summary" => Command::Summary(Some(parse_index("page", rest)?)),
            "next" => Command::Next,
            "prev" | "previous" => Command::Previous,
            _ => return Err(ExplorerError::invalid_selection("command", word)),
        };
        Ok(Some(command))
    }
}

fn required(command: &str, value: &str) -> ExplorerResult<String> {
    if value.is_empty() {
        return Err(ExplorerError::invalid_selection(command, value));
    }
    Ok(value.to_string())
}

fn parse_index(field: &str, value: &str) -> ExplorerResult<usize> {
    value
        .parse()
        .map_err(|_| ExplorerError::invalid_selection(field, value))
}

fn parse_page(value: &str) -> ExplorerResult<DisplayMode> {
    match value.to_lowercase().as_str() {
        "search" | "1" => Ok(DisplayMode::FlightSearch),
        "planner" | "2" => Ok(DisplayMode::Planner),
        "summary" | "3" => Ok(DisplayMode::Summary),
        _ => Err(ExplorerError::invalid_selection("page", value)),
    }
}
