//! The line-oriented terminal session.

use log::{debug, info};
use std::io::{BufRead, Write};

use super::commands::{Command, HELP};
use super::display::format_candidates;
use crate::algorithms::{summary_text, SUMMARY_PAGE_COUNT};
use crate::api::DisplayMode;
use crate::config::ExplorerSettings;
use crate::controller::{ModeDispatcher, SearchController};
use crate::error::{ExplorerError, ExplorerResult};
use crate::services::FlightExplorer;

/// What a handled command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Text(String),
    Quit,
    Nothing,
}

/// Explorer plus the controllers of each page.
pub struct Session {
    explorer: FlightExplorer,
    search: SearchController,
    planner: ModeDispatcher,
}

impl Session {
    pub fn new(explorer: FlightExplorer) -> Self {
        Self {
            explorer,
            search: SearchController::new(),
            planner: ModeDispatcher::new(),
        }
    }

    pub fn explorer(&self) -> &FlightExplorer {
        &self.explorer
    }

    pub fn explorer_mut(&mut self) -> &mut FlightExplorer {
        &mut self.explorer
    }

    /// Select the default pair on the search page.
    ///
    /// Returns the flight codes of that pair, or `None` for an empty dataset.
    pub fn start(&mut self, settings: &ExplorerSettings) -> ExplorerResult<Option<String>> {
        let Some(pair) = settings.resolve_pair(self.explorer.engine()) else {
            return Ok(None);
        };
        info!("Opening with {}", pair);
        self.search.select_source(&mut self.explorer, &pair.source)?;
        let codes = self
            .search
            .select_destination(&mut self.explorer, &pair.destination)?;
        Ok(Some(format_candidates("flight", &codes)))
    }

    /// Handle one command. Recoverable errors are returned to the caller.
    pub fn handle(&mut self, command: Command) -> ExplorerResult<Outcome> {
        debug!("Handling {:?}", command);
        let text = match command {
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Page(mode) => return self.show_page(mode),
            Command::Airports => format_candidates("from", &self.explorer.airport_names()),
            Command::From(source) => {
                let destinations = self.search.select_source(&mut self.explorer, &source)?;
                format_candidates("to", &destinations)
            }
            Command::To(destination) => {
                let codes = self
                    .search
                    .select_destination(&mut self.explorer, &destination)?;
                format_candidates("flight", &codes)
            }
            Command::Flight(code) => self.search.select_flight(&mut self.explorer, &code)?,
            Command::Mode(index) => {
                let mode = self.planner.select_mode(&self.explorer, index)?;
                format!("{}\n{}", mode, self.describe_inputs())
            }
            Command::Inputs => self.describe_inputs(),
            Command::Set(field, value) => {
                let refreshed = self.planner.set_input(&self.explorer, field, &value)?;
                refreshed
                    .iter()
                    .map(|config| format_candidates(config.field.name(), &config.candidates))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Graph => self.planner.generate_graph(&mut self.explorer)?,
            Command::Summary(page) => {
                if let Some(page) = page {
                    if page >= SUMMARY_PAGE_COUNT {
                        return Err(ExplorerError::invalid_selection("page", page.to_string()));
                    }
                    self.explorer.show_summary_graph(Some(page))?;
                    summary_text(self.explorer.engine().dataset(), page)
                } else {
                    self.explorer.show_summary_graph(None)?;
                    self.explorer.summary_text()
                }
            }
            Command::Next => {
                self.explorer.next_page();
                self.explorer.show_summary_graph(None)?;
                self.explorer.summary_text()
            }
            Command::Previous => {
                self.explorer.previous_page();
                self.explorer.show_summary_graph(None)?;
                self.explorer.summary_text()
            }
        };

        Ok(if text.is_empty() {
            Outcome::Nothing
        } else {
            Outcome::Text(text)
        })
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Recoverable errors are printed and the loop continues; anything else
    /// ends the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> ExplorerResult<()> {
        for line in input.lines() {
            let line = line?;
            let outcome = Command::parse(&line).and_then(|command| match command {
                Some(command) => self.handle(command),
                None => Ok(Outcome::Nothing),
            });

            match outcome {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Text(text)) => writeln!(output, "{}", text.trim_end())?,
                Ok(Outcome::Nothing) => {}
                Err(e) if e.is_recoverable() => writeln!(output, "Error: {}", e)?,
                Err(e) => return Err(e),
            }
        }
        output.flush()?;
        Ok(())
    }

    fn show_page(&mut self, mode: DisplayMode) -> ExplorerResult<Outcome> {
        match mode {
            DisplayMode::Summary => self.handle(Command::Summary(None)),
            DisplayMode::FlightSearch => {
                self.explorer.price_graph()?;
                Ok(Outcome::Nothing)
            }
            DisplayMode::Planner => {
                self.explorer.set_display_mode(mode);
                self.explorer.notify_all()?;
                Ok(Outcome::Text(self.describe_inputs()))
            }
        }
    }

    fn describe_inputs(&self) -> String {
        self.planner
            .configure_inputs(&self.explorer)
            .iter()
            .filter(|config| config.enabled)
            .map(|config| {
                let label = match self.planner.value(config.field) {
                    Some(value) => format!("{} [{}]", config.field, value),
                    None => config.field.to_string(),
                };
                format_candidates(&label, &config.candidates)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
