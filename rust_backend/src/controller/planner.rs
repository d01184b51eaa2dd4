//! Mode dispatch for the planner page.

use indexmap::IndexMap;
use log::{debug, warn};

use super::modes::{InputConfig, InputField, PlannerMode};
use crate::algorithms::analysis::numeric_attribute;
use crate::api::ChartStyle;
use crate::core::domain::{Attribute, TicketClass};
use crate::error::{ExplorerError, ExplorerResult};
use crate::services::FlightExplorer;

/// Current planner mode and the values typed into its inputs.
///
/// Every value is checked against the candidates offered for its field when
/// it is set; a rejected value clears the field.
#[derive(Debug, Clone, Default)]
pub struct ModeDispatcher {
    mode: PlannerMode,
    values: IndexMap<InputField, String>,
}

impl ModeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> PlannerMode {
        self.mode
    }

    pub fn value(&self, field: InputField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Switch mode by index, keeping only values the new mode uses and offers.
    pub fn select_mode(
        &mut self,
        explorer: &FlightExplorer,
        index: usize,
    ) -> ExplorerResult<PlannerMode> {
        let mode = PlannerMode::from_index(index)?;
        debug!("Planner mode {} -> {}", self.mode, mode);
        self.mode = mode;

        // Fields are visited upstream first so dependents see the kept values.
        for field in InputField::ALL {
            let Some(value) = self.values.get(&field) else {
                continue;
            };
            if !mode.enables(field) || !self.candidates(explorer, field).contains(value) {
                debug!("Dropping {} '{}' on switch to {}", field, value, mode);
                self.values.shift_remove(&field);
            }
        }
        Ok(mode)
    }

    /// Candidates offered for a field given the values chosen so far.
    pub fn candidates(&self, explorer: &FlightExplorer, field: InputField) -> Vec<String> {
        match field {
            InputField::Source => explorer.airport_names(),
            InputField::Destination => match self.value(InputField::Source) {
                Some(source) => explorer.destinations_from(source),
                None => Vec::new(),
            },
            InputField::FlightCode => match (
                self.value(InputField::Source),
                self.value(InputField::Destination),
            ) {
                (Some(source), Some(destination)) => {
                    explorer.route_flight_codes(source, destination)
                }
                _ => Vec::new(),
            },
            InputField::Attribute if self.mode == PlannerMode::Frequency => {
                attribute_names(Attribute::countable())
            }
            InputField::Attribute | InputField::SecondAttribute => {
                attribute_names(Attribute::numeric())
            }
            InputField::TicketClass => explorer.ticket_classes(),
            InputField::ChartStyle => ChartStyle::ALL
                .iter()
                .map(|style| style.as_str().to_string())
                .collect(),
        }
    }

    /// Which fields the current mode enables, with their candidates.
    pub fn configure_inputs(&self, explorer: &FlightExplorer) -> Vec<InputConfig> {
        InputField::ALL
            .into_iter()
            .map(|field| self.input_config(explorer, field))
            .collect()
    }

    /// Set one field from a selection event.
    ///
    /// Returns the refreshed configuration of the fields that depend on it.
    pub fn set_input(
        &mut self,
        explorer: &FlightExplorer,
        field: InputField,
        value: &str,
    ) -> ExplorerResult<Vec<InputConfig>> {
        let value = value.trim();
        if !self.mode.enables(field) || !self.candidates(explorer, field).iter().any(|c| c == value)
        {
            warn!("Rejected {} '{}' in {} mode", field, value, self.mode);
            self.values.shift_remove(&field);
            return Err(ExplorerError::invalid_selection(field.name(), value));
        }
        self.values.insert(field, value.to_string());
        Ok(self.refresh_input_options(explorer, field))
    }

    /// Recompute the candidates that depend on `changed`.
    ///
    /// Dependent values that are no longer offered are cleared.
    pub fn refresh_input_options(
        &mut self,
        explorer: &FlightExplorer,
        changed: InputField,
    ) -> Vec<InputConfig> {
        let mut refreshed = Vec::new();
        for &dependent in changed.dependents() {
            if !self.mode.enables(dependent) {
                continue;
            }
            let config = self.input_config(explorer, dependent);
            let stale = self
                .value(dependent)
                .is_some_and(|v| !config.candidates.iter().any(|c| c == v));
            if stale {
                self.values.shift_remove(&dependent);
            }
            refreshed.push(config);
        }
        refreshed
    }

    /// Build the current mode's graph and return its statistics text.
    ///
    /// An unknown flight comes back as text rather than as an error.
    pub fn generate_graph(&self, explorer: &mut FlightExplorer) -> ExplorerResult<String> {
        match self.mode {
            PlannerMode::Availability => {
                let source = self.require(InputField::Source)?;
                let destination = self.require(InputField::Destination)?;
                explorer.availability_graph(source, destination)
            }
            PlannerMode::DaysBooked => {
                let source = self.require(InputField::Source)?;
                let destination = self.require(InputField::Destination)?;
                let flight = self.require(InputField::FlightCode)?;
                match explorer.day_plot(source, destination, flight) {
                    Err(ExplorerError::NotFound(what)) => Ok(format!("Not found: {}", what)),
                    other => other,
                }
            }
            PlannerMode::Frequency => {
                let attribute: Attribute = self.require(InputField::Attribute)?.parse()?;
                let style = match self.value(InputField::ChartStyle) {
                    Some(style) => style.parse()?,
                    None => ChartStyle::default(),
                };
                explorer.frequency_plot(attribute, style)
            }
            PlannerMode::ByAirline => {
                let class: TicketClass = self.require(InputField::TicketClass)?.parse()?;
                explorer.airline_graph(class)
            }
            PlannerMode::Correlation => {
                let x = numeric_attribute(self.require(InputField::Attribute)?)?;
                let y = numeric_attribute(self.require(InputField::SecondAttribute)?)?;
                explorer.correlation_graph(x, y)
            }
        }
    }

    fn require(&self, field: InputField) -> ExplorerResult<&str> {
        self.value(field)
            .ok_or_else(|| ExplorerError::invalid_selection(field.name(), ""))
    }

    fn input_config(&self, explorer: &FlightExplorer, field: InputField) -> InputConfig {
        let enabled = self.mode.enables(field);
        InputConfig {
            field,
            enabled,
            candidates: if enabled {
                self.candidates(explorer, field)
            } else {
                Vec::new()
            },
        }
    }
}

fn attribute_names(attributes: Vec<Attribute>) -> Vec<String> {
    attributes
        .into_iter()
        .map(|a| a.column_name().to_string())
        .collect()
}
