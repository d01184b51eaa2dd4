//! The From/To/Flight selection flow of the flight search page.

use log::warn;

use super::modes::InputField;
use crate::error::{ExplorerError, ExplorerResult};
use crate::services::FlightExplorer;

#[derive(Debug, Clone, Default)]
pub struct SearchController {
    source: Option<String>,
    destination: Option<String>,
    flight: Option<String>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn flight(&self) -> Option<&str> {
        self.flight.as_deref()
    }

    /// Choose the departure airport; returns the destinations it offers.
    ///
    /// A destination still reachable from the new source keeps the pair
    /// complete, so the explorer switches to that pair right away.
    pub fn select_source(
        &mut self,
        explorer: &mut FlightExplorer,
        source: &str,
    ) -> ExplorerResult<Vec<String>> {
        let source = source.trim();
        if !explorer.airport_names().iter().any(|a| a == source) {
            self.source = None;
            return Err(reject(InputField::Source, source));
        }

        let destinations = explorer.destinations_from(source);
        self.source = Some(source.to_string());
        match self.destination.clone() {
            Some(destination) if destinations.contains(&destination) => {
                explorer.select_pair(source, &destination)?;
                self.drop_stale_flight(explorer);
            }
            _ => {
                self.destination = None;
                self.flight = None;
            }
        }
        Ok(destinations)
    }

    /// Choose the arrival airport, redraw the pair's prices and return its flight codes.
    pub fn select_destination(
        &mut self,
        explorer: &mut FlightExplorer,
        destination: &str,
    ) -> ExplorerResult<Vec<String>> {
        let destination = destination.trim();
        let Some(source) = self.source.clone() else {
            self.destination = None;
            return Err(reject(InputField::Destination, destination));
        };
        if !explorer
            .destinations_from(&source)
            .iter()
            .any(|d| d == destination)
        {
            self.destination = None;
            return Err(reject(InputField::Destination, destination));
        }

        explorer.select_pair(&source, destination)?;
        self.destination = Some(destination.to_string());

        Ok(self.drop_stale_flight(explorer))
    }

    /// Choose a flight of the pair and produce its price analysis.
    pub fn select_flight(
        &mut self,
        explorer: &mut FlightExplorer,
        flight: &str,
    ) -> ExplorerResult<String> {
        let flight = flight.trim();
        let offered = match (&self.source, &self.destination) {
            (Some(source), Some(destination)) => explorer.route_flight_codes(source, destination),
            _ => Vec::new(),
        };
        if !offered.iter().any(|code| code == flight) {
            self.flight = None;
            return Err(reject(InputField::FlightCode, flight));
        }

        self.flight = Some(flight.to_string());
        Ok(explorer.generate_price_analysis(flight))
    }

    /// Flight codes of the selected pair; a chosen flight outside them is cleared.
    fn drop_stale_flight(&mut self, explorer: &FlightExplorer) -> Vec<String> {
        let codes = explorer.engine().flight_codes();
        if self.flight.as_ref().is_some_and(|f| !codes.contains(f)) {
            self.flight = None;
        }
        codes
    }
}

fn reject(field: InputField, value: &str) -> ExplorerError {
    warn!("Rejected {} '{}' on the search page", field, value);
    ExplorerError::invalid_selection(field.name(), value)
}
