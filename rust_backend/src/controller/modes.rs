use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ExplorerError, ExplorerResult};

/// The five planner perspectives, selected by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlannerMode {
    #[default]
    Availability,
    DaysBooked,
    Frequency,
    ByAirline,
    Correlation,
}

impl PlannerMode {
    pub const ALL: [PlannerMode; 5] = [
        PlannerMode::Availability,
        PlannerMode::DaysBooked,
        PlannerMode::Frequency,
        PlannerMode::ByAirline,
        PlannerMode::Correlation,
    ];

    pub fn from_index(index: usize) -> ExplorerResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| ExplorerError::invalid_selection("mode", index.to_string()))
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlannerMode::Availability => "Flight availability",
            PlannerMode::DaysBooked => "Days booked in advance",
            PlannerMode::Frequency => "Attribute frequency",
            PlannerMode::ByAirline => "Prices by airline",
            PlannerMode::Correlation => "Attribute correlation",
        }
    }

    /// Input fields the mode enables, in display order.
    pub fn inputs(&self) -> &'static [InputField] {
        match self {
            PlannerMode::Availability => &[InputField::Source, InputField::Destination],
            PlannerMode::DaysBooked => &[
                InputField::Source,
                InputField::Destination,
                InputField::FlightCode,
            ],
            PlannerMode::Frequency => &[InputField::Attribute, InputField::ChartStyle],
            PlannerMode::ByAirline => &[InputField::TicketClass],
            PlannerMode::Correlation => &[InputField::Attribute, InputField::SecondAttribute],
        }
    }

    pub fn enables(&self, field: InputField) -> bool {
        self.inputs().contains(&field)
    }
}

impl fmt::Display for PlannerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A selection control of the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Source,
    Destination,
    FlightCode,
    Attribute,
    SecondAttribute,
    TicketClass,
    ChartStyle,
}

impl InputField {
    pub const ALL: [InputField; 7] = [
        InputField::Source,
        InputField::Destination,
        InputField::FlightCode,
        InputField::Attribute,
        InputField::SecondAttribute,
        InputField::TicketClass,
        InputField::ChartStyle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InputField::Source => "source",
            InputField::Destination => "destination",
            InputField::FlightCode => "flight",
            InputField::Attribute => "attribute",
            InputField::SecondAttribute => "second_attribute",
            InputField::TicketClass => "class",
            InputField::ChartStyle => "style",
        }
    }

    /// Fields whose candidates are derived from this one.
    pub fn dependents(&self) -> &'static [InputField] {
        match self {
            InputField::Source => &[InputField::Destination, InputField::FlightCode],
            InputField::Destination => &[InputField::FlightCode],
            _ => &[],
        }
    }
}

impl FromStr for InputField {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source" | "from" => Ok(InputField::Source),
            "destination" | "to" => Ok(InputField::Destination),
            "flight" => Ok(InputField::FlightCode),
            "attribute" | "x" => Ok(InputField::Attribute),
            "second_attribute" | "y" => Ok(InputField::SecondAttribute),
            "class" => Ok(InputField::TicketClass),
            "style" => Ok(InputField::ChartStyle),
            _ => Err(ExplorerError::invalid_selection("field", s)),
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a field is enabled and what it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub field: InputField,
    pub enabled: bool,
    pub candidates: Vec<String>,
}
