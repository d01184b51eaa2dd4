//! Domain models for flight observations and their attributes.
//!
//! This module provides the core data structures that represent one row of the
//! flight-pricing table, the closed set of column names, and the cell values
//! used for grouping and candidate listings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ExplorerError;

/// Ticket class of a flight observation.
///
/// # Examples
///
/// ```
/// use flight_explorer::core::domain::TicketClass;
///
/// let class: TicketClass = "Business".parse().unwrap();
/// assert_eq!(class, TicketClass::Business);
/// assert_eq!(class.as_str(), "Business");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketClass {
    Economy,
    Business,
}

impl TicketClass {
    pub const ALL: [TicketClass; 2] = [TicketClass::Economy, TicketClass::Business];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketClass::Economy => "Economy",
            TicketClass::Business => "Business",
        }
    }
}

impl FromStr for TicketClass {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economy" => Ok(Self::Economy),
            "business" => Ok(Self::Business),
            _ => Err(ExplorerError::invalid_selection("class", s)),
        }
    }
}

impl fmt::Display for TicketClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column of the flight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    SourceCity,
    DestinationCity,
    Airline,
    Flight,
    Class,
    Stops,
    DepartureTime,
    ArrivalTime,
    Duration,
    DaysLeft,
    Price,
}

impl Attribute {
    /// All attributes in schema order.
    pub const ALL: [Attribute; 11] = [
        Attribute::SourceCity,
        Attribute::DestinationCity,
        Attribute::Airline,
        Attribute::Flight,
        Attribute::Class,
        Attribute::Stops,
        Attribute::DepartureTime,
        Attribute::ArrivalTime,
        Attribute::Duration,
        Attribute::DaysLeft,
        Attribute::Price,
    ];

    /// Column name as it appears in the dataset header.
    pub fn column_name(&self) -> &'static str {
        match self {
            Attribute::SourceCity => "source_city",
            Attribute::DestinationCity => "destination_city",
            Attribute::Airline => "airline",
            Attribute::Flight => "flight",
            Attribute::Class => "class",
            Attribute::Stops => "stops",
            Attribute::DepartureTime => "departure_time",
            Attribute::ArrivalTime => "arrival_time",
            Attribute::Duration => "duration",
            Attribute::DaysLeft => "days_left",
            Attribute::Price => "price",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Attribute::Stops | Attribute::Duration | Attribute::DaysLeft | Attribute::Price
        )
    }

    /// Attributes whose distinct values make sense to count.
    pub fn is_countable(&self) -> bool {
        !matches!(self, Attribute::Flight | Attribute::Price)
    }

    /// Continuous attributes are drawn as histograms rather than bar counts.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Attribute::Duration | Attribute::DaysLeft)
    }

    pub fn numeric() -> Vec<Attribute> {
        Self::ALL.into_iter().filter(|a| a.is_numeric()).collect()
    }

    pub fn countable() -> Vec<Attribute> {
        Self::ALL.into_iter().filter(|a| a.is_countable()).collect()
    }
}

impl FromStr for Attribute {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.column_name() == s.trim())
            .ok_or_else(|| ExplorerError::InvalidAttribute(s.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// A single cell value.
///
/// Floats compare and hash by bit pattern so values can key ordered sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Text(v) => v.hash(state),
            FieldValue::Integer(v) => v.hash(state),
            FieldValue::Float(v) => v.to_bits().hash(state),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// One flight observation row.
///
/// # Examples
///
/// ```
/// use flight_explorer::core::domain::{Attribute, FieldValue, Record, TicketClass};
///
/// let record = Record {
///     source_city: "Delhi".to_string(),
///     destination_city: "Mumbai".to_string(),
///     airline: "Vistara".to_string(),
///     flight: "UK-995".to_string(),
///     class: TicketClass::Economy,
///     stops: 0,
///     departure_time: "Morning".to_string(),
///     arrival_time: "Afternoon".to_string(),
///     duration: 2.25,
///     days_left: 10,
///     price: 5000.0,
/// };
///
/// assert_eq!(record.value(Attribute::Price), FieldValue::Float(5000.0));
/// assert!(record.is_route("Delhi", "Mumbai"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub source_city: String,
    pub destination_city: String,
    pub airline: String,
    pub flight: String,
    pub class: TicketClass,
    pub stops: i64,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: f64,
    pub days_left: i64,
    pub price: f64,
}

impl Record {
    /// Returns the value of an attribute as a [`FieldValue`].
    pub fn value(&self, attribute: Attribute) -> FieldValue {
        match attribute {
            Attribute::SourceCity => FieldValue::Text(self.source_city.clone()),
            Attribute::DestinationCity => FieldValue::Text(self.destination_city.clone()),
            Attribute::Airline => FieldValue::Text(self.airline.clone()),
            Attribute::Flight => FieldValue::Text(self.flight.clone()),
            Attribute::Class => FieldValue::Text(self.class.as_str().to_string()),
            Attribute::Stops => FieldValue::Integer(self.stops),
            Attribute::DepartureTime => FieldValue::Text(self.departure_time.clone()),
            Attribute::ArrivalTime => FieldValue::Text(self.arrival_time.clone()),
            Attribute::Duration => FieldValue::Float(self.duration),
            Attribute::DaysLeft => FieldValue::Integer(self.days_left),
            Attribute::Price => FieldValue::Float(self.price),
        }
    }

    /// Returns the numeric value of an attribute, or `None` for text columns.
    pub fn numeric(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::Stops => Some(self.stops as f64),
            Attribute::Duration => Some(self.duration),
            Attribute::DaysLeft => Some(self.days_left as f64),
            Attribute::Price => Some(self.price),
            _ => None,
        }
    }

    pub fn is_route(&self, source: &str, destination: &str) -> bool {
        self.source_city == source && self.destination_city == destination
    }
}
