use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::domain::{Attribute, FieldValue, Record, TicketClass};
use crate::core::Dataset;
use crate::error::{ExplorerError, ExplorerResult};

/// An active (source, destination) airport pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutePair {
    pub source: String,
    pub destination: String,
}

impl RoutePair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for RoutePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.source, self.destination)
    }
}

/// A filtered view of the dataset for the current query.
///
/// Subsets share rows with the [`Dataset`] and are cheap to rebuild.
#[derive(Debug, Clone, Default)]
pub struct WorkingSubset {
    records: Vec<Arc<Record>>,
}

impl WorkingSubset {
    pub fn from_records(records: Vec<Arc<Record>>) -> Self {
        Self { records }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_records(dataset.records().to_vec())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().map(|r| &**r)
    }

    /// Keep the rows matching a predicate.
    pub fn filter<F>(&self, predicate: F) -> WorkingSubset
    where
        F: Fn(&Record) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|&r| predicate(r))
            .cloned()
            .collect();
        WorkingSubset { records }
    }

    /// Keep the rows of one ticket class.
    pub fn by_class(&self, class: TicketClass) -> WorkingSubset {
        self.filter(|r| r.class == class)
    }

    /// Keep the rows of one flight code.
    pub fn by_flight(&self, flight_code: &str) -> WorkingSubset {
        self.filter(|r| r.flight == flight_code)
    }

    pub fn prices(&self) -> Vec<f64> {
        self.iter().map(|r| r.price).collect()
    }

    /// Mean ticket price, or `None` for an empty subset.
    pub fn mean_price(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        Some(self.iter().map(|r| r.price).sum::<f64>() / self.records.len() as f64)
    }

    /// Values of a numeric attribute, in row order.
    pub fn numeric_values(&self, attribute: Attribute) -> ExplorerResult<Vec<f64>> {
        if !attribute.is_numeric() {
            return Err(ExplorerError::InvalidAttribute(format!(
                "{} is not numeric",
                attribute
            )));
        }
        Ok(self.iter().filter_map(|r| r.numeric(attribute)).collect())
    }

    /// Distinct values of an attribute in first-seen order.
    pub fn unique_values(&self, attribute: Attribute) -> IndexSet<FieldValue> {
        self.iter().map(|r| r.value(attribute)).collect()
    }

    /// Row counts per distinct value, in first-seen order.
    pub fn value_counts(&self, attribute: Attribute) -> IndexMap<FieldValue, usize> {
        let mut counts: IndexMap<FieldValue, usize> = IndexMap::new();
        for record in self.iter() {
            *counts.entry(record.value(attribute)).or_insert(0) += 1;
        }
        counts
    }
}

/// Derives working subsets from the immutable dataset.
///
/// Every query replaces the current subset and recomputes the cached
/// Economy/Business partitions of it.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    dataset: Dataset,
    current: WorkingSubset,
    economy: WorkingSubset,
    business: WorkingSubset,
    pair: Option<RoutePair>,
}

impl QueryEngine {
    pub fn new(dataset: Dataset) -> Self {
        let current = WorkingSubset::from_dataset(&dataset);
        let mut engine = Self {
            dataset,
            current: WorkingSubset::default(),
            economy: WorkingSubset::default(),
            business: WorkingSubset::default(),
            pair: None,
        };
        engine.replace_current(current);
        engine
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn current(&self) -> &WorkingSubset {
        &self.current
    }

    pub fn economy(&self) -> &WorkingSubset {
        &self.economy
    }

    pub fn business(&self) -> &WorkingSubset {
        &self.business
    }

    /// Cached partition of the current subset for one ticket class.
    pub fn partition(&self, class: TicketClass) -> &WorkingSubset {
        match class {
            TicketClass::Economy => &self.economy,
            TicketClass::Business => &self.business,
        }
    }

    /// The most recently selected airport pair.
    pub fn pair(&self) -> Option<&RoutePair> {
        self.pair.as_ref()
    }

    /// Rows whose source and destination both match.
    ///
    /// Callers validate the airports against [`QueryEngine::airport_names`]
    /// and [`QueryEngine::destinations_from`] first.
    pub fn filter_by_pair(&mut self, source: &str, destination: &str) -> &WorkingSubset {
        let subset = self.pair_subset(source, destination);
        debug!(
            "Filtered {} records for {} to {}",
            subset.len(),
            source,
            destination
        );
        self.pair = Some(RoutePair::new(source, destination));
        self.replace_current(subset);
        &self.current
    }

    /// Narrow the active pair (or the whole dataset) to one flight code.
    ///
    /// The current subset is left untouched when no row matches.
    pub fn filter_by_flight_code(&mut self, flight_code: &str) -> ExplorerResult<&WorkingSubset> {
        let base = match &self.pair {
            Some(pair) => self.pair_subset(&pair.source, &pair.destination),
            None => WorkingSubset::from_dataset(&self.dataset),
        };
        let subset = base.by_flight(flight_code);
        if subset.is_empty() {
            return Err(ExplorerError::NotFound(format!("flight {}", flight_code)));
        }
        debug!("Filtered {} records for flight {}", subset.len(), flight_code);
        self.replace_current(subset);
        Ok(&self.current)
    }

    /// The whole dataset restricted to one ticket class.
    pub fn filter_by_class(&mut self, class: TicketClass) -> &WorkingSubset {
        let subset = WorkingSubset::from_dataset(&self.dataset).by_class(class);
        debug!("Filtered {} {} records", subset.len(), class);
        self.replace_current(subset);
        &self.current
    }

    /// Make the whole dataset current.
    pub fn reset(&mut self) -> &WorkingSubset {
        let subset = WorkingSubset::from_dataset(&self.dataset);
        self.replace_current(subset);
        &self.current
    }

    /// Distinct values of an attribute across the dataset, first-seen order.
    pub fn unique_values(&self, attribute: Attribute) -> IndexSet<FieldValue> {
        self.dataset.iter().map(|r| r.value(attribute)).collect()
    }

    /// Distinct values of an attribute given by column name.
    pub fn unique_values_by_name(&self, attribute: &str) -> ExplorerResult<IndexSet<FieldValue>> {
        let attribute: Attribute = attribute.parse()?;
        Ok(self.unique_values(attribute))
    }

    /// Known departure airports.
    pub fn airport_names(&self) -> Vec<String> {
        to_strings(self.unique_values(Attribute::SourceCity))
    }

    /// Destinations reachable from a departure airport.
    pub fn destinations_from(&self, source: &str) -> Vec<String> {
        let destinations: IndexSet<&str> = self
            .dataset
            .iter()
            .filter(|r| r.source_city == source)
            .map(|r| r.destination_city.as_str())
            .collect();
        destinations.into_iter().map(str::to_string).collect()
    }

    /// Flight codes present in the current subset.
    pub fn flight_codes(&self) -> Vec<String> {
        to_strings(self.current.unique_values(Attribute::Flight))
    }

    /// Flight codes flying a pair, without touching the current subset.
    pub fn route_flight_codes(&self, source: &str, destination: &str) -> Vec<String> {
        let codes: IndexSet<&str> = self
            .dataset
            .iter()
            .filter(|r| r.is_route(source, destination))
            .map(|r| r.flight.as_str())
            .collect();
        codes.into_iter().map(str::to_string).collect()
    }

    pub fn airlines(&self) -> Vec<String> {
        to_strings(self.unique_values(Attribute::Airline))
    }

    /// Ticket classes present in the dataset.
    pub fn ticket_classes(&self) -> Vec<String> {
        to_strings(self.unique_values(Attribute::Class))
    }

    /// First dataset row of a flight code.
    pub fn lookup_flight(&self, flight_code: &str) -> Option<&Arc<Record>> {
        self.dataset
            .records()
            .iter()
            .find(|r| r.flight == flight_code)
    }

    fn pair_subset(&self, source: &str, destination: &str) -> WorkingSubset {
        let records = self
            .dataset
            .records()
            .iter()
            .filter(|r| r.is_route(source, destination))
            .cloned()
            .collect();
        WorkingSubset::from_records(records)
    }

    fn replace_current(&mut self, subset: WorkingSubset) {
        self.economy = subset.by_class(TicketClass::Economy);
        self.business = subset.by_class(TicketClass::Business);
        self.current = subset;
    }
}

fn to_strings(values: IndexSet<FieldValue>) -> Vec<String> {
    values.into_iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, sample_dataset};

    #[test]
    fn test_filter_by_pair_two_record_scenario() {
        let dataset = Dataset::new(vec![
            record("Delhi", "Mumbai", "Vistara", "UK-995", TicketClass::Economy, 5000.0),
            record("Delhi", "Mumbai", "Vistara", "UK-995", TicketClass::Business, 9000.0),
        ]);
        let mut engine = QueryEngine::new(dataset);

        let subset = engine.filter_by_pair("Delhi", "Mumbai");
        assert_eq!(subset.len(), 2);
        assert_eq!(format!("{:.2}", subset.mean_price().unwrap()), "7000.00");

        let economy = engine.economy();
        assert_eq!(economy.len(), 1);
        assert_eq!(economy.records()[0].price, 5000.0);
        assert_eq!(engine.business().records()[0].price, 9000.0);
    }

    #[test]
    fn test_filter_by_pair_matches_both_fields() {
        let mut engine = QueryEngine::new(sample_dataset());
        let subset = engine.filter_by_pair("Delhi", "Mumbai");

        assert_eq!(subset.len(), 5);
        assert!(subset.iter().all(|r| r.is_route("Delhi", "Mumbai")));
        assert_eq!(engine.pair(), Some(&RoutePair::new("Delhi", "Mumbai")));
    }

    #[test]
    fn test_partitions_cover_current_subset() {
        let mut engine = QueryEngine::new(sample_dataset());
        engine.filter_by_pair("Delhi", "Mumbai");

        let economy = engine.economy();
        let business = engine.business();
        assert_eq!(economy.len() + business.len(), engine.current().len());
        assert!(economy.iter().all(|r| r.class == TicketClass::Economy));
        assert!(business.iter().all(|r| r.class == TicketClass::Business));
    }

    #[test]
    fn test_filter_by_flight_code_within_pair() {
        let mut engine = QueryEngine::new(sample_dataset());
        engine.filter_by_pair("Delhi", "Mumbai");

        let subset = engine.filter_by_flight_code("UK-995").unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(engine.economy().len(), 1);
        assert_eq!(engine.business().len(), 1);
    }

    #[test]
    fn test_filter_by_unknown_flight_code() {
        let mut engine = QueryEngine::new(sample_dataset());
        engine.filter_by_pair("Delhi", "Mumbai");

        let err = engine.filter_by_flight_code("XX-000").unwrap_err();
        assert!(matches!(err, ExplorerError::NotFound(_)));
        // Current subset is still the pair
        assert_eq!(engine.current().len(), 5);
    }

    #[test]
    fn test_filter_by_class() {
        let mut engine = QueryEngine::new(sample_dataset());
        let subset = engine.filter_by_class(TicketClass::Business);

        assert_eq!(subset.len(), 3);
        assert_eq!(engine.economy().len(), 0);
        assert_eq!(engine.business().len(), 3);
    }

    #[test]
    fn test_unique_values_preserve_first_seen_order() {
        let engine = QueryEngine::new(sample_dataset());

        assert_eq!(engine.airport_names(), vec!["Delhi", "Mumbai"]);
        assert_eq!(engine.destinations_from("Delhi"), vec!["Mumbai", "Kolkata"]);
        assert_eq!(
            engine.airlines(),
            vec!["Vistara", "AirAsia", "Indigo", "SpiceJet"]
        );
        assert_eq!(engine.ticket_classes(), vec!["Economy", "Business"]);
    }

    #[test]
    fn test_unique_values_by_unknown_name() {
        let engine = QueryEngine::new(sample_dataset());
        let err = engine.unique_values_by_name("altitude").unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidAttribute(_)));
        assert_eq!(engine.unique_values_by_name("stops").unwrap().len(), 3);
    }

    #[test]
    fn test_flight_codes_follow_current_subset() {
        let mut engine = QueryEngine::new(sample_dataset());
        engine.filter_by_pair("Mumbai", "Delhi");
        assert_eq!(engine.flight_codes(), vec!["SG-8709", "UK-850"]);
    }

    #[test]
    fn test_value_counts_and_numeric_values() {
        let engine = QueryEngine::new(sample_dataset());
        let counts = engine.current().value_counts(Attribute::Class);
        assert_eq!(counts[&FieldValue::Text("Economy".to_string())], 5);
        assert_eq!(counts[&FieldValue::Text("Business".to_string())], 3);

        assert!(engine.current().numeric_values(Attribute::Airline).is_err());
        assert_eq!(engine.current().numeric_values(Attribute::Price).unwrap().len(), 8);
    }

    #[test]
    fn test_mean_price_of_empty_subset() {
        let mut engine = QueryEngine::new(sample_dataset());
        let subset = engine.filter_by_pair("Delhi", "Chennai");
        assert!(subset.is_empty());
        assert_eq!(subset.mean_price(), None);
    }
}
