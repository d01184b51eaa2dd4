//! Text reports built from working subsets.
//!
//! Prices are printed with two decimals and percentages with none. Group
//! comparisons always use the mean.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::statistics::{compute_stats, describe_by_group, pearson_correlation, SummaryStats};
use crate::core::domain::{Attribute, Record, TicketClass};
use crate::core::Dataset;
use crate::error::{ExplorerError, ExplorerResult};
use crate::transformations::{QueryEngine, WorkingSubset};

pub const FLIGHT_NOT_FOUND: &str = "Flight not found";
pub const NO_STATISTICS: &str = "No statistics available";
pub const NO_DEPARTURE_DATA: &str = "No Departure data";

/// Whether a group is cheaper or more expensive than the overall mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceDirection {
    Cheaper,
    MoreExpensive,
}

/// A group mean compared against an overall mean.
///
/// `percent` is never negative; the direction carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub direction: PriceDirection,
    pub percent: f64,
}

impl PriceComparison {
    pub fn percent_label(&self) -> String {
        format!("{:.0}", self.percent)
    }
}

/// Compare a group mean with the overall mean.
///
/// A group below the overall mean is cheaper by `(overall - group) / overall`;
/// otherwise it is more expensive by `(group - overall) / overall`. Returns
/// `None` when the overall mean is not a positive number.
///
/// # Examples
///
/// ```
/// use flight_explorer::algorithms::analysis::{comparative_percentage, PriceDirection};
///
/// let cmp = comparative_percentage(3000.0, 4000.0).unwrap();
/// assert_eq!(cmp.direction, PriceDirection::Cheaper);
/// assert_eq!(cmp.percent_label(), "25");
/// ```
pub fn comparative_percentage(group_mean: f64, overall_mean: f64) -> Option<PriceComparison> {
    if !(overall_mean > 0.0) || !group_mean.is_finite() {
        return None;
    }

    let comparison = if group_mean < overall_mean {
        PriceComparison {
            direction: PriceDirection::Cheaper,
            percent: (overall_mean - group_mean) / overall_mean * 100.0,
        }
    } else {
        PriceComparison {
            direction: PriceDirection::MoreExpensive,
            percent: (group_mean - overall_mean) / overall_mean * 100.0,
        }
    };
    Some(comparison)
}

/// Qualitative bucket of a correlation coefficient's magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Negligible,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude < 0.2 {
            Self::Negligible
        } else if magnitude < 0.4 {
            Self::Weak
        } else if magnitude < 0.6 {
            Self::Moderate
        } else if magnitude < 0.8 {
            Self::Strong
        } else {
            Self::VeryStrong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Negligible => "very weak/negligible",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::VeryStrong => "very strong",
        }
    }
}

fn relation_label(r: f64) -> &'static str {
    if r < 0.0 {
        "negative"
    } else {
        "positive"
    }
}

/// Describe a known correlation coefficient between two named attributes.
pub fn describe_correlation(x: &str, y: &str, r: f64) -> String {
    let mut description = format!(
        "{} and {} have a\ncorrelation coefficient of {:.2}\n",
        x, y, r
    );
    if r == 1.0 {
        description.push_str("because they are the same attribute");
    } else {
        let _ = write!(
            description,
            "which is considered to be a {} {} relation",
            CorrelationStrength::from_coefficient(r).label(),
            relation_label(r)
        );
    }
    description
}

/// Pearson correlation between two numeric attributes of a subset, as text.
pub fn correlation_description(
    subset: &WorkingSubset,
    x: Attribute,
    y: Attribute,
) -> ExplorerResult<String> {
    let xs = subset.numeric_values(x)?;
    let ys = subset.numeric_values(y)?;

    let r = if x == y {
        Some(1.0)
    } else {
        pearson_correlation(&xs, &ys)
    };

    Ok(match r {
        Some(r) => describe_correlation(x.column_name(), y.column_name(), r),
        None => format!(
            "{} and {} do not vary enough\nto compute a correlation coefficient",
            x, y
        ),
    })
}

/// Departure counts per departure time, alphabetically.
pub fn departure_counts(subset: &WorkingSubset) -> String {
    let mut counts: Vec<(String, usize)> = subset
        .value_counts(Attribute::DepartureTime)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    if counts.is_empty() {
        return NO_DEPARTURE_DATA.to_string();
    }
    counts.sort();

    let width = counts
        .iter()
        .map(|(k, _)| k.len())
        .max()
        .unwrap_or(0)
        .max("departure_time".len())
        + 4;

    let mut description = format!("{:<width$}number of departures\n", "departure_time");
    for (time, count) in counts {
        let _ = writeln!(description, "{:<width$}{}", time, count);
    }
    description
}

fn push_price_stats(description: &mut String, stats: &SummaryStats) {
    let _ = write!(
        description,
        "Mean: {:.2} rupees\nMin: {:.2} rupees\nMax: {:.2} rupees\n",
        stats.mean, stats.min, stats.max
    );
}

/// Economy and Business price statistics for one flight of the active pair.
pub fn flight_class_statistics(
    economy: &WorkingSubset,
    business: &WorkingSubset,
    flight_code: &str,
) -> String {
    let mut description = String::new();
    for (index, (class, partition)) in [
        (TicketClass::Economy, economy),
        (TicketClass::Business, business),
    ]
    .into_iter()
    .enumerate()
    {
        if index > 0 {
            description.push('\n');
        }
        let _ = writeln!(description, "{} class price statistics:", class);
        match compute_stats(&partition.by_flight(flight_code).prices()) {
            Some(stats) => push_price_stats(&mut description, &stats),
            None => description.push_str("No fares recorded\n"),
        }
    }
    description
}

/// Per-airline price statistics over one ticket class of the whole dataset.
pub fn airline_statistics(dataset: &Dataset, class: TicketClass) -> ExplorerResult<String> {
    let subset = WorkingSubset::from_dataset(dataset).by_class(class);
    let groups = describe_by_group(&subset, Attribute::Airline, Attribute::Price)?;

    let mut description = format!("{} class price statistics:\n", class);
    if groups.is_empty() {
        description.push_str("\nNo fares recorded\n");
    }
    for (airline, stats) in groups {
        let _ = writeln!(description, "\n*Price statistics for {}*", airline);
        push_price_stats(&mut description, &stats);
    }
    Ok(description)
}

/// How the airline's mean compares with the whole comparison subset.
pub fn airline_analysis(subset: &WorkingSubset, airline: &str) -> String {
    let group = subset.filter(|r| r.airline == airline);
    match compare_subsets(&group, subset) {
        Some(cmp) if cmp.direction == PriceDirection::Cheaper => format!(
            "{} on average provides {} percent cheaper\nflights compared to similar flights from other airlines.\n",
            airline,
            cmp.percent_label()
        ),
        Some(cmp) => format!(
            "{} on average provides {} percent\nmore expensive flights compared to similar flights.\n",
            airline,
            cmp.percent_label()
        ),
        None => format!("Not enough data to compare {} with other airlines.\n", airline),
    }
}

/// How the stop count's mean compares with the whole comparison subset.
pub fn stop_analysis(subset: &WorkingSubset, stops: i64) -> String {
    let group = subset.filter(|r| r.stops == stops);
    match compare_subsets(&group, subset) {
        Some(cmp) => format!(
            "A flight with {} stop(s) on average {}\nprices by {} percent compared to similar flights.\n",
            stops,
            verb(cmp.direction),
            cmp.percent_label()
        ),
        None => format!("Not enough data for flights with {} stop(s).\n", stops),
    }
}

/// How the arrival time's mean compares with flights of the same departure time.
pub fn time_analysis(subset: &WorkingSubset, departure: &str, arrival: &str) -> String {
    let departing = subset.filter(|r| r.departure_time == departure);
    let group = departing.filter(|r| r.arrival_time == arrival);
    match compare_subsets(&group, &departing) {
        Some(cmp) => format!(
            "A flight from {} to {} on average\n{} prices by {} percent compared to similar flights.\n",
            departure,
            arrival,
            verb(cmp.direction),
            cmp.percent_label()
        ),
        None => format!(
            "Not enough data for flights from {} to {}.\n",
            departure, arrival
        ),
    }
}

/// Mean price of same-class flights whose duration falls in the same hour bucket.
pub fn duration_analysis(dataset: &Dataset, class: TicketClass, duration: f64) -> String {
    let bucket = duration.floor();
    let prices: Vec<f64> = dataset
        .iter()
        .filter(|r| r.class == class && r.duration >= bucket && r.duration < bucket + 1.0)
        .map(|r| r.price)
        .collect();

    match compute_stats(&prices) {
        Some(stats) => format!(
            "A flight with a duration of {} hours\non average costs {:.2} rupees\n",
            duration, stats.mean
        ),
        None => format!("Not enough data for flights lasting {} hours.\n", duration),
    }
}

fn compare_subsets(group: &WorkingSubset, overall: &WorkingSubset) -> Option<PriceComparison> {
    comparative_percentage(group.mean_price()?, overall.mean_price()?)
}

fn verb(direction: PriceDirection) -> &'static str {
    match direction {
        PriceDirection::Cheaper => "decreases",
        PriceDirection::MoreExpensive => "increases",
    }
}

/// Full price report of one flight against the active pair.
///
/// Flights are compared with the cached partition of the flight's class, so
/// callers select the pair first. An unknown code yields [`FLIGHT_NOT_FOUND`].
pub fn price_analysis(engine: &QueryEngine, flight_code: &str) -> String {
    let Some(flight) = engine.lookup_flight(flight_code) else {
        return FLIGHT_NOT_FOUND.to_string();
    };
    let flight: &Record = flight;

    let (source, destination) = match engine.pair() {
        Some(pair) => (pair.source.as_str(), pair.destination.as_str()),
        None => ("any airport", "any airport"),
    };
    let comparison = engine.partition(flight.class);

    let timeframe = format!("{} to {}", flight.departure_time, flight.arrival_time);
    let duration_label = format!("{} hours", flight.duration);

    let mut report = format!(
        "Flight: {:<30}  Stops: {} stop(s)\nTime : {:<28}Price: {:.2} rupees\nDuration : {:<26}Class: {}\n",
        flight_code, flight.stops, timeframe, flight.price, duration_label, flight.class
    );

    let Some(average) = comparison.mean_price() else {
        let _ = write!(
            report,
            "\nNot enough data to compare flight {} with\n{} flights from {} to {}.\n",
            flight_code, flight.class, source, destination
        );
        return report;
    };

    let _ = write!(
        report,
        "The average cost of a flight from {} to {}\nis {:.2} rupees\n",
        source, destination, average
    );

    if flight.price < average {
        let _ = write!(
            report,
            "\nFlight {} is {:.2} rupees cheaper than the average\ncost of flights from {} to {}.\n",
            flight_code,
            average - flight.price,
            source,
            destination
        );
    } else {
        let _ = write!(
            report,
            "\nFlight {} is {:.2} rupees more expensive\nthan the average cost of flights from {} to {}.\n",
            flight_code,
            flight.price - average,
            source,
            destination
        );
    }
    report.push_str("The price of the flight is influenced by the following factors:\n");

    let _ = write!(
        report,
        "\nDuration: {}\nAirline: {}\nNumber of stops: {}\nTime of day: {}",
        duration_analysis(engine.dataset(), flight.class, flight.duration),
        airline_analysis(comparison, &flight.airline),
        stop_analysis(comparison, flight.stops),
        time_analysis(comparison, &flight.departure_time, &flight.arrival_time),
    );

    report
}

/// Parse a numeric attribute name typed by a user.
pub fn numeric_attribute(name: &str) -> ExplorerResult<Attribute> {
    let attribute: Attribute = name.parse()?;
    if !attribute.is_numeric() {
        return Err(ExplorerError::InvalidAttribute(format!(
            "{} is not numeric",
            attribute
        )));
    }
    Ok(attribute)
}
