//! Narrative pages of the data summary view.

use std::fmt::Write;

use indexmap::IndexMap;

use super::analysis::{CorrelationStrength, NO_STATISTICS};
use super::statistics::{extremes, mean, mean_price_by, pearson_correlation};
use crate::core::domain::{Attribute, FieldValue};
use crate::core::Dataset;
use crate::transformations::WorkingSubset;

/// Number of pages in the data summary.
pub const SUMMARY_PAGE_COUNT: usize = 3;

/// Bookings made at least this many days ahead count as early.
pub const EARLY_BOOKING_DAYS: i64 = 16;

/// Narrative text for one summary page; out-of-range pages are empty.
pub fn summary_text(dataset: &Dataset, page: usize) -> String {
    if dataset.is_empty() {
        return NO_STATISTICS.to_string();
    }
    let subset = WorkingSubset::from_dataset(dataset);
    match page {
        0 => stops_and_airlines(&subset),
        1 => booking_window(&subset),
        2 => time_of_day(&subset),
        _ => String::new(),
    }
}

fn stops_and_airlines(subset: &WorkingSubset) -> String {
    let mut by_stops: Vec<(i64, f64)> = mean_price_by(subset, Attribute::Stops)
        .into_iter()
        .filter_map(|(k, v)| match k {
            FieldValue::Integer(stops) => Some((stops, v)),
            _ => None,
        })
        .collect();
    by_stops.sort_by_key(|(stops, _)| *stops);

    let mut text = String::from("Average price by number of stops:\n");
    for (stops, price) in &by_stops {
        let _ = writeln!(text, "  {} stop(s): {:.2} rupees", stops, price);
    }

    if let Some((stops, price)) = by_stops
        .iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    {
        let _ = writeln!(
            text,
            "\nFlights with {} stop(s) are the most expensive on average\nat {:.2} rupees.",
            stops, price
        );
    }

    if let Some(((cheapest, _), (priciest, _))) = extremes(&mean_price_by(subset, Attribute::Airline)) {
        let _ = writeln!(
            text,
            "{} on average provides the cheapest flights and\n{} on average provides the most expensive flights.",
            cheapest, priciest
        );
    }
    text
}

fn booking_window(subset: &WorkingSubset) -> String {
    let early: Vec<f64> = subset
        .iter()
        .filter(|r| r.days_left >= EARLY_BOOKING_DAYS)
        .map(|r| r.price)
        .collect();
    let late: Vec<f64> = subset
        .iter()
        .filter(|r| r.days_left < EARLY_BOOKING_DAYS)
        .map(|r| r.price)
        .collect();

    let mut text = String::new();
    match (mean(&early), mean(&late)) {
        (Some(early), Some(late)) => {
            let _ = writeln!(
                text,
                "Booking at least {} days before the flight costs\n{:.2} rupees on average, against {:.2} rupees\nfor later bookings.",
                EARLY_BOOKING_DAYS, early, late
            );
        }
        _ => {
            let _ = writeln!(
                text,
                "Not enough data to compare bookings made before and after\n{} days ahead.",
                EARLY_BOOKING_DAYS
            );
        }
    }

    let days: Vec<f64> = subset.iter().map(|r| r.days_left as f64).collect();
    match pearson_correlation(&days, &subset.prices()) {
        Some(r) => {
            let relation = if r < 0.0 { "negative" } else { "positive" };
            let _ = writeln!(
                text,
                "\nThe correlation coefficient between price and no. of days is\n{:.2}, a {} {} relation.",
                r,
                CorrelationStrength::from_coefficient(r).label(),
                relation
            );
            if r < 0.0 {
                text.push_str(
                    "The more days between booking and departure,\nthe cheaper the ticket becomes.\n",
                );
            }
        }
        None => text.push_str("\nDays left do not vary enough to compute a correlation.\n"),
    }
    text
}

fn time_of_day(subset: &WorkingSubset) -> String {
    let mut text = String::new();

    if let Some(((cheap, cheap_price), (dear, dear_price))) =
        extremes(&mean_price_by(subset, Attribute::DepartureTime))
    {
        let _ = writeln!(
            text,
            "Flights that depart during {} on average have the highest\ncost with an average cost of {:.2} rupees and flights that\ndepart during {} on average have the cheapest cost with\nan average cost of {:.2} rupees.",
            dear, dear_price, cheap, cheap_price
        );
    }

    let mut intervals: IndexMap<(String, String), (f64, usize)> = IndexMap::new();
    for record in subset.iter() {
        let entry = intervals
            .entry((record.departure_time.clone(), record.arrival_time.clone()))
            .or_insert((0.0, 0));
        entry.0 += record.price;
        entry.1 += 1;
    }
    let interval_means: IndexMap<(String, String), f64> = intervals
        .into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect();

    if let Some((((cheap_dep, cheap_arr), _), ((dear_dep, dear_arr), _))) = extremes(&interval_means) {
        let _ = writeln!(
            text,
            "\nThe cheapest time interval on average is {} to {}\nand the most expensive is {} to {}.",
            cheap_dep, cheap_arr, dear_dep, dear_arr
        );
    }
    text
}
