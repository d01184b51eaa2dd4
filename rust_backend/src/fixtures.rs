//! Shared in-memory datasets for unit tests.

use crate::core::domain::{Record, TicketClass};
use crate::core::Dataset;

/// A non-stop morning record with the given route, carrier and price.
pub fn record(
    source: &str,
    destination: &str,
    airline: &str,
    flight: &str,
    class: TicketClass,
    price: f64,
) -> Record {
    Record {
        source_city: source.to_string(),
        destination_city: destination.to_string(),
        airline: airline.to_string(),
        flight: flight.to_string(),
        class,
        stops: 0,
        departure_time: "Morning".to_string(),
        arrival_time: "Afternoon".to_string(),
        duration: 2.25,
        days_left: 10,
        price,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn full_record(
    source: &str,
    destination: &str,
    airline: &str,
    flight: &str,
    class: TicketClass,
    stops: i64,
    departure_time: &str,
    arrival_time: &str,
    duration: f64,
    days_left: i64,
    price: f64,
) -> Record {
    Record {
        stops,
        departure_time: departure_time.to_string(),
        arrival_time: arrival_time.to_string(),
        duration,
        days_left,
        ..record(source, destination, airline, flight, class, price)
    }
}

/// Eight records over three routes.
///
/// Delhi to Mumbai economy prices are 6000, 4000 and 2000 (mean 4000);
/// business prices are 12000 and 15000 (mean 13500).
pub fn sample_dataset() -> Dataset {
    use TicketClass::{Business, Economy};

    Dataset::new(vec![
        full_record("Delhi", "Mumbai", "Vistara", "UK-995", Economy, 0, "Morning", "Afternoon", 2.25, 10, 6000.0),
        full_record("Delhi", "Mumbai", "Vistara", "UK-995", Business, 0, "Morning", "Afternoon", 2.25, 10, 12000.0),
        full_record("Delhi", "Mumbai", "AirAsia", "I5-747", Economy, 1, "Evening", "Night", 12.5, 3, 4000.0),
        full_record("Delhi", "Mumbai", "Indigo", "6E-2046", Economy, 0, "Early_Morning", "Morning", 2.0, 30, 2000.0),
        full_record("Delhi", "Mumbai", "Vistara", "UK-963", Business, 1, "Night", "Morning", 10.0, 20, 15000.0),
        full_record("Delhi", "Kolkata", "Indigo", "6E-5001", Economy, 2, "Afternoon", "Night", 8.5, 25, 5500.0),
        full_record("Mumbai", "Delhi", "SpiceJet", "SG-8709", Economy, 0, "Evening", "Night", 2.17, 1, 5953.0),
        full_record("Mumbai", "Delhi", "Vistara", "UK-850", Business, 1, "Morning", "Evening", 9.0, 15, 20000.0),
    ])
}
