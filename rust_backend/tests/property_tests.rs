//! Property tests for filtering and the comparison wording.

use flight_explorer::algorithms::analysis::describe_correlation;
use flight_explorer::algorithms::{comparative_percentage, PriceDirection};
use flight_explorer::core::{Dataset, Record, TicketClass};
use flight_explorer::services::FlightExplorer;
use flight_explorer::transformations::QueryEngine;
use proptest::prelude::*;

const CITIES: [&str; 4] = ["Delhi", "Mumbai", "Kolkata", "Chennai"];

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        0..CITIES.len(),
        0..CITIES.len(),
        any::<bool>(),
        0i64..3,
        1i64..50,
        1000.0f64..100_000.0,
    )
        .prop_map(|(source, destination, business, stops, days_left, price)| Record {
            source_city: CITIES[source].to_string(),
            destination_city: CITIES[destination].to_string(),
            airline: "Vistara".to_string(),
            flight: format!("UK-{}", source * 10 + destination),
            class: if business {
                TicketClass::Business
            } else {
                TicketClass::Economy
            },
            stops,
            departure_time: "Morning".to_string(),
            arrival_time: "Night".to_string(),
            duration: 2.0 + stops as f64,
            days_left,
            price,
        })
}

proptest! {
    #[test]
    fn prop_pair_filter_matches_both_fields(
        records in prop::collection::vec(record_strategy(), 0..60),
        source in 0..CITIES.len(),
        destination in 0..CITIES.len(),
    ) {
        let mut engine = QueryEngine::new(Dataset::new(records.clone()));
        let (source, destination) = (CITIES[source], CITIES[destination]);
        let subset = engine.filter_by_pair(source, destination).clone();

        prop_assert!(subset.iter().all(|r| r.source_city == source && r.destination_city == destination));
        let expected = records.iter().filter(|r| r.is_route(source, destination)).count();
        prop_assert_eq!(subset.len(), expected);

        let economy = engine.economy();
        let business = engine.business();
        prop_assert_eq!(economy.len() + business.len(), subset.len());
        prop_assert!(economy.iter().all(|r| r.class == TicketClass::Economy));
        prop_assert!(business.iter().all(|r| r.class == TicketClass::Business));
    }

    #[test]
    fn prop_comparison_is_never_negative(group in 1.0f64..1e6, overall in 1.0f64..1e6) {
        let cmp = comparative_percentage(group, overall).unwrap();
        prop_assert!(cmp.percent >= 0.0);
        prop_assert!(!cmp.percent_label().starts_with('-'));

        let expected = if group < overall {
            PriceDirection::Cheaper
        } else {
            PriceDirection::MoreExpensive
        };
        prop_assert_eq!(cmp.direction, expected);
    }

    #[test]
    fn prop_correlation_text_has_two_decimals(r in -0.999f64..0.999) {
        let text = describe_correlation("duration", "price", r);
        let expected = format!("correlation coefficient of {:.2}", r);
        prop_assert!(text.contains(&expected));
        let relation = if r < 0.0 { "negative" } else { "positive" };
        let expected_suffix = format!("{} relation", relation);
        prop_assert!(text.ends_with(&expected_suffix));
    }

    #[test]
    fn prop_summary_pager_stays_in_range(moves in prop::collection::vec(any::<bool>(), 0..20)) {
        let records: Vec<Record> = Vec::new();
        let mut explorer = FlightExplorer::new(Dataset::new(records));
        for forward in moves {
            let page = if forward { explorer.next_page() } else { explorer.previous_page() };
            prop_assert!(page <= 2);
        }
    }
}

#[test]
fn correlation_bucket_boundaries() {
    assert!(describe_correlation("a", "b", 0.19).contains("very weak/negligible"));
    assert!(describe_correlation("a", "b", 0.2).contains("a weak positive"));
    assert!(describe_correlation("a", "b", -0.85).contains("very strong negative"));
    assert!(describe_correlation("a", "b", 1.0).contains("same attribute"));
}
