use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

use crate::core::domain::{Attribute, Record, TicketClass};
use crate::error::{ExplorerError, ExplorerResult};

const TEXT_COLUMNS: [Attribute; 7] = [
    Attribute::SourceCity,
    Attribute::DestinationCity,
    Attribute::Airline,
    Attribute::Flight,
    Attribute::Class,
    Attribute::DepartureTime,
    Attribute::ArrivalTime,
];

/// Parse a delimited flights file into a Polars DataFrame.
///
/// The header row must contain every column in [`Attribute::ALL`]; extra
/// columns (such as an unnamed index) are kept but ignored downstream.
pub fn parse_flights_csv(csv_path: &Path, separator: u8) -> ExplorerResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()?;

    normalize_columns(df)
}

/// Parse delimited flights data held in memory.
pub fn parse_flights_csv_str(content: &str, separator: u8) -> ExplorerResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(content.as_bytes().to_vec()))
        .finish()?;

    normalize_columns(df)
}

/// Parse a flights file and convert it to [`Record`]s.
pub fn parse_flights_csv_to_records(csv_path: &Path, separator: u8) -> ExplorerResult<Vec<Record>> {
    let df = parse_flights_csv(csv_path, separator)?;
    dataframe_to_records(&df)
}

/// Check that every required column is present.
pub fn validate_schema(df: &DataFrame) -> ExplorerResult<()> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<&str> = Attribute::ALL
        .iter()
        .map(|a| a.column_name())
        .filter(|name| !column_names.iter().any(|c| c == name))
        .collect();

    if !missing.is_empty() {
        return Err(ExplorerError::SchemaError(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}

/// Validate the schema and cast columns whose type may have been inferred incorrectly.
fn normalize_columns(df: DataFrame) -> ExplorerResult<DataFrame> {
    validate_schema(&df)?;

    // Flight codes or city names may be inferred as numbers on tiny files
    let mut exprs: Vec<Expr> = TEXT_COLUMNS
        .iter()
        .map(|a| col(a.column_name()).cast(DataType::String))
        .collect();

    // Prices are often integral in the source file
    exprs.push(col(Attribute::Duration.column_name()).cast(DataType::Float64));
    exprs.push(col(Attribute::Price.column_name()).cast(DataType::Float64));
    exprs.push(col(Attribute::DaysLeft.column_name()).cast(DataType::Int64));

    let df = df.lazy().with_columns(exprs).collect()?;
    Ok(df)
}

/// Convert a normalized DataFrame to [`Record`] structures.
pub fn dataframe_to_records(df: &DataFrame) -> ExplorerResult<Vec<Record>> {
    let height = df.height();
    let mut records = Vec::with_capacity(height);

    let sources = df.column(Attribute::SourceCity.column_name())?.str()?;
    let destinations = df.column(Attribute::DestinationCity.column_name())?.str()?;
    let airlines = df.column(Attribute::Airline.column_name())?.str()?;
    let flights = df.column(Attribute::Flight.column_name())?.str()?;
    let classes = df.column(Attribute::Class.column_name())?.str()?;
    let departures = df.column(Attribute::DepartureTime.column_name())?.str()?;
    let arrivals = df.column(Attribute::ArrivalTime.column_name())?.str()?;
    let durations = df.column(Attribute::Duration.column_name())?.f64()?;
    let days_left = df.column(Attribute::DaysLeft.column_name())?.i64()?;
    let prices = df.column(Attribute::Price.column_name())?.f64()?;
    let stops = stop_counts(df.column(Attribute::Stops.column_name())?)?;

    for i in 0..height {
        let class_label = text_at(classes, i, Attribute::Class)?;
        let class = class_label.parse::<TicketClass>().map_err(|_| {
            ExplorerError::SchemaError(format!("Unknown class '{}' at row {}", class_label, i))
        })?;

        let record = Record {
            source_city: text_at(sources, i, Attribute::SourceCity)?,
            destination_city: text_at(destinations, i, Attribute::DestinationCity)?,
            airline: text_at(airlines, i, Attribute::Airline)?,
            flight: text_at(flights, i, Attribute::Flight)?,
            class,
            stops: stops
                .get(i)
                .copied()
                .flatten()
                .ok_or_else(|| missing_value(Attribute::Stops, i))?,
            departure_time: text_at(departures, i, Attribute::DepartureTime)?,
            arrival_time: text_at(arrivals, i, Attribute::ArrivalTime)?,
            duration: durations
                .get(i)
                .ok_or_else(|| missing_value(Attribute::Duration, i))?,
            days_left: days_left
                .get(i)
                .ok_or_else(|| missing_value(Attribute::DaysLeft, i))?,
            price: prices
                .get(i)
                .ok_or_else(|| missing_value(Attribute::Price, i))?,
        };

        records.push(record);
    }

    Ok(records)
}

/// Stop counts may be stored as integers or as labels such as `two_or_more`.
fn stop_counts(column: &Column) -> ExplorerResult<Vec<Option<i64>>> {
    match column.dtype() {
        DataType::String => Ok(column
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_stop_label))
            .collect()),
        _ => {
            let casted = column.cast(&DataType::Int64)?;
            Ok(casted.i64()?.into_iter().collect())
        }
    }
}

/// Parse a stop count written either as a number or as a word label.
pub fn parse_stop_label(label: &str) -> Option<i64> {
    match label.trim().to_lowercase().as_str() {
        "zero" | "non-stop" => Some(0),
        "one" => Some(1),
        "two_or_more" | "two" => Some(2),
        other => other.parse::<i64>().ok(),
    }
}

fn text_at(values: &StringChunked, row: usize, attribute: Attribute) -> ExplorerResult<String> {
    values
        .get(row)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| missing_value(attribute, row))
}

fn missing_value(attribute: Attribute, row: usize) -> ExplorerError {
    ExplorerError::SchemaError(format!("Missing {} at row {}", attribute, row))
}
