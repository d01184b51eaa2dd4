#[cfg(test)]
mod tests {
    use crate::core::domain::TicketClass;
    use crate::error::ExplorerError;
    use crate::parsing::csv_parser::{
        dataframe_to_records, parse_flights_csv, parse_flights_csv_str,
        parse_flights_csv_to_records,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "airline,flight,source_city,departure_time,stops,arrival_time,destination_city,class,duration,days_left,price";

    /// Helper to create a temp CSV file
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_parse_flights_csv_basic() {
        let csv_content = format!(
            "{}\nVistara,UK-995,Delhi,Morning,zero,Afternoon,Mumbai,Economy,2.25,10,5000\nVistara,UK-995,Delhi,Morning,zero,Afternoon,Mumbai,Business,2.25,10,9000\n",
            HEADER
        );

        let temp_file = create_temp_csv(&csv_content);
        let result = parse_flights_csv(temp_file.path(), b',');

        assert!(result.is_ok(), "Should parse basic CSV: {:?}", result.err());
        let df = result.unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_parse_records_with_word_stops() {
        let csv_content = format!(
            "{}\nAirAsia,I5-747,Delhi,Evening,one,Night,Mumbai,Economy,12.5,3,4120\nIndigo,6E-2046,Delhi,Night,two_or_more,Morning,Kolkata,Economy,9.0,40,3100\n",
            HEADER
        );

        let temp_file = create_temp_csv(&csv_content);
        let records = parse_flights_csv_to_records(temp_file.path(), b',').unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stops, 1);
        assert_eq!(records[1].stops, 2);
        assert_eq!(records[0].price, 4120.0);
        assert_eq!(records[1].days_left, 40);
        assert_eq!(records[1].destination_city, "Kolkata");
    }

    #[test]
    fn test_parse_records_with_numeric_stops() {
        let csv_content = format!(
            "{}\nSpiceJet,SG-8709,Delhi,Evening,0,Night,Mumbai,Economy,2.17,1,5953\n",
            HEADER
        );

        let df = parse_flights_csv_str(&csv_content, b',').unwrap();
        let records = dataframe_to_records(&df).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stops, 0);
        assert_eq!(records[0].class, TicketClass::Economy);
        assert_eq!(records[0].flight, "SG-8709");
        assert!((records[0].duration - 2.17).abs() < 1e-9);
    }

    #[test]
    fn test_parse_semicolon_separator() {
        let csv_content = format!(
            "{}\nVistara;UK-995;Delhi;Morning;0;Afternoon;Mumbai;Business;2.25;10;9000\n",
            HEADER.replace(',', ";")
        );

        let df = parse_flights_csv_str(&csv_content, b';').unwrap();
        let records = dataframe_to_records(&df).unwrap();
        assert_eq!(records[0].class, TicketClass::Business);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let csv_content = "airline,flight,source_city,destination_city,class,price\nVistara,UK-995,Delhi,Mumbai,Economy,5000\n";

        let temp_file = create_temp_csv(csv_content);
        let err = parse_flights_csv(temp_file.path(), b',').unwrap_err();

        match err {
            ExplorerError::SchemaError(message) => {
                assert!(message.contains("departure_time"), "{}", message);
                assert!(message.contains("days_left"), "{}", message);
            }
            other => panic!("Expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_class_is_schema_error() {
        let csv_content = format!(
            "{}\nVistara,UK-995,Delhi,Morning,0,Afternoon,Mumbai,First,2.25,10,25000\n",
            HEADER
        );

        let temp_file = create_temp_csv(&csv_content);
        let err = parse_flights_csv_to_records(temp_file.path(), b',').unwrap_err();
        assert!(matches!(err, ExplorerError::SchemaError(ref m) if m.contains("First")));
    }

    #[test]
    fn test_missing_price_is_schema_error() {
        let csv_content = format!(
            "{}\nVistara,UK-995,Delhi,Morning,0,Afternoon,Mumbai,Economy,2.25,10,\n",
            HEADER
        );

        let temp_file = create_temp_csv(&csv_content);
        let err = parse_flights_csv_to_records(temp_file.path(), b',').unwrap_err();
        assert!(matches!(err, ExplorerError::SchemaError(ref m) if m.contains("price")));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = parse_flights_csv(std::path::Path::new("/nonexistent/flights.csv"), b',');
        assert!(result.is_err());
    }
}
