#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::algorithms::analysis::{FLIGHT_NOT_FOUND, NO_STATISTICS};
    use crate::api::{ChartArg, ChartKind, ChartSpec, ChartStyle, DisplayMode};
    use crate::core::domain::{Attribute, TicketClass};
    use crate::error::{ExplorerError, ExplorerResult};
    use crate::fixtures::sample_dataset;
    use crate::services::explorer::{ExplorerState, FlightExplorer};
    use crate::services::notify::Subscriber;

    type Drawn = Rc<RefCell<Vec<ChartSpec>>>;

    /// Keeps every chart drawn for its display mode.
    struct Canvas {
        mode: DisplayMode,
        drawn: Drawn,
    }

    impl Subscriber for Canvas {
        fn update(&mut self, state: &ExplorerState) -> ExplorerResult<()> {
            if state.context.display_mode != self.mode {
                return Ok(());
            }
            if let Some(chart) = &state.context.chart {
                self.drawn.borrow_mut().push(chart.clone());
            }
            Ok(())
        }
    }

    fn explorer_with_canvas(mode: DisplayMode) -> (FlightExplorer, Drawn) {
        let drawn: Drawn = Rc::new(RefCell::new(Vec::new()));
        let mut explorer = FlightExplorer::new(sample_dataset());
        explorer.attach(Box::new(Canvas {
            mode,
            drawn: Rc::clone(&drawn),
        }));
        (explorer, drawn)
    }

    fn text_arg<'a>(chart: &'a ChartSpec, name: &str) -> Option<&'a str> {
        chart.argument(name).and_then(ChartArg::as_text)
    }

    #[test]
    fn test_select_pair_draws_price_distribution() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::FlightSearch);
        explorer.select_pair("Delhi", "Mumbai").unwrap();

        let drawn = drawn.borrow();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].kind, ChartKind::Histogram);
        assert_eq!(drawn[0].title, "Price distribution of flights from Delhi to Mumbai");
        assert_eq!(text_arg(&drawn[0], "hue"), Some("class"));
        assert_eq!(drawn[0].argument("log_scale"), Some(&ChartArg::Flag(true)));
        assert_eq!(explorer.engine().current().len(), 5);
    }

    #[test]
    fn test_invalid_airport_leaves_context_untouched() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::FlightSearch);
        let before = explorer.context().clone();

        let err = explorer.select_pair("Atlantis", "Mumbai").unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidSelection { ref field, .. } if field == "source"));

        let err = explorer.availability_graph("Mumbai", "Kolkata").unwrap_err();
        assert!(
            matches!(err, ExplorerError::InvalidSelection { ref field, .. } if field == "destination")
        );

        assert_eq!(explorer.context(), &before);
        assert!(drawn.borrow().is_empty());
    }

    #[test]
    fn test_planner_graph_only_redraws_planner_subscribers() {
        let (mut explorer, search) = explorer_with_canvas(DisplayMode::FlightSearch);
        let planner: Drawn = Rc::new(RefCell::new(Vec::new()));
        explorer.attach(Box::new(Canvas {
            mode: DisplayMode::Planner,
            drawn: Rc::clone(&planner),
        }));

        let text = explorer.availability_graph("Delhi", "Mumbai").unwrap();

        assert!(search.borrow().is_empty());
        assert_eq!(planner.borrow().len(), 1);
        assert_eq!(explorer.context().display_mode, DisplayMode::Planner);

        let chart = &planner.borrow()[0];
        assert_eq!(chart.kind, ChartKind::Count);
        assert_eq!(chart.title, "Flight availability from Delhi to Mumbai");
        assert_eq!(text_arg(chart, "x"), Some("departure_time"));
        assert_eq!(text_arg(chart, "hue"), Some("arrival_time"));

        let rows: Vec<Vec<&str>> = text
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["Early_Morning", "1"],
                vec!["Evening", "1"],
                vec!["Morning", "2"],
                vec!["Night", "1"],
            ]
        );
    }

    #[test]
    fn test_day_plot_reports_class_statistics() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::Planner);
        let text = explorer.day_plot("Delhi", "Mumbai", "UK-995").unwrap();

        assert!(text.contains("Economy class price statistics:\nMean: 6000.00 rupees"));
        assert!(text.contains("Business class price statistics:\nMean: 12000.00 rupees"));

        let chart = &drawn.borrow()[0];
        assert_eq!(chart.kind, ChartKind::Scatter);
        assert_eq!(text_arg(chart, "x"), Some("days_left"));
        assert_eq!(text_arg(chart, "y"), Some("price"));
    }

    #[test]
    fn test_day_plot_unknown_flight_is_not_found() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::Planner);
        let err = explorer.day_plot("Delhi", "Mumbai", "SG-8709").unwrap_err();

        assert!(matches!(err, ExplorerError::NotFound(_)));
        assert!(drawn.borrow().is_empty());
        assert!(explorer.context().chart.is_none());
    }

    #[test]
    fn test_frequency_plot_styles() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::Planner);

        let text = explorer.frequency_plot(Attribute::Duration, ChartStyle::Bar).unwrap();
        assert_eq!(text, NO_STATISTICS);
        explorer.frequency_plot(Attribute::Airline, ChartStyle::Bar).unwrap();
        explorer.frequency_plot(Attribute::Class, ChartStyle::Pie).unwrap();

        let drawn = drawn.borrow();
        assert_eq!(drawn[0].kind, ChartKind::Histogram);
        assert_eq!(drawn[0].argument("binwidth"), Some(&ChartArg::Number(2.0)));
        assert_eq!(drawn[1].kind, ChartKind::Count);
        assert_eq!(text_arg(&drawn[1], "x"), Some("airline"));
        assert_eq!(drawn[2].kind, ChartKind::Pie);
        assert_eq!(
            drawn[2].argument("labels"),
            Some(&ChartArg::Labels(vec![
                "Economy".to_string(),
                "Business".to_string()
            ]))
        );
        assert_eq!(drawn[2].argument("values"), Some(&ChartArg::Numbers(vec![5.0, 3.0])));
        assert_eq!(explorer.engine().current().len(), 8);
    }

    #[test]
    fn test_frequency_pie_of_continuous_attribute_is_binned() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::Planner);

        explorer.frequency_plot(Attribute::Duration, ChartStyle::Pie).unwrap();
        explorer.frequency_plot(Attribute::DaysLeft, ChartStyle::Pie).unwrap();

        let drawn = drawn.borrow();
        for chart in drawn.iter() {
            assert_eq!(chart.kind, ChartKind::Histogram);
            assert_eq!(chart.argument("binwidth"), Some(&ChartArg::Number(2.0)));
            assert!(chart.argument("labels").is_none());
        }
        assert_eq!(text_arg(&drawn[1], "x"), Some("days_left"));
    }

    #[test]
    fn test_frequency_plot_rejects_uncountable_attribute() {
        let mut explorer = FlightExplorer::new(sample_dataset());
        let err = explorer
            .frequency_plot(Attribute::Price, ChartStyle::Bar)
            .unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidSelection { .. }));
    }

    #[test]
    fn test_airline_graph() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::Planner);
        let text = explorer.airline_graph(TicketClass::Business).unwrap();

        assert!(text.starts_with("Business class price statistics:"));
        assert!(text.contains("*Price statistics for Vistara*\nMean: 15666.67 rupees"));
        assert!(!text.contains("AirAsia"));

        let chart = &drawn.borrow()[0];
        assert_eq!(chart.kind, ChartKind::Box);
        assert_eq!(chart.argument("showfliers"), Some(&ChartArg::Flag(false)));
        assert_eq!(explorer.engine().current().len(), 3);
    }

    #[test]
    fn test_correlation_graph() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::Planner);

        let text = explorer
            .correlation_graph(Attribute::Price, Attribute::Price)
            .unwrap();
        assert!(text.contains("same attribute"));
        assert_eq!(
            explorer.context().correlation,
            Some((Attribute::Price, Attribute::Price))
        );

        let err = explorer
            .correlation_graph(Attribute::Airline, Attribute::Price)
            .unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidSelection { .. }));
        assert_eq!(drawn.borrow().len(), 1);
    }

    #[test]
    fn test_summary_pager_saturates() {
        let mut explorer = FlightExplorer::new(sample_dataset());
        assert_eq!(explorer.previous_page(), 0);
        assert_eq!(explorer.next_page(), 1);
        assert_eq!(explorer.next_page(), 2);
        assert_eq!(explorer.next_page(), 2);
        assert!(explorer.summary_text().contains("time interval"));
        assert_eq!(explorer.previous_page(), 1);
    }

    #[test]
    fn test_show_summary_graph_restores_page() {
        let (mut explorer, drawn) = explorer_with_canvas(DisplayMode::Summary);
        explorer.next_page();

        explorer.show_summary_graph(Some(2)).unwrap();
        explorer.show_summary_graph(Some(7)).unwrap();
        explorer.show_summary_graph(None).unwrap();

        assert_eq!(explorer.summary_page(), 1);
        let kinds: Vec<ChartKind> = drawn.borrow().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChartKind::Bar, ChartKind::Line, ChartKind::Line]);
        assert_eq!(explorer.context().display_mode, DisplayMode::Summary);
    }

    #[test]
    fn test_price_analysis_uses_selected_pair() {
        let mut explorer = FlightExplorer::new(sample_dataset());
        explorer.select_pair("Delhi", "Mumbai").unwrap();
        explorer
            .frequency_plot(Attribute::Airline, ChartStyle::Bar)
            .unwrap();

        let report = explorer.generate_price_analysis("UK-995");
        assert!(report.contains("is 4000.00 rupees"));
        assert!(report.contains("Flight UK-995 is 2000.00 rupees more expensive"));
        assert_eq!(explorer.generate_price_analysis("XX-000"), FLIGHT_NOT_FOUND);
    }
}
