//! The data holder behind every view.
//!
//! [`FlightExplorer`] owns the query engine, the current [`AnalysisContext`]
//! and its own subscribers. Each graph operation derives a subset, builds a
//! chart specification, notifies subscribers and returns the text for the
//! results pane.

use log::{debug, info};

use super::notify::{Subscriber, SubscriberId, SubscriberRegistry};
use crate::algorithms::analysis::{
    airline_statistics, correlation_description, departure_counts, flight_class_statistics,
    price_analysis, NO_STATISTICS,
};
use crate::algorithms::summary::{summary_text, SUMMARY_PAGE_COUNT};
use crate::api::{AnalysisContext, ChartKind, ChartSpec, ChartStyle, DisplayMode};
use crate::core::domain::{Attribute, TicketClass};
use crate::core::Dataset;
use crate::error::{ExplorerError, ExplorerResult};
use crate::transformations::{QueryEngine, RoutePair};

/// What subscribers read during a notification round.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    pub engine: QueryEngine,
    pub context: AnalysisContext,
}

/// Query engine, analysis context and subscribers of one session.
#[derive(Debug)]
pub struct FlightExplorer {
    state: ExplorerState,
    subscribers: SubscriberRegistry,
}

impl FlightExplorer {
    pub fn new(dataset: Dataset) -> Self {
        info!("Explorer ready with {} records", dataset.len());
        Self {
            state: ExplorerState {
                engine: QueryEngine::new(dataset),
                context: AnalysisContext::default(),
            },
            subscribers: SubscriberRegistry::new(),
        }
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.state.context
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.state.engine
    }

    // ==================== Subscribers ====================

    pub fn attach(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriberId {
        self.subscribers.attach(subscriber)
    }

    pub fn detach(&mut self, id: SubscriberId) -> Option<Box<dyn Subscriber>> {
        self.subscribers.detach(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn notify_all(&mut self) -> ExplorerResult<()> {
        self.subscribers.notify_all(&self.state)
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state.context.display_mode = mode;
    }

    fn publish(&mut self, mode: DisplayMode, chart: ChartSpec) -> ExplorerResult<()> {
        debug!("Publishing {:?} chart '{}' for {} mode", chart.kind, chart.title, mode);
        self.state.context.display_mode = mode;
        self.state.context.chart = Some(chart);
        self.notify_all()
    }

    // ==================== Candidates ====================

    pub fn airport_names(&self) -> Vec<String> {
        self.state.engine.airport_names()
    }

    pub fn destinations_from(&self, source: &str) -> Vec<String> {
        self.state.engine.destinations_from(source)
    }

    pub fn route_flight_codes(&self, source: &str, destination: &str) -> Vec<String> {
        self.state.engine.route_flight_codes(source, destination)
    }

    pub fn ticket_classes(&self) -> Vec<String> {
        self.state.engine.ticket_classes()
    }

    /// Reject airports that are not offered as candidates.
    pub fn validate_pair(&self, source: &str, destination: &str) -> ExplorerResult<()> {
        if !self.airport_names().iter().any(|a| a == source) {
            return Err(ExplorerError::invalid_selection("source", source));
        }
        if !self.destinations_from(source).iter().any(|d| d == destination) {
            return Err(ExplorerError::invalid_selection("destination", destination));
        }
        Ok(())
    }

    // ==================== Flight search ====================

    /// Select a pair and redraw its price distribution.
    pub fn select_pair(&mut self, source: &str, destination: &str) -> ExplorerResult<()> {
        self.validate_pair(source, destination)?;
        self.state.engine.filter_by_pair(source, destination);
        self.state.context.pair = Some(RoutePair::new(source, destination));
        self.price_graph()
    }

    /// Price histogram of the current subset split by class.
    pub fn price_graph(&mut self) -> ExplorerResult<()> {
        let title = match &self.state.context.pair {
            Some(pair) => format!("Price distribution of flights from {}", pair),
            None => "Price distribution of flights".to_string(),
        };
        let chart = ChartSpec::new(ChartKind::Histogram, title)
            .with("x", Attribute::Price)
            .with("hue", Attribute::Class)
            .with("log_scale", true);
        self.publish(DisplayMode::FlightSearch, chart)
    }

    /// Price report of one flight against the selected pair.
    pub fn generate_price_analysis(&mut self, flight_code: &str) -> String {
        // Planner views may have replaced the subset since the pair was chosen.
        if let Some(pair) = self.state.context.pair.clone() {
            self.state
                .engine
                .filter_by_pair(&pair.source, &pair.destination);
        }
        price_analysis(&self.state.engine, flight_code)
    }

    // ==================== Planner views ====================

    /// Departure and arrival times of flights on a pair.
    pub fn availability_graph(&mut self, source: &str, destination: &str) -> ExplorerResult<String> {
        self.validate_pair(source, destination)?;
        let pair = RoutePair::new(source, destination);
        self.state.engine.filter_by_pair(source, destination);

        let chart = ChartSpec::new(
            ChartKind::Count,
            format!("Flight availability from {}", pair),
        )
        .with("x", Attribute::DepartureTime)
        .with("hue", Attribute::ArrivalTime);
        self.state.context.pair = Some(pair);
        self.publish(DisplayMode::Planner, chart)?;

        Ok(departure_counts(self.state.engine.current()))
    }

    /// Price against days booked in advance for one flight of a pair.
    pub fn day_plot(
        &mut self,
        source: &str,
        destination: &str,
        flight_code: &str,
    ) -> ExplorerResult<String> {
        self.validate_pair(source, destination)?;
        if !self
            .route_flight_codes(source, destination)
            .iter()
            .any(|code| code == flight_code)
        {
            return Err(ExplorerError::NotFound(format!(
                "flight {} from {} to {}",
                flight_code, source, destination
            )));
        }

        let pair = RoutePair::new(source, destination);
        self.state.engine.filter_by_pair(source, destination);
        self.state.engine.filter_by_flight_code(flight_code)?;

        let chart = ChartSpec::new(
            ChartKind::Scatter,
            format!("Price by days booked in advance for flight {}", flight_code),
        )
        .with("x", Attribute::DaysLeft)
        .with("y", Attribute::Price)
        .with("hue", Attribute::Class);
        self.state.context.pair = Some(pair);
        self.publish(DisplayMode::Planner, chart)?;

        let engine = &self.state.engine;
        Ok(flight_class_statistics(
            engine.economy(),
            engine.business(),
            flight_code,
        ))
    }

    /// Value counts of one countable attribute over the whole dataset.
    pub fn frequency_plot(&mut self, attribute: Attribute, style: ChartStyle) -> ExplorerResult<String> {
        if !attribute.is_countable() {
            return Err(ExplorerError::invalid_selection(
                "attribute",
                attribute.column_name(),
            ));
        }
        self.state.engine.reset();

        let title = format!("Frequency of {}", attribute);
        // Continuous attributes are binned whatever the style.
        let chart = match style {
            _ if attribute.is_continuous() => ChartSpec::new(ChartKind::Histogram, title)
                .with("x", attribute)
                .with("binwidth", 2.0),
            ChartStyle::Pie => {
                let counts = self.state.engine.current().value_counts(attribute);
                let labels: Vec<String> = counts.keys().map(|k| k.to_string()).collect();
                let values: Vec<f64> = counts.values().map(|&v| v as f64).collect();
                ChartSpec::new(ChartKind::Pie, title)
                    .with("labels", labels)
                    .with("values", values)
            }
            ChartStyle::Bar => ChartSpec::new(ChartKind::Count, title).with("x", attribute),
        };
        self.publish(DisplayMode::Planner, chart)?;

        Ok(NO_STATISTICS.to_string())
    }

    /// Price spread per airline within one ticket class.
    pub fn airline_graph(&mut self, class: TicketClass) -> ExplorerResult<String> {
        self.state.engine.filter_by_class(class);

        let chart = ChartSpec::new(
            ChartKind::Box,
            format!("{} class prices by airline", class),
        )
        .with("x", Attribute::Airline)
        .with("y", Attribute::Price)
        .with("showfliers", false);
        self.publish(DisplayMode::Planner, chart)?;

        airline_statistics(self.state.engine.dataset(), class)
    }

    /// Scatter of two numeric attributes over the whole dataset.
    pub fn correlation_graph(&mut self, x: Attribute, y: Attribute) -> ExplorerResult<String> {
        for attribute in [x, y] {
            if !attribute.is_numeric() {
                return Err(ExplorerError::invalid_selection(
                    "attribute",
                    attribute.column_name(),
                ));
            }
        }
        self.state.engine.reset();
        let description = correlation_description(self.state.engine.current(), x, y)?;

        let chart = ChartSpec::new(ChartKind::Scatter, format!("{} against {}", y, x))
            .with("x", x)
            .with("y", y);
        self.state.context.correlation = Some((x, y));
        self.publish(DisplayMode::Planner, chart)?;

        Ok(description)
    }

    // ==================== Data summary ====================

    pub fn summary_page(&self) -> usize {
        self.state.context.summary_page
    }

    pub fn next_page(&mut self) -> usize {
        let page = &mut self.state.context.summary_page;
        *page = (*page + 1).min(SUMMARY_PAGE_COUNT - 1);
        *page
    }

    pub fn previous_page(&mut self) -> usize {
        let page = &mut self.state.context.summary_page;
        *page = page.saturating_sub(1);
        *page
    }

    pub fn summary_text(&self) -> String {
        summary_text(self.state.engine.dataset(), self.summary_page())
    }

    /// Draw the chart of a summary page without moving the pager.
    ///
    /// `None` or an out-of-range page draws the current page.
    pub fn show_summary_graph(&mut self, page: Option<usize>) -> ExplorerResult<()> {
        let saved = self.state.context.summary_page;
        if let Some(page) = page.filter(|&p| p < SUMMARY_PAGE_COUNT) {
            self.state.context.summary_page = page;
        }
        let chart = summary_chart(self.state.context.summary_page);
        let result = self.publish(DisplayMode::Summary, chart);
        self.state.context.summary_page = saved;
        result
    }
}

impl Drop for FlightExplorer {
    fn drop(&mut self) {
        debug!("Releasing {} subscriber(s)", self.subscribers.len());
        self.subscribers.clear();
    }
}

fn summary_chart(page: usize) -> ChartSpec {
    match page {
        0 => ChartSpec::new(ChartKind::Box, "Price by airline and number of stops")
            .with("x", Attribute::Airline)
            .with("y", Attribute::Price)
            .with("hue", Attribute::Stops)
            .with("showfliers", false),
        1 => ChartSpec::new(ChartKind::Line, "Price by days left before departure")
            .with("x", Attribute::DaysLeft)
            .with("y", Attribute::Price),
        _ => ChartSpec::new(ChartKind::Bar, "Price by time of day")
            .with("x", Attribute::DepartureTime)
            .with("y", Attribute::Price)
            .with("hue", Attribute::ArrivalTime),
    }
}
