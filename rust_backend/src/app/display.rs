//! Terminal rendering of chart specifications.

use std::io::Write;

use crate::api::DisplayMode;
use crate::error::ExplorerResult;
use crate::services::{ExplorerState, Subscriber};

/// Prints the chart of one page as a JSON line.
///
/// Charts published for other pages are ignored.
pub struct TerminalCanvas<W: Write> {
    mode: DisplayMode,
    out: W,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(mode: DisplayMode, out: W) -> Self {
        Self { mode, out }
    }
}

impl<W: Write> Subscriber for TerminalCanvas<W> {
    fn update(&mut self, state: &ExplorerState) -> ExplorerResult<()> {
        if state.context.display_mode != self.mode {
            return Ok(());
        }
        let Some(chart) = &state.context.chart else {
            return Ok(());
        };
        writeln!(self.out, "[{} chart] {}", self.mode, chart.to_json()?)?;
        self.out.flush()?;
        Ok(())
    }
}

/// One candidate list as a single line.
pub fn format_candidates(label: &str, candidates: &[String]) -> String {
    if candidates.is_empty() {
        format!("{}: (none)", label)
    } else {
        format!("{}: {}", label, candidates.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnalysisContext, ChartKind, ChartSpec};
    use crate::fixtures::sample_dataset;
    use crate::transformations::QueryEngine;

    fn state(mode: DisplayMode) -> ExplorerState {
        ExplorerState {
            engine: QueryEngine::new(sample_dataset()),
            context: AnalysisContext {
                display_mode: mode,
                chart: Some(ChartSpec::new(ChartKind::Line, "Trend").with("x", "days_left")),
                ..AnalysisContext::default()
            },
        }
    }

    #[test]
    fn test_canvas_draws_only_its_page() {
        let mut canvas = TerminalCanvas::new(DisplayMode::Summary, Vec::<u8>::new());

        canvas.update(&state(DisplayMode::Planner)).unwrap();
        assert!(canvas.out.is_empty());

        canvas.update(&state(DisplayMode::Summary)).unwrap();
        let printed = String::from_utf8(canvas.out).unwrap();
        assert_eq!(
            printed,
            "[summary chart] {\"kind\":\"line\",\"arguments\":{\"x\":\"days_left\"},\"title\":\"Trend\"}\n"
        );
    }

    #[test]
    fn test_format_candidates() {
        let airports = vec!["Delhi".to_string(), "Mumbai".to_string()];
        assert_eq!(format_candidates("from", &airports), "from: Delhi, Mumbai");
        assert_eq!(format_candidates("flight", &[]), "flight: (none)");
    }
}
