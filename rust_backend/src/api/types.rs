//! Data handed from the explorer to display subscribers.
//!
//! A subscriber receives the whole [`AnalysisContext`] on every notification
//! round and decides from [`AnalysisContext::display_mode`] whether to redraw.
//! Charts are described, not rendered: a [`ChartSpec`] names the plot kind,
//! its arguments in insertion order, and a title.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::Attribute;
use crate::error::{ExplorerError, ExplorerResult};
use crate::transformations::RoutePair;

// =========================================================
// Display modes
// =========================================================

/// The page a subscriber draws for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    FlightSearch = 1,
    Planner = 2,
    Summary = 3,
}

impl DisplayMode {
    pub fn id(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayMode::FlightSearch => "flight search",
            DisplayMode::Planner => "planner",
            DisplayMode::Summary => "summary",
        };
        f.write_str(name)
    }
}

// =========================================================
// Chart specifications
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Histogram,
    Count,
    Scatter,
    Box,
    Pie,
    Bar,
    Line,
}

/// A single chart argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartArg {
    Flag(bool),
    Number(f64),
    Text(String),
    Labels(Vec<String>),
    Numbers(Vec<f64>),
}

impl ChartArg {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ChartArg::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for ChartArg {
    fn from(value: &str) -> Self {
        ChartArg::Text(value.to_string())
    }
}

impl From<String> for ChartArg {
    fn from(value: String) -> Self {
        ChartArg::Text(value)
    }
}

impl From<Attribute> for ChartArg {
    fn from(value: Attribute) -> Self {
        ChartArg::Text(value.column_name().to_string())
    }
}

impl From<f64> for ChartArg {
    fn from(value: f64) -> Self {
        ChartArg::Number(value)
    }
}

impl From<bool> for ChartArg {
    fn from(value: bool) -> Self {
        ChartArg::Flag(value)
    }
}

impl From<Vec<String>> for ChartArg {
    fn from(value: Vec<String>) -> Self {
        ChartArg::Labels(value)
    }
}

impl From<Vec<f64>> for ChartArg {
    fn from(value: Vec<f64>) -> Self {
        ChartArg::Numbers(value)
    }
}

/// How the frequency view draws value counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartStyle {
    #[default]
    Bar,
    Pie,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 2] = [ChartStyle::Bar, ChartStyle::Pie];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartStyle::Bar => "Bar",
            ChartStyle::Pie => "Pie",
        }
    }
}

impl FromStr for ChartStyle {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExplorerError::invalid_selection("chart style", s))
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plot kind, ordered arguments and title handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub arguments: IndexMap<String, ChartArg>,
    pub title: String,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            arguments: IndexMap::new(),
            title: title.into(),
        }
    }

    /// Add an argument, replacing any previous value under the same name.
    pub fn with(mut self, name: &str, value: impl Into<ChartArg>) -> Self {
        self.arguments.insert(name.to_string(), value.into());
        self
    }

    pub fn argument(&self, name: &str) -> Option<&ChartArg> {
        self.arguments.get(name)
    }

    pub fn to_json(&self) -> ExplorerResult<String> {
        serde_json::to_string(self).map_err(|e| ExplorerError::RenderError(e.to_string()))
    }
}

// =========================================================
// Analysis context
// =========================================================

/// Everything a subscriber needs to redraw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub display_mode: DisplayMode,
    pub chart: Option<ChartSpec>,
    pub pair: Option<RoutePair>,
    pub correlation: Option<(Attribute, Attribute)>,
    pub summary_page: usize,
}
