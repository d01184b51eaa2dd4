use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::domain::{Attribute, FieldValue};
use crate::error::{ExplorerError, ExplorerResult};
use crate::transformations::WorkingSubset;

/// Descriptive statistics for one numeric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute statistics for a set of values.
///
/// Returns `None` for an empty slice; a missing group is reported as absent
/// rather than as zeros.
pub fn compute_stats(values: &[f64]) -> Option<SummaryStats> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    Some(SummaryStats {
        count,
        mean,
        median,
        min: sorted[0],
        max: sorted[count - 1],
    })
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Pearson correlation coefficient of two equally long series.
///
/// Returns `None` when fewer than two pairs exist or either series is constant.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;

    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    Some((numerator / denominator).clamp(-1.0, 1.0))
}

/// Summary statistics of `value` for each distinct `group`, in first-seen order.
pub fn describe_by_group(
    subset: &WorkingSubset,
    group: Attribute,
    value: Attribute,
) -> ExplorerResult<IndexMap<FieldValue, SummaryStats>> {
    if !value.is_numeric() {
        return Err(ExplorerError::InvalidAttribute(format!(
            "{} is not numeric",
            value
        )));
    }

    let mut groups: IndexMap<FieldValue, Vec<f64>> = IndexMap::new();
    for record in subset.iter() {
        if let Some(v) = record.numeric(value) {
            groups.entry(record.value(group)).or_default().push(v);
        }
    }

    Ok(groups
        .into_iter()
        .filter_map(|(key, values)| compute_stats(&values).map(|stats| (key, stats)))
        .collect())
}

/// Mean ticket price for each distinct value of `group`, in first-seen order.
pub fn mean_price_by(subset: &WorkingSubset, group: Attribute) -> IndexMap<FieldValue, f64> {
    let mut sums: IndexMap<FieldValue, (f64, usize)> = IndexMap::new();
    for record in subset.iter() {
        let entry = sums.entry(record.value(group)).or_insert((0.0, 0));
        entry.0 += record.price;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

/// The entries with the lowest and highest value.
pub fn extremes<K: Clone>(values: &IndexMap<K, f64>) -> Option<((K, f64), (K, f64))> {
    let lowest = values
        .iter()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;
    let highest = values
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;
    Some((
        (lowest.0.clone(), *lowest.1),
        (highest.0.clone(), *highest.1),
    ))
}
