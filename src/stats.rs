use crate::models::Series;
use crate::project;
use serde::{Deserialize, Serialize};

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub area_name: String,
    pub metric_label: String,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Mean of successive first differences, the same trend the projection
    /// uses. `None` for series shorter than two points.
    pub mean_annual_change: Option<f64>,
}

/// Compute summary statistics over a series' values.
pub fn summarize(series: &Series) -> Summary {
    let mut vals = series.values();
    vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let count = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = if count > 0 {
        Some(vals.iter().copied().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    let mean_annual_change = project::mean_delta(&series.values()).ok();

    Summary {
        area_name: series.area_name.clone(),
        metric_label: series.metric_label.clone(),
        count,
        min,
        max,
        mean,
        median,
        mean_annual_change,
    }
}
