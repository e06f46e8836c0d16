//! Constant-trend extrapolation of a historical series.
//!
//! The trend is the mean of successive first differences. Appending a point
//! at `last + mean_delta` leaves that mean unchanged, so projecting five
//! points in one call and projecting one point five times produce the same
//! values.

use crate::error::{Error, Result};
use crate::models::{Observation, Series};

/// Upper bound on projected points per chart session.
pub const MAX_PROJECTED_POINTS: usize = 5;

/// Mean of successive differences: `sum(v[i] - v[i-1]) / (n - 1)`.
pub fn mean_delta(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(Error::InsufficientData { got: values.len() });
    }
    let delta_sum: f64 = values.windows(2).map(|w| w[1] - w[0]).sum();
    Ok(delta_sum / (values.len() - 1) as f64)
}

/// Compute the projected extension of `history`: up to `count` new points,
/// each one `mean_delta` above the previous value, one year apart.
///
/// `count == 0` yields an empty extension. `count > max` is a cap error and
/// produces nothing. The input is never modified; identical input always
/// yields identical output.
pub fn extend(history: &[Observation], count: usize, max: usize) -> Result<Vec<Observation>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if count > max {
        return Err(Error::ProjectionCapExceeded { max });
    }
    let values: Vec<f64> = history.iter().map(|p| p.value).collect();
    let delta = mean_delta(&values)?;

    // mean_delta guarantees at least two points from here on.
    let last = history[history.len() - 1];
    let mut year = last.year;
    let mut value = last.value;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        year += 1;
        value += delta;
        out.push(Observation { year, value });
    }
    Ok(out)
}

/// One chart's fetched history plus its projected tail.
///
/// Replaces the original dashboard's page-global chart state: the session is
/// created from a fetched [`Series`] and owns the per-session projection cap.
#[derive(Debug, Clone)]
pub struct ChartSession {
    history: Series,
    projected: Vec<Observation>,
}

impl ChartSession {
    pub fn new(history: Series) -> Self {
        Self {
            history,
            projected: Vec::new(),
        }
    }

    pub fn history(&self) -> &Series {
        &self.history
    }

    pub fn projected(&self) -> &[Observation] {
        &self.projected
    }

    /// Projected points still allowed before the cap.
    pub fn remaining_capacity(&self) -> usize {
        MAX_PROJECTED_POINTS - self.projected.len()
    }

    /// History followed by the projected tail.
    pub fn combined(&self) -> Vec<Observation> {
        let mut out = self.history.points.clone();
        out.extend_from_slice(&self.projected);
        out
    }

    /// Append `count` more projected points.
    ///
    /// A request beyond the remaining capacity is rejected whole: the
    /// session is left untouched and the caller gets the cap error.
    pub fn project_more(&mut self, count: usize) -> Result<&[Observation]> {
        if count > self.remaining_capacity() {
            return Err(Error::ProjectionCapExceeded {
                max: MAX_PROJECTED_POINTS,
            });
        }
        let ext = extend(&self.combined(), count, MAX_PROJECTED_POINTS)?;
        self.projected.extend(ext);
        Ok(&self.projected)
    }

    /// Append a single projected point, as the dashboard's "add data" action
    /// did per click.
    pub fn project_next(&mut self) -> Result<Observation> {
        self.project_more(1)?;
        Ok(*self.projected.last().expect("just appended"))
    }
}
