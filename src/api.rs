//! Synchronous client for the **StatFin PxWeb API**.
//!
//! This module talks to a single table endpoint
//! (`StatFin/synt/statfin_synt_pxt_12dy.px`): a plain GET returns the table
//! metadata (area codes and names), a POST with a three-selector query body
//! returns the flat json-stat value sequence.
//!
//! ### Notes
//! - No retries: a failed request is terminal for the triggering action and
//!   must be re-issued by the user.
//! - Timeouts use a sane default (30s total, 10s connect); expiry surfaces
//!   as a network error like any other transport failure.
//!
//! Typical usage:
//! ```no_run
//! # use statfin_rs::Client;
//! let client = Client::default();
//! let series = client.fetch_population("SSS", "whole country")?;
//! # Ok::<(), statfin_rs::Error>(())
//! ```

use crate::areas::Area;
use crate::error::{Error, Result};
use crate::models::{JsonStat, Metric, Observation, PxQuery, START_YEAR, Series, TableMeta, year_labels};
use log::debug;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Population, births and deaths by municipality, 2000-2021 (English UI).
pub const STATFIN_TABLE_URL: &str =
    "https://statfin.stat.fi/PxWeb/api/v1/en/StatFin/synt/statfin_synt_pxt_12dy.px";

#[derive(Debug, Clone)]
pub struct Client {
    pub table_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("statfin_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            table_url: STATFIN_TABLE_URL.into(),
            http,
        }
    }
}

impl Client {
    /// Fetch the area dimension of the table: `(code, name)` pairs in the
    /// order the API lists them.
    ///
    /// ### Errors
    /// - Network/HTTP error
    /// - Malformed metadata body (no `Alue` variable, misaligned code/name
    ///   lists)
    pub fn fetch_area_directory(&self) -> Result<Vec<Area>> {
        debug!("GET {}", self.table_url);
        let resp = self.http.get(&self.table_url).send()?;
        if !resp.status().is_success() {
            return Err(Error::Http {
                status: resp.status(),
            });
        }
        let v: serde_json::Value = resp.json()?;
        let meta: TableMeta =
            serde_json::from_value(v).map_err(|e| Error::Parse(format!("table metadata: {e}")))?;

        let var = meta
            .variables
            .iter()
            .find(|v| v.code == "Alue")
            .ok_or_else(|| Error::Parse("table metadata has no Alue variable".into()))?;
        if var.values.len() != var.value_texts.len() {
            return Err(Error::Parse(format!(
                "Alue variable has {} codes but {} names",
                var.values.len(),
                var.value_texts.len()
            )));
        }

        Ok(var
            .values
            .iter()
            .zip(var.value_texts.iter())
            .map(|(code, name)| Area {
                code: code.clone(),
                name: name.clone(),
            })
            .collect())
    }

    /// Fetch the population series for one area over the fixed year window.
    pub fn fetch_population(&self, area_code: &str, area_label: &str) -> Result<Series> {
        let values = self.post_query(Metric::Population, area_code)?;
        Ok(Series::new(
            area_code,
            area_label,
            "Population",
            to_observations(&values),
        ))
    }

    /// Fetch births and deaths for one area over the fixed year window.
    ///
    /// The two measures are requested together; the API answers with one
    /// flat sequence interleaved year by year
    /// (`births[2000], deaths[2000], births[2001], ...`), which is split by
    /// even/odd index so `births[i]` and `deaths[i]` always share year `i`.
    pub fn fetch_births_deaths(
        &self,
        area_code: &str,
        area_label: &str,
    ) -> Result<(Series, Series)> {
        let values = self.post_query(Metric::BirthsAndDeaths, area_code)?;
        let (births, deaths) = split_interleaved(&values);
        Ok((
            Series::new(area_code, area_label, "Births", to_observations(&births)),
            Series::new(area_code, area_label, "Deaths", to_observations(&deaths)),
        ))
    }

    /// POST the query for `metric` in `area_code` and validate the flat
    /// value sequence: one value per requested cell, no suppressed cells.
    fn post_query(&self, metric: Metric, area_code: &str) -> Result<Vec<f64>> {
        let body = PxQuery::build(metric, area_code);
        debug!("POST {} area={} metric={:?}", self.table_url, area_code, metric);

        let resp = self.http.post(&self.table_url).json(&body).send()?;
        if !resp.status().is_success() {
            return Err(Error::Http {
                status: resp.status(),
            });
        }
        let v: serde_json::Value = resp.json()?;
        let stat: JsonStat =
            serde_json::from_value(v).map_err(|e| Error::Parse(format!("json-stat body: {e}")))?;

        let expected = year_labels().len() * metric.values_per_year();
        let raw = stat.dataset.value;
        if raw.len() != expected {
            return Err(Error::Parse(format!(
                "expected {} values, got {}",
                expected,
                raw.len()
            )));
        }
        raw.into_iter()
            .enumerate()
            .map(|(i, v)| v.ok_or_else(|| Error::Parse(format!("missing value at index {i}"))))
            .collect()
    }
}

/// Split a flat interleaved sequence `[b0, d0, b1, d1, ...]` by even/odd
/// index into `([b0, b1, ...], [d0, d1, ...])`. Position `i` of both halves
/// refers to the same year.
pub fn split_interleaved(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let evens = values.iter().copied().step_by(2).collect();
    let odds = values.iter().copied().skip(1).step_by(2).collect();
    (evens, odds)
}

fn to_observations(values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Observation {
            year: START_YEAR + i as i32,
            value: *v,
        })
        .collect()
}
