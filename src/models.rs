use serde::{Deserialize, Serialize};

/// First year of the fixed query window.
pub const START_YEAR: i32 = 2000;
/// Last year of the fixed query window (inclusive).
pub const END_YEAR: i32 = 2021;

/// The 22 consecutive year labels ("2000".."2021") the StatFin table is
/// queried for, in request order.
pub fn year_labels() -> Vec<String> {
    (START_YEAR..=END_YEAR).map(|y| y.to_string()).collect()
}

/// Which StatFin measure(s) a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Population at the end of the year (`vaesto`), one value per year.
    Population,
    /// Live births (`vm01`) and deaths (`vm11`) requested together; the
    /// response interleaves the two measures year by year.
    BirthsAndDeaths,
}

impl Metric {
    /// The `Tiedot` dimension codes sent to the API.
    pub fn tiedot_codes(&self) -> &'static [&'static str] {
        match self {
            Metric::Population => &["vaesto"],
            Metric::BirthsAndDeaths => &["vm01", "vm11"],
        }
    }

    /// Values expected per requested year.
    pub fn values_per_year(&self) -> usize {
        self.tiedot_codes().len()
    }
}

/// One dimension selector of a PxWeb query (`Vuosi`, `Alue`, or `Tiedot`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PxDimension {
    pub code: String,
    pub selection: PxSelection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PxSelection {
    /// Always `"item"`: values are enumerated explicitly.
    pub filter: String,
    pub values: Vec<String>,
}

impl PxDimension {
    pub fn items(code: &str, values: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            selection: PxSelection {
                filter: "item".to_string(),
                values,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PxResponseFormat {
    pub format: String,
}

/// The fixed-shape POST body accepted by a PxWeb table endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PxQuery {
    pub query: Vec<PxDimension>,
    pub response: PxResponseFormat,
}

impl PxQuery {
    /// Build the three-selector query for `metric` in `area_code` over the
    /// fixed year window, asking for a json-stat response.
    pub fn build(metric: Metric, area_code: &str) -> Self {
        Self {
            query: vec![
                PxDimension::items("Vuosi", year_labels()),
                PxDimension::items("Alue", vec![area_code.to_string()]),
                PxDimension::items(
                    "Tiedot",
                    metric.tiedot_codes().iter().map(|c| c.to_string()).collect(),
                ),
            ],
            response: PxResponseFormat {
                format: "json-stat".to_string(),
            },
        }
    }
}

/// json-stat response body: the flat value sequence lives in
/// `dataset.value`. Suppressed cells arrive as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonStat {
    pub dataset: JsonStatDataset,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonStatDataset {
    pub value: Vec<Option<f64>>,
}

/// Table metadata returned by a plain GET on the table endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TableMeta {
    pub variables: Vec<TableVariable>,
}

/// One dimension's metadata: internal codes and display texts, index-aligned.
#[derive(Debug, Clone, Deserialize)]
pub struct TableVariable {
    pub code: String,
    #[serde(default)]
    pub text: String,
    pub values: Vec<String>,
    #[serde(rename = "valueTexts")]
    pub value_texts: Vec<String>,
}

/// One observation: a year and its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub value: f64,
}

/// A fetched time series for one area and one measure, in request-year order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub area_code: String,
    pub area_name: String,
    /// Human label of the measure ("Population", "Births", "Deaths").
    pub metric_label: String,
    pub points: Vec<Observation>,
}

impl Series {
    pub fn new(
        area_code: &str,
        area_name: &str,
        metric_label: &str,
        points: Vec<Observation>,
    ) -> Self {
        Self {
            area_code: area_code.to_string(),
            area_name: area_name.to_string(),
            metric_label: metric_label.to_string(),
            points,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }
}
