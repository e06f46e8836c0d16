//! statfin_rs
//!
//! A lightweight Rust library for retrieving, projecting, and visualizing
//! Statistics Finland population data by municipality. Pairs with the
//! `statfin` CLI.
//!
//! ### Features
//! - Resolve free-text municipality names or codes against the live area
//!   directory (whole-country sentinel included)
//! - Fetch population or births/deaths series for 2000-2021
//! - Extrapolate up to 5 future years by mean-first-difference trend
//! - Generate SVG/PNG line and paired-bar charts
//! - Save as CSV or JSON in a tidy schema, plus quick summary statistics
//!
//! ### Example
//! ```no_run
//! use statfin_rs::{AreaDirectory, Client, project::ChartSession};
//!
//! let client = Client::default();
//! let directory = AreaDirectory::load_with(|| client.fetch_area_directory());
//! let code = directory.resolve("Helsinki")?;
//! let label = directory.display_label("Helsinki");
//!
//! let mut session = ChartSession::new(client.fetch_population(&code, &label)?);
//! session.project_more(3)?;
//! let spec = statfin_rs::viz::population_spec(&session);
//! statfin_rs::viz::render(&spec, "population.svg", 1000, 600)?;
//! # Ok::<(), statfin_rs::Error>(())
//! ```

pub mod api;
pub mod areas;
pub mod error;
pub mod models;
pub mod project;
pub mod stats;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use areas::{Area, AreaDirectory, WHOLE_COUNTRY_CODE};
pub use error::{Error, Result};
pub use models::{Metric, Observation, Series};
