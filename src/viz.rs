use crate::error::{Error, Result};
use crate::models::Series;
use crate::project::ChartSession;
use num_format::{Locale, ToFormattedString};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use std::path::Path;

// Series colors carried over from the dashboard this tool replaces.
const LINE_COLOR: RGBColor = RGBColor(0xEB, 0x51, 0x46);
const BAR_COLORS: [RGBColor; 2] = [RGBColor(0x63, 0xD0, 0xFF), RGBColor(0x36, 0x36, 0x36)];

/// How one series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Line,
    Bar,
}

/// One named series of the chart, index-aligned with the axis labels.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub name: String,
    pub values: Vec<f64>,
    pub kind: RenderKind,
}

/// The boundary object handed to the renderer: axis labels plus the series
/// drawn over them. Rebuilt on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<SeriesSpec>,
}

/// Assemble the population line chart for a session: historical and
/// projected points joined into one series, labels covering both.
pub fn population_spec(session: &ChartSession) -> ChartSpec {
    let combined = session.combined();
    ChartSpec {
        title: format!("Population growth in {}", session.history().area_name),
        labels: combined.iter().map(|p| p.year.to_string()).collect(),
        series: vec![SeriesSpec {
            name: session.history().metric_label.clone(),
            values: combined.iter().map(|p| p.value).collect(),
            kind: RenderKind::Line,
        }],
    }
}

/// Assemble the paired-bar births/deaths chart.
pub fn births_deaths_spec(births: &Series, deaths: &Series) -> ChartSpec {
    ChartSpec {
        title: format!("Births and deaths in {}", births.area_name),
        labels: births.points.iter().map(|p| p.year.to_string()).collect(),
        series: vec![
            SeriesSpec {
                name: births.metric_label.clone(),
                values: births.values(),
                kind: RenderKind::Bar,
            },
            SeriesSpec {
                name: deaths.metric_label.clone(),
                values: deaths.values(),
                kind: RenderKind::Bar,
            },
        ],
    }
}

/// Render a chart spec to `out_path`. The backend is picked from the file
/// extension: `.svg` gets the SVG backend, everything else the bitmap one.
pub fn render<P: AsRef<Path>>(spec: &ChartSpec, out_path: P, width: u32, height: u32) -> Result<()> {
    if spec.labels.is_empty() || spec.series.is_empty() {
        return Err(Error::Render("no data to plot".into()));
    }
    for s in &spec.series {
        if s.values.len() != spec.labels.len() {
            return Err(Error::Render(format!(
                "series {:?} has {} values for {} labels",
                s.name,
                s.values.len(),
                spec.labels.len()
            )));
        }
    }

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, spec)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, spec)?;
    }

    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)
        .map_err(|e| Error::Render(format!("{e:?}")))?;

    let n = spec.labels.len();
    let has_bars = spec.series.iter().any(|s| s.kind == RenderKind::Bar);

    let values: Vec<f64> = spec.series.iter().flat_map(|s| s.values.iter().copied()).collect();
    let (mut min_val, mut max_val) = (
        values.iter().cloned().fold(f64::INFINITY, f64::min),
        values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    );
    // Bars grow from the zero baseline, so the axis must include it.
    if has_bars {
        min_val = min_val.min(0.0);
        max_val = max_val.max(0.0);
    }
    if (max_val - min_val).abs() < f64::EPSILON {
        min_val -= 1.0;
        max_val += 1.0;
    }

    let x_range = -0.5f64..(n as f64 - 0.5);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(spec.title.as_str(), ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(x_range, min_val..max_val)
        .map_err(|e| Error::Render(format!("{e:?}")))?;

    // Axis label formatters: Y uses locale thousands separators; X maps the
    // index positions back to the year labels.
    let y_label_fmt = |v: &f64| {
        let rounded = (*v).round() as i64;
        rounded.to_formatted_string(&Locale::en)
    };
    let labels = spec.labels.clone();
    let x_label_fmt = move |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 0.25 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    };

    // Limit label counts to avoid overlap
    let x_label_count = n.min(12);
    let y_label_count = 10usize;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Persons")
        .x_labels(x_label_count)
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| Error::Render(format!("{e:?}")))?;

    let n_bar_series = spec.series.iter().filter(|s| s.kind == RenderKind::Bar).count();
    let group_width = 0.8f64;
    let bar_w = group_width / n_bar_series.max(1) as f64;

    let mut bar_idx = 0usize;
    for series in &spec.series {
        match series.kind {
            RenderKind::Line => {
                let color = LINE_COLOR.to_rgba();
                let style = ShapeStyle {
                    color,
                    filled: false,
                    stroke_width: 2,
                };
                let pts: Vec<(f64, f64)> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, *v))
                    .collect();
                chart
                    .draw_series(LineSeries::new(pts, style))
                    .map_err(|e| Error::Render(format!("{e:?}")))?
                    .label(series.name.clone())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color));
            }
            RenderKind::Bar => {
                let color = BAR_COLORS[bar_idx % BAR_COLORS.len()].to_rgba();
                let offset = bar_idx as f64 * bar_w - group_width / 2.0;
                bar_idx += 1;
                let rects = series.values.iter().enumerate().map(|(i, v)| {
                    let x0 = i as f64 + offset;
                    let x1 = x0 + bar_w;
                    let y0 = 0.0f64.min(*v);
                    let y1 = 0.0f64.max(*v);
                    Rectangle::new([(x0, y0), (x1, y1)], color.filled())
                });
                chart
                    .draw_series(rects)
                    .map_err(|e| Error::Render(format!("{e:?}")))?
                    .label(series.name.clone())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(|e| Error::Render(format!("{e:?}")))?;

    root.present().map_err(|e| Error::Render(format!("{e:?}")))?;
    Ok(())
}
