use crate::error::Result;
use crate::models::Series;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save series as tidy CSV with header, one row per observation.
pub fn save_csv<P: AsRef<Path>>(series: &[Series], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("area_code", "area_name", "metric", "year", "value"))?;
    for s in series {
        for p in &s.points {
            wtr.serialize((&s.area_code, &s.area_name, &s.metric_label, p.year, p.value))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save series as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(series: &[Series], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(series)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Observation, Series};
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let series = vec![Series::new(
            "091",
            "Helsinki",
            "Population",
            vec![
                Observation {
                    year: 2000,
                    value: 555_474.0,
                },
                Observation {
                    year: 2001,
                    value: 559_718.0,
                },
            ],
        )];
        save_csv(&series, &csvp).unwrap();
        save_json(&series, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }
}
