use statfin_rs::models::{Observation, Series};
use statfin_rs::stats::summarize;

fn series(values: &[f64]) -> Series {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| Observation {
            year: 2000 + i as i32,
            value: *v,
        })
        .collect();
    Series::new("091", "Helsinki", "Population", points)
}

#[test]
fn summary_handles_even_and_odd_counts() {
    // [1,2,3,4] -> median = (2+3)/2 = 2.5
    let s = summarize(&series(&[1.0, 2.0, 3.0, 4.0]));
    assert_eq!(s.count, 4);
    assert_eq!(s.min, Some(1.0));
    assert_eq!(s.max, Some(4.0));
    assert!((s.mean.unwrap() - 2.5).abs() < 1e-9);
    assert!((s.median.unwrap() - 2.5).abs() < 1e-9);

    // [10,20,30] -> median = 20
    let s = summarize(&series(&[10.0, 20.0, 30.0]));
    assert_eq!(s.count, 3);
    assert_eq!(s.median, Some(20.0));
}

#[test]
fn summary_median_uses_sorted_values() {
    let s = summarize(&series(&[30.0, 10.0, 20.0]));
    assert_eq!(s.min, Some(10.0));
    assert_eq!(s.max, Some(30.0));
    assert_eq!(s.median, Some(20.0));
}

#[test]
fn mean_annual_change_matches_projection_trend() {
    let s = summarize(&series(&[100.0, 102.0, 105.0]));
    assert!((s.mean_annual_change.unwrap() - 2.5).abs() < 1e-9);
}

#[test]
fn short_series_has_no_trend() {
    let s = summarize(&series(&[100.0]));
    assert_eq!(s.count, 1);
    assert_eq!(s.mean_annual_change, None);

    let s = summarize(&series(&[]));
    assert_eq!(s.count, 0);
    assert_eq!(s.min, None);
    assert_eq!(s.median, None);
}

#[test]
fn summary_carries_series_labels() {
    let s = summarize(&series(&[1.0, 2.0]));
    assert_eq!(s.area_name, "Helsinki");
    assert_eq!(s.metric_label, "Population");
}
