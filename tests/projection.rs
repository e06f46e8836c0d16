use statfin_rs::error::Error;
use statfin_rs::models::{Observation, Series};
use statfin_rs::project::{ChartSession, MAX_PROJECTED_POINTS, extend, mean_delta};

fn obs(pairs: &[(i32, f64)]) -> Vec<Observation> {
    pairs
        .iter()
        .map(|&(year, value)| Observation { year, value })
        .collect()
}

fn series(pairs: &[(i32, f64)]) -> Series {
    Series::new("SSS", "whole country", "Population", obs(pairs))
}

#[test]
fn mean_delta_is_average_of_first_differences() {
    // ((102-100) + (105-102)) / 2 = 2.5
    let d = mean_delta(&[100.0, 102.0, 105.0]).unwrap();
    assert!((d - 2.5).abs() < 1e-12);
}

#[test]
fn mean_delta_needs_two_points() {
    assert!(matches!(
        mean_delta(&[]),
        Err(Error::InsufficientData { got: 0 })
    ));
    assert!(matches!(
        mean_delta(&[1.0]),
        Err(Error::InsufficientData { got: 1 })
    ));
}

#[test]
fn single_step_appends_last_plus_mean_delta() {
    let history = obs(&[(2019, 100.0), (2020, 102.0), (2021, 105.0)]);
    let ext = extend(&history, 1, MAX_PROJECTED_POINTS).unwrap();
    assert_eq!(ext.len(), 1);
    assert_eq!(ext[0].year, 2022);
    assert!((ext[0].value - 107.5).abs() < 1e-12);
}

#[test]
fn zero_count_is_a_noop() {
    let history = obs(&[(2020, 1.0), (2021, 2.0)]);
    let before = history.clone();
    let ext = extend(&history, 0, MAX_PROJECTED_POINTS).unwrap();
    assert!(ext.is_empty());
    assert_eq!(history, before);
}

#[test]
fn extension_years_are_consecutive() {
    let history = obs(&[(2020, 10.0), (2021, 12.0)]);
    let ext = extend(&history, 3, MAX_PROJECTED_POINTS).unwrap();
    let years: Vec<i32> = ext.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2022, 2023, 2024]);
}

#[test]
fn count_above_cap_is_rejected() {
    let history = obs(&[(2020, 1.0), (2021, 2.0)]);
    let err = extend(&history, MAX_PROJECTED_POINTS + 1, MAX_PROJECTED_POINTS).unwrap_err();
    assert!(matches!(err, Error::ProjectionCapExceeded { max: 5 }));
}

#[test]
fn projection_is_deterministic() {
    let history = obs(&[(2019, 5.0), (2020, 7.5), (2021, 11.0)]);
    let a = extend(&history, 4, MAX_PROJECTED_POINTS).unwrap();
    let b = extend(&history, 4, MAX_PROJECTED_POINTS).unwrap();
    assert_eq!(a, b);
}

#[test]
fn one_call_of_five_equals_five_single_steps() {
    // Appending a mean-delta point keeps the mean first difference
    // unchanged, so batch and stepwise projection agree.
    let pairs = [(2018, 100.0), (2019, 104.0), (2020, 103.0), (2021, 110.0)];

    let batch = {
        let mut s = ChartSession::new(series(&pairs));
        s.project_more(5).unwrap();
        s.projected().to_vec()
    };
    let stepwise = {
        let mut s = ChartSession::new(series(&pairs));
        for _ in 0..5 {
            s.project_next().unwrap();
        }
        s.projected().to_vec()
    };

    assert_eq!(batch.len(), 5);
    for (a, b) in batch.iter().zip(stepwise.iter()) {
        assert_eq!(a.year, b.year);
        assert!((a.value - b.value).abs() < 1e-9);
    }
}

#[test]
fn session_rejects_sixth_projection_and_keeps_state() {
    let mut session = ChartSession::new(series(&[(2020, 100.0), (2021, 110.0)]));
    for _ in 0..MAX_PROJECTED_POINTS {
        session.project_next().unwrap();
    }
    assert_eq!(session.projected().len(), 5);
    assert_eq!(session.remaining_capacity(), 0);

    let before = session.projected().to_vec();
    let err = session.project_next().unwrap_err();
    assert!(matches!(err, Error::ProjectionCapExceeded { max: 5 }));
    assert_eq!(session.projected(), before.as_slice());
}

#[test]
fn session_rejects_overlarge_batch_without_partial_append() {
    let mut session = ChartSession::new(series(&[(2020, 100.0), (2021, 110.0)]));
    session.project_more(3).unwrap();

    let err = session.project_more(3).unwrap_err();
    assert!(matches!(err, Error::ProjectionCapExceeded { max: 5 }));
    assert_eq!(session.projected().len(), 3);

    // The remaining capacity is still usable afterwards.
    session.project_more(2).unwrap();
    assert_eq!(session.projected().len(), 5);
}

#[test]
fn session_on_single_point_history_reports_insufficient_data() {
    let mut session = ChartSession::new(series(&[(2021, 100.0)]));
    let err = session.project_next().unwrap_err();
    assert!(matches!(err, Error::InsufficientData { got: 1 }));
    assert!(session.projected().is_empty());
}

#[test]
fn combined_is_history_followed_by_projection() {
    let mut session = ChartSession::new(series(&[(2020, 100.0), (2021, 102.0)]));
    session.project_more(2).unwrap();
    let combined = session.combined();
    assert_eq!(combined.len(), 4);
    assert_eq!(combined[0].year, 2020);
    assert_eq!(combined[3].year, 2023);
    // meanDelta = 2 throughout.
    assert!((combined[2].value - 104.0).abs() < 1e-12);
    assert!((combined[3].value - 106.0).abs() < 1e-12);
}
