use chrono::NaiveDate;
use temprs::temporal::{date_range, Frequency};
use temprs::{fill_missing, missing_ratio, Error, FillMethod, TimeSeries};

fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// A 30-day daily time axis.
fn daily_index() -> Vec<NaiveDate> {
    date_range(
        parse_date("2013-01-01"),
        parse_date("2013-01-30"),
        Frequency::Daily,
        true,
    )
    .unwrap()
}

fn series_of(values: Vec<f64>) -> TimeSeries<NaiveDate> {
    TimeSeries::from_f64(values, daily_index(), None).unwrap()
}

/// 0, 1, ..., 29
fn ramp() -> Vec<f64> {
    (0..30).map(|i| i as f64).collect()
}

/// (i - 4)^2 for i in 0..30
fn quadratic_signal() -> Vec<f64> {
    (0..30).map(|i| (i as f64 - 4.0).powi(2)).collect()
}

#[test]
fn test_identity_fill() {
    // A series without missing values comes back unchanged
    let constant = series_of(vec![2.0; 30]);

    assert_eq!(constant, fill_missing(&constant, FillMethod::Linear).unwrap());
    assert_eq!(
        constant,
        fill_missing(&constant, FillMethod::Quadratic).unwrap()
    );
}

#[test]
fn test_fill_constant() {
    // Leading, interior and trailing gaps in an otherwise constant column
    let nan = f64::NAN;
    let mut values = Vec::new();
    values.extend(vec![nan; 5]);
    values.extend(vec![2.0; 5]);
    values.extend(vec![nan; 5]);
    values.extend(vec![2.0; 10]);
    values.extend(vec![nan; 5]);
    let gappy = series_of(values);

    let expected = series_of(vec![2.0; 30]);
    assert_eq!(expected, fill_missing(&gappy, FillMethod::Linear).unwrap());
    assert_eq!(expected, fill_missing(&gappy, FillMethod::Quadratic).unwrap());
}

#[test]
fn test_linear() {
    // Values on a line are reconstructed exactly in the interior gap
    let lin = ramp();
    let mut values = lin[..10].to_vec();
    values.extend(vec![f64::NAN; 10]);
    values.extend(&lin[20..]);
    let gappy = series_of(values);

    assert_eq!(
        series_of(lin),
        fill_missing(&gappy, FillMethod::Linear).unwrap()
    );
}

#[test]
fn test_multiple_interior_gaps() {
    // Each interior gap uses its own local anchors
    let lin = ramp();
    let mut values = lin.clone();
    for i in [3usize, 4, 11, 20, 21, 22] {
        values[i] = f64::NAN;
    }
    let gappy = series_of(values);

    assert_eq!(
        series_of(lin),
        fill_missing(&gappy, FillMethod::Linear).unwrap()
    );
}

#[test]
fn test_backward_fill() {
    // A leading gap is filled flat with the first observed value
    let lin = ramp();
    let mut values = vec![f64::NAN; 10];
    values.extend(&lin[10..]);
    let gappy = series_of(values);

    let mut expected = vec![10.0; 10];
    expected.extend(&lin[10..]);
    assert_eq!(
        series_of(expected),
        fill_missing(&gappy, FillMethod::Linear).unwrap()
    );
}

#[test]
fn test_forward_fill() {
    // A trailing gap is filled flat with the last observed value
    let lin = ramp();
    let mut values = lin[..20].to_vec();
    values.extend(vec![f64::NAN; 10]);
    let gappy = series_of(values);

    let mut expected = lin[..20].to_vec();
    expected.extend(vec![19.0; 10]);
    assert_eq!(
        series_of(expected),
        fill_missing(&gappy, FillMethod::Linear).unwrap()
    );
}

#[test]
fn test_edge_gaps_ignore_method() {
    // Constant extension at the edges applies for every method
    let lin = ramp();
    let mut values = vec![f64::NAN; 10];
    values.extend(&lin[10..]);
    let gappy = series_of(values);

    assert_eq!(
        fill_missing(&gappy, FillMethod::Linear).unwrap(),
        fill_missing(&gappy, FillMethod::Quadratic).unwrap()
    );
}

#[test]
fn test_fill_quadratic() {
    // Values on y = (x - 4)^2 are reconstructed to 7 decimal digits
    let cub = quadratic_signal();
    let mut values = cub[..10].to_vec();
    values.extend(vec![f64::NAN; 10]);
    values.extend(&cub[20..]);
    let gappy = series_of(values);

    let filled = fill_missing(&gappy, FillMethod::Quadratic).unwrap();
    assert_eq!(series_of(cub), filled.round_to(7));
}

#[test]
fn test_multivariate_fill() {
    let nan = f64::NAN;
    let mut const_gappy = Vec::new();
    const_gappy.extend(vec![nan; 5]);
    const_gappy.extend(vec![2.0; 5]);
    const_gappy.extend(vec![nan; 5]);
    const_gappy.extend(vec![2.0; 10]);
    const_gappy.extend(vec![nan; 5]);
    let series_a = series_of(const_gappy);

    let lin = ramp();
    let mut lin_gappy = lin[..10].to_vec();
    lin_gappy.extend(vec![nan; 10]);
    lin_gappy.extend(&lin[20..]);
    let series_b = series_of(lin_gappy);

    // Filling the stacked input equals stacking the filled columns
    let expected = series_of(vec![2.0; 30]).stack(&series_of(lin)).unwrap();
    let filled = fill_missing(&series_a.stack(&series_b).unwrap(), FillMethod::Linear).unwrap();
    assert_eq!(expected, filled);

    // Columns are imputed independently
    let stacked_fills = fill_missing(&series_a, FillMethod::Linear)
        .unwrap()
        .stack(&fill_missing(&series_b, FillMethod::Linear).unwrap())
        .unwrap();
    assert_eq!(filled, stacked_fills);
}

#[test]
fn test_missing_ratio() {
    let mut values: Vec<f64> = (0..27).map(|i| i as f64).collect();
    values.extend(vec![f64::NAN; 3]);
    let series = series_of(values);

    // Univariate: 3 of 30 observations are missing
    assert_eq!(0.1, missing_ratio(&series).unwrap());

    // Stacking a column with itself must not change the ratio
    let stacked = series.stack(&series).unwrap();
    assert_eq!(0.1, missing_ratio(&stacked).unwrap());
}

#[test]
fn test_fill_preserves_time_axis() {
    let mut values = vec![f64::NAN; 2];
    values.extend((2..30).map(|i| i as f64));
    let gappy = series_of(values);

    let filled = fill_missing(&gappy, FillMethod::Linear).unwrap();
    assert_eq!(gappy.timestamps(), filled.timestamps());
    assert_eq!(gappy.len(), filled.len());
    assert_eq!(gappy.n_columns(), filled.n_columns());
}

#[test]
fn test_fully_missing_column_is_unfillable() {
    let series = series_of(vec![f64::NAN; 30]);
    let err = fill_missing(&series, FillMethod::Linear).unwrap_err();
    assert!(matches!(err, Error::UnfillableGap { column: 0 }));

    // Same for a multivariate series where only one column is unfillable
    let observed = series_of(vec![1.0; 30]);
    let stacked = observed.stack(&series).unwrap();
    let err = fill_missing(&stacked, FillMethod::Linear).unwrap_err();
    assert!(matches!(err, Error::UnfillableGap { column: 1 }));
}

#[test]
fn test_unknown_method_name_is_rejected() {
    let err = "cubic".parse::<FillMethod>().unwrap_err();
    assert!(matches!(err, Error::InvalidMethod(_)));
    assert!(err.to_string().contains("cubic"));
}

#[test]
fn test_empty_series_errors() {
    let empty: TimeSeries<NaiveDate> = TimeSeries::from_f64(vec![], vec![], None).unwrap();

    assert!(matches!(
        fill_missing(&empty, FillMethod::Linear).unwrap_err(),
        Error::EmptyData(_)
    ));
    assert!(matches!(
        missing_ratio(&empty).unwrap_err(),
        Error::EmptyData(_)
    ));
}

#[test]
fn test_observed_values_pass_through_unchanged() {
    let mut values = ramp();
    values[5] = f64::NAN;
    values[6] = f64::NAN;
    // An awkward observed value that must come through bit-identical
    values[7] = 0.1 + 0.2;
    let gappy = series_of(values.clone());

    let filled = fill_missing(&gappy, FillMethod::Linear).unwrap();
    assert_eq!(filled.values()[7].value(), Some(&(0.1 + 0.2)));
    assert_eq!(filled.values()[0].value(), Some(&0.0));
    assert!(filled.values()[5].is_value());
    assert!(filled.values()[6].is_value());
}
