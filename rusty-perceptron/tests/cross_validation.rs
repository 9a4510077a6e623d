use std::collections::HashSet;

use rusty_perceptron::{
    class::ClassValues,
    config::RunConfig,
    dataset::Dataset,
    fit::{cross_validate, SeedSource},
    folds::stratified_folds,
    ErrorKind,
};

// 4 features, 5 "yes" rows followed by 5 "no" rows.
fn weather() -> Dataset {
    let rows = vec![
        (vec![0.85, 0.85, 0.10, 0.20], "yes"),
        (vec![0.80, 0.90, 0.20, 0.10], "yes"),
        (vec![0.83, 0.86, 0.15, 0.30], "yes"),
        (vec![0.70, 0.96, 0.05, 0.25], "yes"),
        (vec![0.68, 0.80, 0.30, 0.10], "yes"),
        (vec![0.20, 0.15, 0.90, 0.80], "no"),
        (vec![0.25, 0.30, 0.85, 0.70], "no"),
        (vec![0.10, 0.20, 0.75, 0.95], "no"),
        (vec![0.30, 0.10, 0.80, 0.85], "no"),
        (vec![0.15, 0.25, 0.70, 0.90], "no"),
    ];
    let rows = rows
        .into_iter()
        .map(|(features, label)| (features, label.to_string()))
        .collect();
    Dataset::new(rows, ClassValues::new("yes", "no").unwrap(), 4).unwrap()
}

fn scenario_config() -> RunConfig {
    RunConfig {
        learning_rate: 0.1,
        folds: 5,
        epochs: 25,
        seed: Some(42),
        reset_per_fold: false,
    }
}

#[test]
fn test_scenario_buckets() {
    let data = weather();
    let positive = data.positive();
    let negative = data.negative();
    let folds = stratified_folds(&positive, &negative, 5).unwrap();
    for (i, fold) in folds.iter().enumerate() {
        let ids: Vec<usize> = fold.iter().map(|r| r.id).collect();
        assert_eq!(vec![i, i + 5], ids);
    }
}

#[test]
fn test_scenario_run() {
    let data = weather();
    let report = cross_validate(&data, &scenario_config(), &mut SeedSource::from_seed(42)).unwrap();

    assert_eq!(10, report.predictions.len());
    let ids: HashSet<usize> = report.predictions.iter().map(|p| p.id).collect();
    assert_eq!(10, ids.len());

    let accuracy = report.accuracy().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
    let tenths = accuracy * 10.0;
    assert!((tenths - tenths.round()).abs() < 1e-9, "{}", accuracy);
    assert_eq!(accuracy == 1.0, report.predictions.iter().all(|p| p.is_correct()));

    for prediction in report.predictions.iter() {
        assert!(prediction.score > 0.0 && prediction.score < 1.0);
    }

    let points = report.roc_curve().unwrap();
    for pair in points.windows(2) {
        assert!(pair[1].tpr >= pair[0].tpr);
        assert!(pair[1].fpr >= pair[0].fpr);
    }
}

#[test]
fn test_scenario_lines() {
    let data = weather();
    let report = cross_validate(&data, &scenario_config(), &mut SeedSource::from_seed(42)).unwrap();
    let lines: Vec<String> = report.lines(data.classes()).collect();
    assert_eq!(10, lines.len());

    for (i, line) in lines.iter().enumerate() {
        let parts: Vec<&str> = line.split(' ').collect();
        assert_eq!(4, parts.len(), "{}", line);
        assert_eq!((i % 5 + 1).to_string(), parts[0]);
        assert!(parts[1] == "yes" || parts[1] == "no");
        assert_eq!(if i < 5 { "yes" } else { "no" }, parts[2]);
        let score: f64 = parts[3].parse().unwrap();
        assert!(score > 0.0 && score < 1.0);
        let fraction = parts[3].split('.').nth(1).unwrap_or("");
        assert!(fraction.len() <= 12 && !fraction.ends_with('0'), "{}", parts[3]);
    }
}

#[test]
fn test_single_class_dataset() {
    let rows = (0..6)
        .map(|i| (vec![i as f64 / 6.0, 0.5], "Yes".to_string()))
        .collect();
    let data = Dataset::new(rows, ClassValues::new("yes", "no").unwrap(), 2).unwrap();
    let report = cross_validate(&data, &scenario_config(), &mut SeedSource::from_seed(1)).unwrap();

    assert!(report.accuracy().is_ok());
    assert_eq!(ErrorKind::Division, report.roc_curve().err().unwrap().kind());
}
