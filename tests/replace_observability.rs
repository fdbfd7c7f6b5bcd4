use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use na_replace::ReplaceError;
use na_replace::replace::{
    Advisory, CompositeObserver, FileObserver, ReplaceContext, ReplaceObserver, ReplaceOptions,
    ReplaceSeverity, ReplaceStats, Replacement, ReplacementValues, replace_na,
    replace_na_with_default,
};
use na_replace::types::{DataType, Series, Value};

#[derive(Default)]
struct RecordingObserver {
    advisories: Mutex<Vec<Advisory>>,
    completes: Mutex<Vec<(String, ReplaceStats)>>,
    failures: Mutex<Vec<String>>,
    alerts: Mutex<Vec<(ReplaceSeverity, String)>>,
}

impl ReplaceObserver for RecordingObserver {
    fn on_advisory(&self, _ctx: &ReplaceContext, advisory: &Advisory) {
        self.advisories.lock().unwrap().push(advisory.clone());
    }

    fn on_complete(&self, ctx: &ReplaceContext, stats: &ReplaceStats) {
        self.completes
            .lock()
            .unwrap()
            .push((ctx.column.clone(), stats.clone()));
    }

    fn on_failure(&self, _ctx: &ReplaceContext, _severity: ReplaceSeverity, error: &ReplaceError) {
        self.failures.lock().unwrap().push(error.to_string());
    }

    fn on_alert(&self, _ctx: &ReplaceContext, severity: ReplaceSeverity, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

fn visits_series() -> Series {
    Series::new(
        "visits",
        DataType::Int64,
        vec![Value::Int64(1), Value::Null, Value::Int64(3), Value::Null],
    )
}

fn grade_series() -> Series {
    Series::categorical(
        "grade",
        vec![Value::Null, Value::Utf8("b".to_string())],
        vec!["a".to_string(), "b".to_string()],
    )
}

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("na-replace-observability-{nanos}.{ext}"))
}

#[test]
fn completion_stats_are_reported_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let _ = replace_na(visits_series(), Some(Replacement::scalar(0i64)), &opts).unwrap();

    let completes = obs.completes.lock().unwrap();
    assert_eq!(completes.len(), 1);
    assert_eq!(completes[0].0, "visits");
    assert_eq!(
        completes[0].1,
        ReplaceStats {
            length: 4,
            missing: 2,
            replaced: 2,
            levels_added: Vec::new(),
        }
    );
    assert!(obs.failures.lock().unwrap().is_empty());
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn clean_input_still_reports_completion() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let series = Series::new("x", DataType::Int64, vec![Value::Int64(1), Value::Int64(2)]);
    let _ = replace_na(series, Some(Replacement::scalar(0i64)), &opts).unwrap();

    let completes = obs.completes.lock().unwrap();
    assert_eq!(completes.len(), 1);
    assert_eq!(completes[0].1.missing, 0);
    assert_eq!(completes[0].1.replaced, 0);
}

#[test]
fn failure_is_reported_and_alerts_at_default_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let replacement = Replacement::vector(vec![Value::Int64(0), Value::Int64(1)]);
    let _ = replace_na(visits_series(), Some(replacement), &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("matches neither"));

    let alerts = obs.alerts.lock().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].0, ReplaceSeverity::Error);
    assert!(obs.completes.lock().unwrap().is_empty());
}

#[test]
fn warning_advisories_do_not_alert_at_default_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    // A missing broadcast value cannot fill anything; non-fatal.
    let _ = replace_na(visits_series(), Some(Replacement::Scalar(Value::Null)), &opts).unwrap();

    let advisories = obs.advisories.lock().unwrap();
    assert_eq!(
        *advisories,
        vec![Advisory::ReplacementAllMissing { positions: 2 }]
    );
    assert!(obs.alerts.lock().unwrap().is_empty());
    assert_eq!(obs.completes.lock().unwrap().len(), 1);
}

#[test]
fn warning_advisories_alert_when_threshold_is_lowered() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: ReplaceSeverity::Warning,
        ..Default::default()
    };

    let _ = replace_na(visits_series(), Some(Replacement::Scalar(Value::Null)), &opts).unwrap();

    let alerts = obs.alerts.lock().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].0, ReplaceSeverity::Warning);
    assert!(alerts[0].1.contains("missing slots"));
}

#[test]
fn level_growth_advisory_requires_verbose() {
    let quiet = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(quiet.clone()),
        ..Default::default()
    };
    let filled = replace_na_with_default(grade_series(), &opts).unwrap();
    assert!(quiet.advisories.lock().unwrap().is_empty());
    // Growth still happened and is visible in the stats.
    assert!(filled.levels().unwrap().contains(&"(NA)".to_string()));
    assert_eq!(
        quiet.completes.lock().unwrap()[0].1.levels_added,
        vec!["(NA)".to_string()]
    );

    let verbose = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(verbose.clone()),
        verbose: true,
        ..Default::default()
    };
    let _ = replace_na_with_default(grade_series(), &opts).unwrap();
    assert_eq!(
        *verbose.advisories.lock().unwrap(),
        vec![Advisory::LevelsAdded {
            levels: vec!["(NA)".to_string()]
        }]
    );
}

#[test]
fn level_growth_alerts_when_threshold_admits_info() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        verbose: true,
        alert_at_or_above: ReplaceSeverity::Info,
        ..Default::default()
    };

    let _ = replace_na_with_default(grade_series(), &opts).unwrap();

    let alerts = obs.alerts.lock().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].0, ReplaceSeverity::Info);
    assert!(alerts[0].1.contains("added levels"));
}

#[test]
fn generator_over_all_missing_series_raises_advisory() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let series = Series::new("score", DataType::Float64, vec![Value::Null, Value::Null]);
    let replacement =
        Replacement::generator(|_s: &Series| ReplacementValues::One(Value::Float64(0.0)));
    let _ = replace_na(series, Some(replacement), &opts).unwrap();

    let advisories = obs.advisories.lock().unwrap();
    assert!(advisories.contains(&Advisory::GeneratorAllMissing { missing: 2 }));
}

#[test]
fn partial_coercion_is_reported() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let series = Series::new(
        "visits",
        DataType::Int64,
        vec![Value::Null, Value::Int64(5), Value::Null],
    );
    let replacement = Replacement::vector(vec![
        Value::Float64(2.0),
        Value::Int64(0),
        Value::Utf8("three".to_string()),
    ]);
    let _ = replace_na(series, Some(replacement), &opts).unwrap();

    let advisories = obs.advisories.lock().unwrap();
    assert!(advisories.contains(&Advisory::PartialCoercion {
        coerced: 2,
        failed: 1
    }));
    // The failed slot then counts as a missing replacement value.
    assert!(advisories.contains(&Advisory::ReplacementPartiallyMissing {
        filled: 1,
        left_missing: 1
    }));
}

#[test]
fn partially_missing_replacement_is_reported() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReplaceOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let replacement = Replacement::vector(vec![
        Value::Int64(0),
        Value::Int64(1),
        Value::Int64(2),
        Value::Null,
    ]);
    let _ = replace_na(visits_series(), Some(replacement), &opts).unwrap();

    let advisories = obs.advisories.lock().unwrap();
    assert_eq!(
        *advisories,
        vec![Advisory::ReplacementPartiallyMissing {
            filled: 1,
            left_missing: 1
        }]
    );

    let completes = obs.completes.lock().unwrap();
    assert_eq!(completes[0].1.replaced, 1);
    assert_eq!(completes[0].1.missing, 2);
}

#[test]
fn composite_fans_out_to_every_observer() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![first.clone(), second.clone()]);
    let opts = ReplaceOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let _ = replace_na(visits_series(), Some(Replacement::scalar(0i64)), &opts).unwrap();

    assert_eq!(first.completes.lock().unwrap().len(), 1);
    assert_eq!(second.completes.lock().unwrap().len(), 1);
}

#[test]
fn file_observer_appends_completion_lines() {
    let path = tmp_file("log");
    let opts = ReplaceOptions {
        observer: Some(Arc::new(FileObserver::new(&path))),
        ..Default::default()
    };

    let _ = replace_na(visits_series(), Some(Replacement::scalar(0i64)), &opts).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("ok column=visits"));
    assert!(contents.contains("replaced=2/2"));

    let _ = std::fs::remove_file(&path);
}
