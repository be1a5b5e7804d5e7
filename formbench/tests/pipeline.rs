//! In-process pipeline tests: run candidates, check equivalence, aggregate.

use formbench::{
    benchmark, benchmark_raw, candidate, Candidate, ConfigError, Diff, Error, Options,
    SpeedFactor,
};

fn options(iterations: u64, check_equivalence: bool) -> Options {
    Options {
        iterations,
        check_equivalence,
        ..Options::default()
    }
}

#[test]
fn table_is_sorted_fastest_first_with_consistent_factors() {
    // Work sizes differ by enough that ordering is deterministic.
    let table = benchmark(
        vec![
            candidate!("large", (0..500_000u64).sum::<u64>()),
            candidate!("small", (0..1_000u64).sum::<u64>()),
            candidate!("medium", (0..50_000u64).sum::<u64>()),
        ],
        &options(20, false),
    )
    .unwrap();

    let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["small", "medium", "large"]);

    assert_eq!(table.rows[0].factor, SpeedFactor::Fastest);
    let baseline = table.rows[0].elapsed.as_secs_f64();
    for row in &table.rows[1..] {
        match row.factor {
            SpeedFactor::Times(f) => {
                let expected = row.elapsed.as_secs_f64() / baseline;
                assert!((f - expected).abs() < 1e-9);
                assert!(f >= 1.0);
            }
            SpeedFactor::Fastest => panic!("only the first row may be fastest"),
        }
    }
}

#[test]
fn raw_measurements_keep_declaration_order() {
    let measurements = benchmark_raw(
        vec![
            candidate!("b", (0..10_000u64).sum::<u64>()),
            candidate!("a", (0..100u64).sum::<u64>()),
        ],
        &options(5, false),
    )
    .unwrap();
    assert_eq!(measurements[0].label, "b");
    assert_eq!(measurements[1].label, "a");
}

#[test]
fn unlabeled_candidates_are_named_by_position() {
    let table = benchmark(
        vec![
            candidate!((0..100u64).sum::<u64>()),
            candidate!("named", (0..100u64).sum::<u64>()),
            candidate!((0..100u64).sum::<u64>()),
        ],
        &options(3, false),
    )
    .unwrap();
    let mut labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    labels.sort_unstable();
    assert_eq!(labels, vec!["0", "2", "named"]);
}

#[test]
fn equivalent_candidates_pass_the_check() {
    let table = benchmark(
        vec![
            candidate!("fold", (1..=1_000u64).fold(0, |a, b| a + b)),
            candidate!("sum", (1..=1_000u64).sum::<u64>()),
            candidate!("formula", 1_000u64 * 1_001 / 2),
        ],
        &options(10, true),
    )
    .unwrap();
    assert_eq!(table.rows.len(), 3);
}

#[test]
fn mismatched_scalars_abort_the_run() {
    let err = benchmark(
        vec![candidate!("right", 2u64 + 2), candidate!("wrong", 2u64 + 3)],
        &options(1, true),
    )
    .unwrap_err();
    match err {
        Error::Equivalence(err) => {
            assert_eq!(err.left, "right");
            assert_eq!(err.right, "wrong");
            assert_eq!(
                err.diff,
                Diff::Values {
                    left: "4".into(),
                    right: "5".into()
                }
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn mismatched_vectors_report_differing_elements() {
    let err = benchmark(
        vec![candidate!("a", vec![1u32, 2]), candidate!("b", vec![1u32, 3])],
        &options(1, true),
    )
    .unwrap_err();
    match err {
        Error::Equivalence(err) => {
            // The diff carries the first non-empty direction only.
            assert_eq!(err.diff, Diff::Elements(vec!["2".to_string()]));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_labels_are_rejected() {
    let err = benchmark(
        vec![candidate!("x", 1u64), candidate!("x", 2u64)],
        &options(1, false),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::DuplicateLabel(label)) if label == "x"
    ));
}

#[test]
fn empty_candidate_set_is_rejected() {
    let candidates: Vec<Candidate<u64>> = vec![];
    let err = benchmark(candidates, &options(1, false)).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::EmptyCandidateSet)));
}

#[test]
fn zero_iterations_are_rejected() {
    let err = benchmark(vec![candidate!("a", 1u64)], &options(0, false)).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ZeroIterations)));
}

#[test]
fn repeated_raw_runs_have_the_same_shape() {
    let run = || {
        benchmark_raw(
            vec![
                candidate!("a", (0..1_000u64).sum::<u64>()),
                candidate!("b", (0..2_000u64).sum::<u64>()),
            ],
            &options(5, false),
        )
        .unwrap()
    };
    let first: Vec<String> = run().into_iter().map(|m| m.label).collect();
    let second: Vec<String> = run().into_iter().map(|m| m.label).collect();
    assert_eq!(first, second);
}

#[test]
fn table_renders_and_serializes() {
    let table = benchmark(
        vec![
            candidate!("fast", (0..100u64).sum::<u64>()),
            candidate!("slow", (0..100_000u64).sum::<u64>()),
        ],
        &options(10, false),
    )
    .unwrap();

    let rendered = table.to_string();
    assert!(rendered.contains("Form"));
    assert!(rendered.contains("x fastest"));
    assert!(rendered.contains("fast"));
    assert!(rendered.contains("slow"));

    let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 2);
}
