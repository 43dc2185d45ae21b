use float_cmp::assert_approx_eq;
use itertools::Itertools;
use pyramidal::{
    instance::{create_instance, run, Instance, RunOutcome},
    params::{ConductanceParams, MembraneParams, SimulationParams},
    pharmacology::{
        apply_applications, Dose, DrugApplication, BASELINE_CONDUCTANCES, STANDARD_CASES,
    },
    summary::{summarize_cases, summarize_cases_parallel},
};

fn make_instance(conductances: ConductanceParams) -> Instance {
    let params = SimulationParams {
        membrane: MembraneParams::default(),
        conductances,
    };

    create_instance(params).unwrap()
}

fn run_case(g_na: f64, g_na_p: f64, duration_ms: f64) -> RunOutcome {
    run(ConductanceParams { g_na, g_na_p }, duration_ms).unwrap()
}

#[test]
fn repeated_runs_are_identical() {
    let first = run_case(50.0, 0.15, 100.0);
    let second = run_case(50.0, 0.15, 100.0);

    assert_eq!(first.spike_times, second.spike_times);
    assert_eq!(first.voltage_trace, second.voltage_trace);
}

#[test]
fn trace_length_matches_step_count() {
    for (duration_ms, expected_len) in
        [(100.0, 10000), (50.0, 5000), (1.0, 100), (0.05, 5), (0.015, 2)]
    {
        let outcome = run_case(50.0, 0.15, duration_ms);
        assert_eq!(outcome.voltage_trace.len(), expected_len);
    }
}

#[test]
fn spike_times_strictly_increasing() {
    let outcome = run_case(50.0, 0.15, 100.0);

    assert!(outcome.spike_times.len() > 1);

    for (previous, next) in outcome.spike_times.iter().tuple_windows() {
        assert!(next > previous);
    }
}

#[test]
fn refractory_period_separates_spikes() {
    let outcome = run_case(50.0, 0.15, 100.0);

    for (previous, next) in outcome.spike_times.iter().tuple_windows() {
        assert!(next - previous >= 2.0);
    }
}

#[test]
fn gates_stay_at_rest_for_one_millisecond() {
    let mut instance = make_instance(ConductanceParams::default());

    instance.run_to(1.0).unwrap();

    let snapshot = instance.state_snapshot();
    assert_approx_eq!(f64, snapshot.gating.m, 0.05);
    assert_approx_eq!(f64, snapshot.gating.h, 0.60);
    assert_approx_eq!(f64, snapshot.gating.n, 0.318);
    assert_approx_eq!(f64, snapshot.gating.p, 0.05);
}

#[test]
fn gates_have_moved_after_settle_window() {
    let mut instance = make_instance(ConductanceParams::default());

    instance.run_to(1.2).unwrap();

    let snapshot = instance.state_snapshot();
    assert!((snapshot.gating.m - 0.05).abs() > 1e-6);
}

#[test]
fn baseline_regular_spiking() {
    let outcome = run_case(50.0, 0.15, 100.0);

    assert_eq!(outcome.spike_times.len(), 28);
    assert_approx_eq!(f64, outcome.spike_times[0], 1.48, epsilon = 1e-6);
    assert_approx_eq!(f64, outcome.spike_times[1], 4.81, epsilon = 1e-6);
    assert_approx_eq!(
        f64,
        *outcome.voltage_trace.last().unwrap(),
        -57.400947603017315,
        epsilon = 1e-6
    );
}

#[test]
fn zeroed_sodium_conductances_never_spike() {
    let outcome = run_case(0.0, 0.0, 50.0);

    assert!(outcome.spike_times.is_empty());
    assert_eq!(outcome.voltage_trace.len(), 5000);
    assert_approx_eq!(
        f64,
        *outcome.voltage_trace.last().unwrap(),
        -52.6009769778017,
        epsilon = 1e-6
    );
}

#[test]
fn valproate_reduces_firing() {
    let normal = run_case(50.0, 0.15, 100.0);
    let valproate_300 = run_case(30.0, 0.15, 100.0);

    assert!(valproate_300.spike_times.len() <= normal.spike_times.len());
}

#[test]
fn combination_reduces_firing() {
    let normal = run_case(50.0, 0.15, 100.0);
    let combo_300 = run_case(30.0, 0.0375, 100.0);

    assert_eq!(combo_300.spike_times.len(), 23);
    assert!(combo_300.spike_times.len() <= normal.spike_times.len());
}

#[test]
fn standard_case_sweep_regression() {
    let membrane = MembraneParams::default();

    let summaries = summarize_cases(&membrane, &STANDARD_CASES, 100.0).unwrap();

    let expected_counts = [28, 27, 27, 26, 26, 26, 25, 25, 24, 23];
    let expected_firsts = [1.48, 1.52, 1.54, 1.56, 1.63, 1.68, 1.72, 1.68, 1.77, 1.85];

    assert_eq!(summaries.len(), expected_counts.len());

    for ((case_summary, expected_count), expected_first) in
        summaries.iter().zip(expected_counts).zip(expected_firsts)
    {
        assert_eq!(case_summary.metrics.spike_count, expected_count);
        assert_approx_eq!(
            f64,
            case_summary.metrics.first_spike_time.unwrap(),
            expected_first,
            epsilon = 1e-6
        );
    }

    // these runs end inside a refractory window, so the last sample is the
    // held reset potential
    for case_idx in [2, 5, 8, 9] {
        assert_approx_eq!(
            f64,
            summaries[case_idx].metrics.final_voltage.unwrap(),
            -65.0
        );
    }
}

#[test]
fn parallel_sweep_equals_sequential_sweep() {
    let membrane = MembraneParams::default();

    let sequential = summarize_cases(&membrane, &STANDARD_CASES, 100.0).unwrap();
    let parallel = summarize_cases_parallel(&membrane, &STANDARD_CASES, 100.0, None).unwrap();

    assert_eq!(sequential.len(), parallel.len());

    for (seq, par) in sequential.iter().zip(&parallel) {
        assert_eq!(seq.label, par.label);
        assert_eq!(seq.metrics.spike_count, par.metrics.spike_count);
        assert_eq!(
            seq.metrics.first_spike_time.map(f64::to_bits),
            par.metrics.first_spike_time.map(f64::to_bits)
        );
    }
}

#[test]
fn dose_fold_reproduces_combo_case() {
    let folded = apply_applications(
        BASELINE_CONDUCTANCES,
        &[DrugApplication::Combination(Dose::MicroMolar300)],
    );

    let combo_300 = STANDARD_CASES[9].conductances;
    assert_approx_eq!(f64, folded.g_na, combo_300.g_na);
    assert_approx_eq!(f64, folded.g_na_p, combo_300.g_na_p);

    let folded_outcome = run(folded, 100.0).unwrap();
    let table_outcome = run(combo_300, 100.0).unwrap();
    assert_eq!(folded_outcome.spike_times, table_outcome.spike_times);
}

#[test]
fn invalid_inputs_fail_fast() {
    let result = run(
        ConductanceParams {
            g_na: -1.0,
            g_na_p: 0.15,
        },
        100.0,
    );
    assert!(result.is_err());

    let result = run(ConductanceParams::default(), 0.0);
    assert!(result.is_err());

    let result = run(ConductanceParams::default(), -5.0);
    assert!(result.is_err());
}

#[test]
fn refractory_trace_samples_hold_the_reset_value() {
    let outcome = run_case(50.0, 0.15, 100.0);

    let first_spike_step = (outcome.spike_times[0] / 0.01).round() as usize;
    let refractory_steps = (2.0 / 0.01) as usize;

    for step in first_spike_step..first_spike_step + refractory_steps {
        assert_approx_eq!(f64, outcome.voltage_trace[step], -65.0);
    }
}
