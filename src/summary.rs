use crate::instance::{create_instance, RunOutcome};
use crate::params::{MembraneParams, SimulationParams};
use crate::pharmacology::DrugCase;
use crate::util::get_partition_range;
use itertools::Itertools;
use serde::Serialize;
use simple_error::SimpleResult;
use statrs::statistics::Statistics;
use std::sync::mpsc::channel as mpsc_channel;
use std::thread;

/// Per-run analytics. Absent spikes and empty traces are represented as
/// None, not as errors.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetrics {
    pub spike_count: usize,
    pub first_spike_time: Option<f64>,
    pub final_voltage: Option<f64>,
    /// Spikes per second over the simulated duration
    pub mean_firing_rate: f64,
    pub mean_inter_spike_interval: Option<f64>,
    pub inter_spike_interval_std_dev: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseSummary {
    pub label: &'static str,
    pub metrics: RunMetrics,
}

pub fn compute_metrics(outcome: &RunOutcome, dt: f64) -> RunMetrics {
    let spike_count = outcome.spike_times.len();
    let duration_ms = outcome.voltage_trace.len() as f64 * dt;

    let mean_firing_rate = if duration_ms > 0.0 {
        spike_count as f64 * 1000.0 / duration_ms
    } else {
        0.0
    };

    let intervals: Vec<f64> = outcome
        .spike_times
        .iter()
        .copied()
        .tuple_windows()
        .map(|(previous, next)| next - previous)
        .collect();

    let mean_inter_spike_interval = if intervals.is_empty() {
        None
    } else {
        Some(Statistics::mean(&intervals))
    };

    let inter_spike_interval_std_dev = if intervals.len() < 2 {
        None
    } else {
        Some(Statistics::std_dev(&intervals))
    };

    RunMetrics {
        spike_count,
        first_spike_time: outcome.spike_times.first().copied(),
        final_voltage: outcome.voltage_trace.last().copied(),
        mean_firing_rate,
        mean_inter_spike_interval,
        inter_spike_interval_std_dev,
    }
}

pub fn summarize_case(
    membrane: &MembraneParams,
    case: &DrugCase,
    duration_ms: f64,
) -> SimpleResult<CaseSummary> {
    let params = SimulationParams {
        membrane: *membrane,
        conductances: case.conductances,
    };

    let mut instance = create_instance(params)?;
    let outcome = instance.run_to(duration_ms)?;

    Ok(CaseSummary {
        label: case.label,
        metrics: compute_metrics(&outcome, membrane.dt),
    })
}

/// Runs every case once and summarizes it, preserving case order.
pub fn summarize_cases(
    membrane: &MembraneParams,
    cases: &[DrugCase],
    duration_ms: f64,
) -> SimpleResult<Vec<CaseSummary>> {
    cases
        .iter()
        .map(|case| summarize_case(membrane, case, duration_ms))
        .collect()
}

/// Same as [summarize_cases], but fans the independent runs out over worker
/// threads. Runs share no state, so this is purely a wall-clock
/// optimization; the result is identical to the sequential sweep.
pub fn summarize_cases_parallel(
    membrane: &MembraneParams,
    cases: &[DrugCase],
    duration_ms: f64,
    num_threads: Option<usize>,
) -> SimpleResult<Vec<CaseSummary>> {
    if cases.is_empty() {
        return Ok(Vec::new());
    }

    let num_threads = num_threads
        .unwrap_or_else(num_cpus::get)
        .clamp(1, cases.len());

    let (result_tx, result_rx) = mpsc_channel();

    thread::scope(|scope| {
        for thread_id in 0..num_threads {
            let result_tx = result_tx.clone();
            let case_range = get_partition_range(num_threads, thread_id, cases.len());

            scope.spawn(move || {
                for case_idx in case_range {
                    let summary = summarize_case(membrane, &cases[case_idx], duration_ms);

                    if result_tx.send((case_idx, summary)).is_err() {
                        return;
                    }
                }
            });
        }
    });

    drop(result_tx);

    result_rx
        .into_iter()
        .sorted_by_key(|(case_idx, _)| *case_idx)
        .map(|(_, summary)| summary)
        .collect()
}
