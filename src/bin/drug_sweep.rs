use std::time::Instant;

use pyramidal::pharmacology::STANDARD_CASES;
use pyramidal::summary;

#[path = "../scenario_params.rs"]
mod scenario_params;

fn main() {
    let params = scenario_params::get_scenario_params();
    let duration_ms = 100.0;

    let wall_start = Instant::now();

    let summaries =
        summary::summarize_cases_parallel(&params.membrane, &STANDARD_CASES, duration_ms, None)
            .unwrap();

    let wall_time = wall_start.elapsed();

    println!(
        "Summary (T = {:.0} ms, dt = {:.2} ms, Iext = {:.1})",
        duration_ms, params.membrane.dt, params.membrane.i_ext
    );
    println!(
        "{:<28} | {:>6} | {:>16} | {:>12}",
        "Case", "Spikes", "First spike (ms)", "Final V (mV)"
    );
    println!(
        "{}-+-{}-+-{}-+-{}",
        "-".repeat(28),
        "-".repeat(6),
        "-".repeat(16),
        "-".repeat(12)
    );

    for case_summary in &summaries {
        println!(
            "{:<28} | {:>6} | {:>16} | {:>12}",
            case_summary.label,
            case_summary.metrics.spike_count,
            fmt_ms(case_summary.metrics.first_spike_time),
            fmt_mv(case_summary.metrics.final_voltage)
        );
    }

    eprintln!("Sweep wall time: {:.3} ms", wall_time.as_secs_f64() * 1e3);
}

fn fmt_ms(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{:.2}", v))
}

fn fmt_mv(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{:.1}", v))
}
