use pyramidal::instance::{create_instance, RunOutcome};
use pyramidal::state_snapshot::StateSnapshot;
use serde::Serialize;

#[path = "../scenario_params.rs"]
mod scenario_params;

#[derive(Serialize)]
struct TraceDump {
    outcome: RunOutcome,
    snapshot: StateSnapshot,
}

fn main() {
    let mut instance = create_instance(scenario_params::get_scenario_params()).unwrap();

    let outcome = instance.run_to(100.0).unwrap();
    let snapshot = instance.state_snapshot();

    eprintln!(
        "{} spikes over {} samples",
        outcome.spike_times.len(),
        outcome.voltage_trace.len()
    );

    let dump = TraceDump { outcome, snapshot };
    println!("{}", serde_json::to_string(&dump).unwrap());
}
