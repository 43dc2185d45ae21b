use crate::dynamics;
use crate::dynamics::GatingState;
use crate::params;
use crate::params::ConductanceParams;
use crate::params::MembraneParams;
use crate::params::SimulationParams;
use crate::state_snapshot::GatingSnapshot;
use crate::state_snapshot::StateSnapshot;
use log::debug;
use serde::{Deserialize, Serialize};
use simple_error::SimpleResult;
use simple_error::{try_with, SimpleError};

pub fn create_instance(params: SimulationParams) -> Result<Instance, SimpleError> {
    try_with!(
        params::validate_simulation_params(&params),
        "invalid simulation parameters"
    );

    Ok(Instance {
        voltage: params.membrane.v_init,
        gating: GatingState::resting(),
        refractory_remaining: 0.0,
        step: 0,
        params,
    })
}

/// Runs a neuron with the reference membrane parameters and the given
/// conductances for the given duration. The single integration entry point
/// for callers that do not need step-level control.
pub fn run(conductances: ConductanceParams, duration_ms: f64) -> SimpleResult<RunOutcome> {
    let params = SimulationParams {
        membrane: MembraneParams::default(),
        conductances,
    };

    let mut instance = create_instance(params)?;
    instance.run_to(duration_ms)
}

/// One fixed-duration run's state. Constructed fresh per run and discarded
/// afterwards; never shared across runs.
pub struct Instance {
    params: SimulationParams,
    voltage: f64,
    gating: GatingState,
    refractory_remaining: f64,
    step: usize,
}

#[derive(Debug, Clone)]
pub struct TickResult {
    pub t: f64,
    pub voltage: f64,
    pub spiked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Timestamps of detected upward threshold crossings (ms), strictly
    /// increasing
    pub spike_times: Vec<f64>,
    /// One membrane potential sample per step (mV), chronological
    pub voltage_trace: Vec<f64>,
}

impl Instance {
    pub fn get_time(&self) -> f64 {
        self.step as f64 * self.params.membrane.dt
    }

    pub fn get_voltage(&self) -> f64 {
        self.voltage
    }

    pub fn is_refractory(&self) -> bool {
        self.refractory_remaining > 0.0
    }

    /// Advances the simulation by one timestep.
    ///
    /// While refractory, the evaluator is invoked with the reset potential in
    /// place of the live voltage so that the gating variables keep evolving,
    /// and the reported voltage sample is the held value from window entry.
    pub fn tick(&mut self) -> TickResult {
        let membrane = self.params.membrane;
        let conductances = self.params.conductances;
        let t = self.step as f64 * membrane.dt;

        let result = if self.refractory_remaining > 0.0 {
            let derivs =
                dynamics::evaluate(membrane.v_reset, t, self.gating, &conductances, &membrane);
            self.gating = derivs.gating;
            self.refractory_remaining -= membrane.dt;

            TickResult {
                t,
                voltage: self.voltage,
                spiked: false,
            }
        } else {
            let old_voltage = self.voltage;
            let derivs =
                dynamics::evaluate(self.voltage, t, self.gating, &conductances, &membrane);
            self.gating = derivs.gating;
            self.voltage += membrane.dt * derivs.dv_dt;

            let spiked =
                old_voltage < membrane.v_threshold && self.voltage >= membrane.v_threshold;

            if spiked {
                self.refractory_remaining = membrane.t_refractory;
                self.voltage = membrane.v_reset;
            }

            TickResult {
                t,
                voltage: self.voltage,
                spiked,
            }
        };

        self.step += 1;

        result
    }

    /// Ticks until the simulation clock reaches t_stop_ms, accumulating spike
    /// timestamps and the voltage trace. The executed step count is
    /// ceil(t_stop_ms / dt) on a fresh instance.
    pub fn run_to(&mut self, t_stop_ms: f64) -> SimpleResult<RunOutcome> {
        if !t_stop_ms.is_finite() || t_stop_ms <= 0.0 {
            return Err(SimpleError::new("t_stop_ms must be strictly positive"));
        }

        let num_steps = (t_stop_ms / self.params.membrane.dt).ceil() as usize;

        let mut outcome = RunOutcome {
            spike_times: Vec::new(),
            voltage_trace: Vec::with_capacity(num_steps.saturating_sub(self.step)),
        };

        while self.step < num_steps {
            let tick_result = self.tick();

            if tick_result.spiked {
                debug!("spike at t = {:.2} ms", tick_result.t);
                outcome.spike_times.push(tick_result.t);
            }

            outcome.voltage_trace.push(tick_result.voltage);
        }

        Ok(outcome)
    }

    pub fn state_snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            time: self.get_time(),
            voltage: self.voltage,
            refractory_remaining: self.refractory_remaining,
            gating: GatingSnapshot {
                m: self.gating.m,
                h: self.gating.h,
                n: self.gating.n,
                p: self.gating.p,
            },
        }
    }
}
