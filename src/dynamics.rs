use crate::params::{ConductanceParams, MembraneParams};
use crate::util::{boltzmann, vtrap};

/// M-current relaxation time (ms), voltage-independent
const TAU_P: f64 = 100.0;

const P_V_HALF: f64 = -35.0;
const P_SLOPE: f64 = 10.0;
const NAP_V_HALF: f64 = -55.0;
const NAP_SLOPE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatingState {
    /// Fast sodium activation
    pub m: f64,
    /// Fast sodium inactivation
    pub h: f64,
    /// Delayed-rectifier potassium activation
    pub n: f64,
    /// Muscarinic potassium activation
    pub p: f64,
}

impl GatingState {
    pub fn resting() -> Self {
        Self {
            m: 0.05,
            h: 0.60,
            n: 0.318,
            p: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Derivatives {
    pub dv_dt: f64,
    pub gating: GatingState,
}

#[derive(Debug, Clone, Copy)]
pub struct IonicCurrents {
    pub i_na: f64,
    pub i_k: f64,
    pub i_l: f64,
    pub i_na_p: f64,
    pub i_m: f64,
}

impl IonicCurrents {
    pub fn total(&self) -> f64 {
        self.i_na + self.i_k + self.i_l + self.i_na_p + self.i_m
    }
}

/// Instantaneous persistent-sodium activation. Recomputed from voltage every
/// step; not a state variable.
fn m_na_p_inf(voltage: f64) -> f64 {
    boltzmann(voltage, NAP_V_HALF, NAP_SLOPE)
}

fn alpha_m(voltage: f64) -> f64 {
    0.1 * vtrap(voltage + 40.0, 10.0)
}

fn beta_m(voltage: f64) -> f64 {
    4.0 * (-(voltage + 65.0) / 18.0).exp()
}

fn alpha_h(voltage: f64) -> f64 {
    0.07 * (-(voltage + 65.0) / 20.0).exp()
}

fn beta_h(voltage: f64) -> f64 {
    boltzmann(voltage, -35.0, 10.0)
}

fn alpha_n(voltage: f64) -> f64 {
    0.01 * vtrap(voltage + 55.0, 10.0)
}

fn beta_n(voltage: f64) -> f64 {
    0.125 * (-(voltage + 65.0) / 80.0).exp()
}

pub fn ionic_currents(
    voltage: f64,
    gating: &GatingState,
    conductances: &ConductanceParams,
    membrane: &MembraneParams,
) -> IonicCurrents {
    let m3 = gating.m * gating.m * gating.m;
    let n2 = gating.n * gating.n;
    let n4 = n2 * n2;

    IonicCurrents {
        i_na: conductances.g_na * m3 * gating.h * (voltage - membrane.e_na),
        i_k: membrane.g_k * n4 * (voltage - membrane.e_k),
        i_l: membrane.g_l * (voltage - membrane.e_l),
        i_na_p: conductances.g_na_p * m_na_p_inf(voltage) * (voltage - membrane.e_na),
        i_m: membrane.g_m * gating.p * (voltage - membrane.e_k),
    }
}

/// Evaluates the membrane equation at the given voltage and advances the
/// gating variables by one explicit-Euler step. Pure function of its inputs.
///
/// Gating variables stay frozen at their current values while
/// `time <= t_settle`; the updated gates feed the current computation of the
/// same call.
pub fn evaluate(
    voltage: f64,
    time: f64,
    gating: GatingState,
    conductances: &ConductanceParams,
    membrane: &MembraneParams,
) -> Derivatives {
    let a_m = alpha_m(voltage);
    let b_m = beta_m(voltage);
    let m_inf = a_m / (a_m + b_m);
    let tau_m = 1.0 / (a_m + b_m);

    let a_h = alpha_h(voltage);
    let b_h = beta_h(voltage);
    let h_inf = a_h / (a_h + b_h);
    let tau_h = 1.0 / (a_h + b_h);

    let a_n = alpha_n(voltage);
    let b_n = beta_n(voltage);
    let n_inf = a_n / (a_n + b_n);
    let tau_n = 1.0 / (a_n + b_n);

    let p_inf = boltzmann(voltage, P_V_HALF, P_SLOPE);

    let mut gating = gating;

    if time > membrane.t_settle {
        gating.m += membrane.dt * (m_inf - gating.m) / tau_m;
        gating.h += membrane.dt * (h_inf - gating.h) / tau_h;
        gating.n += membrane.dt * (n_inf - gating.n) / tau_n;
        gating.p += membrane.dt * (p_inf - gating.p) / TAU_P;
    }

    let currents = ionic_currents(voltage, &gating, conductances, membrane);
    let dv_dt = (membrane.i_ext - currents.total()) / membrane.c_m;

    Derivatives { dv_dt, gating }
}
