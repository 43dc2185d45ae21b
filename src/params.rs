use serde::{Deserialize, Serialize};
use simple_error::SimpleError;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationParams {
    pub membrane: MembraneParams,
    pub conductances: ConductanceParams,
}

/// The two conductances modulated by drug application. Everything else about
/// the membrane is in [MembraneParams].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConductanceParams {
    /// Fast sodium conductance (mS/cm²)
    pub g_na: f64,
    /// Persistent sodium conductance (mS/cm²)
    pub g_na_p: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MembraneParams {
    /// Delayed-rectifier potassium conductance (mS/cm²)
    pub g_k: f64,
    /// Leak conductance (mS/cm²)
    pub g_l: f64,
    /// Muscarinic potassium conductance (mS/cm²)
    pub g_m: f64,
    /// Sodium reversal potential (mV)
    pub e_na: f64,
    /// Potassium reversal potential (mV)
    pub e_k: f64,
    /// Leak reversal potential (mV)
    pub e_l: f64,
    /// Membrane capacitance (µF/cm²)
    pub c_m: f64,
    /// Externally applied current (µA/cm²)
    pub i_ext: f64,
    /// Initial membrane potential (mV)
    pub v_init: f64,
    /// Spike detection threshold (mV)
    pub v_threshold: f64,
    /// Post-spike reset potential (mV)
    pub v_reset: f64,
    /// Refractory period (ms)
    pub t_refractory: f64,
    /// Gating variables stay frozen while the simulation clock is at or
    /// below this time (ms)
    pub t_settle: f64,
    /// Integration timestep (ms)
    pub dt: f64,
}

impl Default for ConductanceParams {
    fn default() -> Self {
        Self {
            g_na: 50.0,
            g_na_p: 0.15,
        }
    }
}

impl Default for MembraneParams {
    fn default() -> Self {
        Self {
            g_k: 5.0,
            g_l: 0.05,
            g_m: 0.07,
            e_na: 50.0,
            e_k: -90.0,
            e_l: -70.0,
            c_m: 1.0,
            i_ext: 14.0,
            v_init: -65.0,
            v_threshold: -20.0,
            v_reset: -65.0,
            t_refractory: 2.0,
            t_settle: 1.0,
            dt: 0.01,
        }
    }
}

pub fn validate_simulation_params(params: &SimulationParams) -> Result<(), SimpleError> {
    validate_membrane_params(&params.membrane)?;
    validate_conductance_params(&params.conductances)?;

    Ok(())
}

fn validate_membrane_params(membrane_params: &MembraneParams) -> Result<(), SimpleError> {
    if membrane_params.dt <= 0.0 {
        return Err(SimpleError::new("dt must be strictly positive"));
    }

    if membrane_params.c_m <= 0.0 {
        return Err(SimpleError::new("c_m must be strictly positive"));
    }

    if membrane_params.t_refractory <= 0.0 {
        return Err(SimpleError::new("t_refractory must be strictly positive"));
    }

    if membrane_params.t_settle < 0.0 {
        return Err(SimpleError::new("t_settle must not be negative"));
    }

    if membrane_params.g_k < 0.0 {
        return Err(SimpleError::new("g_k must not be negative"));
    }

    if membrane_params.g_l < 0.0 {
        return Err(SimpleError::new("g_l must not be negative"));
    }

    if membrane_params.g_m < 0.0 {
        return Err(SimpleError::new("g_m must not be negative"));
    }

    if membrane_params.v_reset >= membrane_params.v_threshold {
        return Err(SimpleError::new("v_reset must be less than v_threshold"));
    }

    Ok(())
}

fn validate_conductance_params(
    conductance_params: &ConductanceParams,
) -> Result<(), SimpleError> {
    if conductance_params.g_na < 0.0 {
        return Err(SimpleError::new("g_na must not be negative"));
    }

    if conductance_params.g_na_p < 0.0 {
        return Err(SimpleError::new("g_na_p must not be negative"));
    }

    Ok(())
}
