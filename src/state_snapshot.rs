use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub time: f64,
    pub voltage: f64,
    pub refractory_remaining: f64,
    pub gating: GatingSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatingSnapshot {
    pub m: f64,
    pub h: f64,
    pub n: f64,
    pub p: f64,
}
