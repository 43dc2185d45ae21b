use crate::params::ConductanceParams;
use serde::{Deserialize, Serialize};

pub const BASELINE_CONDUCTANCES: ConductanceParams = ConductanceParams {
    g_na: 50.0,
    g_na_p: 0.15,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dose {
    MicroMolar100,
    MicroMolar200,
    MicroMolar300,
}

/// One anticonvulsant application. Valproate attenuates the fast sodium
/// conductance, lamotrigine the persistent sodium conductance, a combination
/// both at the same dose rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrugApplication {
    Valproate(Dose),
    Lamotrigine(Dose),
    Combination(Dose),
}

impl DrugApplication {
    pub fn apply(&self, conductances: ConductanceParams) -> ConductanceParams {
        match *self {
            DrugApplication::Valproate(dose) => ConductanceParams {
                g_na: conductances.g_na * (1.0 - valproate_reduction(dose)),
                ..conductances
            },
            DrugApplication::Lamotrigine(dose) => ConductanceParams {
                g_na_p: conductances.g_na_p * (1.0 - lamotrigine_reduction(dose)),
                ..conductances
            },
            DrugApplication::Combination(dose) => DrugApplication::Lamotrigine(dose)
                .apply(DrugApplication::Valproate(dose).apply(conductances)),
        }
    }
}

fn valproate_reduction(dose: Dose) -> f64 {
    match dose {
        Dose::MicroMolar100 => 0.20,
        Dose::MicroMolar200 => 0.30,
        Dose::MicroMolar300 => 0.40,
    }
}

fn lamotrigine_reduction(dose: Dose) -> f64 {
    match dose {
        Dose::MicroMolar100 => 0.50,
        Dose::MicroMolar200 => 0.65,
        Dose::MicroMolar300 => 0.75,
    }
}

/// Folds a sequence of dose selections over a running conductance pair.
/// Successive applications compound multiplicatively, matching repeated
/// selection in an interactive session.
pub fn apply_applications(
    initial: ConductanceParams,
    applications: &[DrugApplication],
) -> ConductanceParams {
    applications
        .iter()
        .fold(initial, |conductances, application| {
            application.apply(conductances)
        })
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DrugCase {
    pub label: &'static str,
    pub conductances: ConductanceParams,
}

/// The standard drug/dose comparison set. Fixed configuration data; the
/// effective conductances are spelled out per row rather than derived.
pub const STANDARD_CASES: [DrugCase; 10] = [
    DrugCase {
        label: "Normal",
        conductances: ConductanceParams {
            g_na: 50.0,
            g_na_p: 0.15,
        },
    },
    DrugCase {
        label: "Valproate 100µM",
        conductances: ConductanceParams {
            g_na: 50.0 * (1.0 - 0.20),
            g_na_p: 0.15,
        },
    },
    DrugCase {
        label: "Valproate 200µM",
        conductances: ConductanceParams {
            g_na: 50.0 * (1.0 - 0.30),
            g_na_p: 0.15,
        },
    },
    DrugCase {
        label: "Valproate 300µM",
        conductances: ConductanceParams {
            g_na: 50.0 * (1.0 - 0.40),
            g_na_p: 0.15,
        },
    },
    DrugCase {
        label: "Lamotrigine 100µM",
        conductances: ConductanceParams {
            g_na: 50.0,
            g_na_p: 0.15 * (1.0 - 0.50),
        },
    },
    DrugCase {
        label: "Lamotrigine 200µM",
        conductances: ConductanceParams {
            g_na: 50.0,
            g_na_p: 0.15 * (1.0 - 0.65),
        },
    },
    DrugCase {
        label: "Lamotrigine 300µM",
        conductances: ConductanceParams {
            g_na: 50.0,
            g_na_p: 0.15 * (1.0 - 0.75),
        },
    },
    DrugCase {
        label: "Combo 100+100µM",
        conductances: ConductanceParams {
            g_na: 50.0 * (1.0 - 0.20),
            g_na_p: 0.15 * (1.0 - 0.50),
        },
    },
    DrugCase {
        label: "Combo 200+200µM",
        conductances: ConductanceParams {
            g_na: 50.0 * (1.0 - 0.30),
            g_na_p: 0.15 * (1.0 - 0.65),
        },
    },
    DrugCase {
        label: "Combo 300+300µM",
        conductances: ConductanceParams {
            g_na: 50.0 * (1.0 - 0.40),
            g_na_p: 0.15 * (1.0 - 0.75),
        },
    },
];
