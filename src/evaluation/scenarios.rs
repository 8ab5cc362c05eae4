use crate::evaluation::EvalScenario;
use crate::models::{RideStyle, RiderProfile};

const CENTRO: &str = "Praça Afonso Pena, São José dos Campos, SP";
const AQUARIUS: &str = "Av. Cassiano Ricardo, 601, São José dos Campos, SP";
const URBANOVA: &str = "Av. Shishima Hifumi, 2911, Urbanova, São José dos Campos, SP";

fn scenario(
    name: &str,
    origin: &str,
    distance_km: f64,
    profile: RiderProfile,
    style: RideStyle,
) -> EvalScenario {
    EvalScenario {
        name: name.to_string(),
        origin: origin.to_string(),
        distance_km,
        profile,
        style,
    }
}

/// Default evaluation scenarios across the three distance regimes
pub fn default_scenarios() -> Vec<EvalScenario> {
    vec![
        // --- Very short (halved factor) ---
        scenario(
            "centro_5km_beginner_family",
            CENTRO,
            5.0,
            RiderProfile::Beginner,
            RideStyle::Family,
        ),
        // --- Short regime, shrink pass territory ---
        scenario(
            "centro_8km_intermediate_urban",
            CENTRO,
            8.0,
            RiderProfile::Intermediate,
            RideStyle::Urban,
        ),
        scenario(
            "aquarius_10km_beginner_parks",
            AQUARIUS,
            10.0,
            RiderProfile::Beginner,
            RideStyle::Parks,
        ),
        scenario(
            "centro_15km_intermediate_urban",
            CENTRO,
            15.0,
            RiderProfile::Intermediate,
            RideStyle::Urban,
        ),
        // --- Medium regime ---
        scenario(
            "aquarius_20km_advanced_mountain",
            AQUARIUS,
            20.0,
            RiderProfile::Advanced,
            RideStyle::Mountain,
        ),
        scenario(
            "urbanova_25km_intermediate_parks",
            URBANOVA,
            25.0,
            RiderProfile::Intermediate,
            RideStyle::Parks,
        ),
        // --- Long regime (no landmark probes) ---
        scenario(
            "centro_30km_advanced_urban",
            CENTRO,
            30.0,
            RiderProfile::Advanced,
            RideStyle::Urban,
        ),
        scenario(
            "urbanova_40km_professional_mountain",
            URBANOVA,
            40.0,
            RiderProfile::Professional,
            RideStyle::Mountain,
        ),
    ]
}
