use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walk,
    #[default]
    Bike,
}

impl TransportMode {
    /// Returns the Google Maps travel mode for this transport mode
    pub fn google_maps_mode(&self) -> &'static str {
        match self {
            TransportMode::Walk => "walking",
            TransportMode::Bike => "bicycling",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Walk => write!(f, "walk"),
            TransportMode::Bike => write!(f, "bike"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" | "walking" => Ok(TransportMode::Walk),
            "bike" | "cycling" | "bicycle" | "bicycling" => Ok(TransportMode::Bike),
            _ => Err(format!("Invalid transport mode: '{}'", s)),
        }
    }
}

/// Rider experience level. Scales waypoint offsets: stronger riders get
/// wider loops for the same target distance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiderProfile {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Professional,
}

impl RiderProfile {
    /// Offset multiplier, strictly increasing with experience
    pub fn factor(&self) -> f64 {
        match self {
            RiderProfile::Beginner => 0.6,
            RiderProfile::Intermediate => 0.8,
            RiderProfile::Advanced => 1.0,
            RiderProfile::Professional => 1.2,
        }
    }
}

impl fmt::Display for RiderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiderProfile::Beginner => write!(f, "beginner"),
            RiderProfile::Intermediate => write!(f, "intermediate"),
            RiderProfile::Advanced => write!(f, "advanced"),
            RiderProfile::Professional => write!(f, "professional"),
        }
    }
}

impl FromStr for RiderProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "iniciante" => Ok(RiderProfile::Beginner),
            "intermediate" | "intermediário" | "intermediario" => Ok(RiderProfile::Intermediate),
            "advanced" | "avançado" | "avancado" => Ok(RiderProfile::Advanced),
            "professional" | "profissional" => Ok(RiderProfile::Professional),
            _ => Err(format!("Invalid rider profile: '{}'", s)),
        }
    }
}

/// Directional spread applied to waypoint offsets.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct StyleBias {
    pub lat_bias: f64,
    pub lng_bias: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RideStyle {
    #[default]
    Urban,
    Mountain,
    Parks,
    Family,
}

impl RideStyle {
    pub fn bias(&self) -> StyleBias {
        let (lat_bias, lng_bias) = match self {
            RideStyle::Urban => (0.8, 1.2),
            RideStyle::Mountain => (1.5, 0.8),
            RideStyle::Parks => (1.2, 1.0),
            RideStyle::Family => (0.6, 0.6),
        };
        StyleBias { lat_bias, lng_bias }
    }
}

impl fmt::Display for RideStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideStyle::Urban => write!(f, "urban"),
            RideStyle::Mountain => write!(f, "mountain"),
            RideStyle::Parks => write!(f, "parks"),
            RideStyle::Family => write!(f, "family"),
        }
    }
}

impl FromStr for RideStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urban" | "urbano" => Ok(RideStyle::Urban),
            "mountain" | "montanha" => Ok(RideStyle::Mountain),
            "parks" | "parques" => Ok(RideStyle::Parks),
            "family" | "familiar" => Ok(RideStyle::Family),
            _ => Err(format!("Invalid ride style: '{}'", s)),
        }
    }
}

/// Upper bound on accepted target distances (km)
pub const MAX_TARGET_DISTANCE_KM: f64 = 100.0;

/// One planning request. Built by the caller and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlanRequest {
    /// Free-text start (and return) address
    pub origin: String,
    pub target_distance_km: f64,
    #[serde(default)]
    pub rider_profile: RiderProfile,
    #[serde(default)]
    pub style: RideStyle,
    /// Named landmarks for the landmark fallback rung.
    /// Empty means "let the landmark catalog suggest some".
    #[serde(default)]
    pub landmarks: Vec<String>,
    #[serde(default)]
    pub mode: TransportMode,
}

impl RoutePlanRequest {
    pub fn new(
        origin: impl Into<String>,
        target_distance_km: f64,
        rider_profile: RiderProfile,
        style: RideStyle,
    ) -> Self {
        RoutePlanRequest {
            origin: origin.into(),
            target_distance_km,
            rider_profile,
            style,
            landmarks: Vec::new(),
            mode: TransportMode::Bike,
        }
    }

    pub fn with_landmarks(mut self, landmarks: Vec<String>) -> Self {
        self.landmarks = landmarks;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.origin.trim().is_empty() {
            return Err("origin must not be empty".to_string());
        }
        if !self.target_distance_km.is_finite()
            || self.target_distance_km <= 0.0
            || self.target_distance_km > MAX_TARGET_DISTANCE_KM
        {
            return Err(format!(
                "target_distance_km must be between 0 and {}",
                MAX_TARGET_DISTANCE_KM
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let mut req = RoutePlanRequest::new(
            "Praça Afonso Pena, São José dos Campos",
            15.0,
            RiderProfile::Intermediate,
            RideStyle::Urban,
        );
        assert!(req.validate().is_ok());

        req.target_distance_km = 0.0;
        assert!(req.validate().is_err());

        req.target_distance_km = 150.0;
        assert!(req.validate().is_err());

        req.target_distance_km = f64::NAN;
        assert!(req.validate().is_err());

        req.target_distance_km = 10.0;
        req.origin = "   ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_profile_factor_is_monotonic() {
        let factors: Vec<f64> = [
            RiderProfile::Beginner,
            RiderProfile::Intermediate,
            RiderProfile::Advanced,
            RiderProfile::Professional,
        ]
        .iter()
        .map(|p| p.factor())
        .collect();

        assert!(factors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_style_biases() {
        let urban = RideStyle::Urban.bias();
        assert!(urban.lng_bias > urban.lat_bias);

        let mountain = RideStyle::Mountain.bias();
        assert!(mountain.lat_bias > mountain.lng_bias);

        let family = RideStyle::Family.bias();
        assert!(family.lat_bias < 1.0 && family.lng_bias < 1.0);
    }

    #[test]
    fn test_parses_portuguese_labels() {
        assert_eq!(
            "Intermediário".parse::<RiderProfile>().unwrap(),
            RiderProfile::Intermediate
        );
        assert_eq!(
            "avancado".parse::<RiderProfile>().unwrap(),
            RiderProfile::Advanced
        );
        assert_eq!("montanha".parse::<RideStyle>().unwrap(), RideStyle::Mountain);
        assert_eq!("FAMILY".parse::<RideStyle>().unwrap(), RideStyle::Family);
        assert!("downhill".parse::<RideStyle>().is_err());
    }

    #[test]
    fn test_transport_mode_google_mode() {
        assert_eq!(TransportMode::Bike.google_maps_mode(), "bicycling");
        assert_eq!(TransportMode::Walk.google_maps_mode(), "walking");
        assert_eq!(TransportMode::default(), TransportMode::Bike);
        assert_eq!("cycling".parse::<TransportMode>().unwrap(), TransportMode::Bike);
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let req: RoutePlanRequest = serde_json::from_str(
            r#"{"origin": "Rua Sete de Setembro, 100", "target_distance_km": 8.0}"#,
        )
        .unwrap();
        assert_eq!(req.rider_profile, RiderProfile::Intermediate);
        assert_eq!(req.style, RideStyle::Urban);
        assert_eq!(req.mode, TransportMode::Bike);
        assert!(req.landmarks.is_empty());
    }
}
