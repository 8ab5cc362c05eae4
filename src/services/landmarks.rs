//! Named landmarks used as alternate probes and as the landmark fallback rung.

use crate::models::RiderProfile;

const DEFAULT_LOCALITY: &str = "São José dos Campos, SP";

/// Ordered most central first
const CENTRAL_LANDMARKS: [&str; 4] = [
    "Praça Afonso Pena",
    "Parque Vicentina Aranha",
    "Parque Santos Dumont",
    "Mercado Municipal",
];

/// Targets up to this distance get a single central landmark
const SINGLE_LANDMARK_MAX_KM: f64 = 10.0;
/// Targets up to this distance get the two most central landmarks
const PAIR_LANDMARK_MAX_KM: f64 = 15.0;
/// Profile lists are truncated to two landmarks up to this distance
const TRUNCATE_LANDMARKS_MAX_KM: f64 = 20.0;

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct LandmarkCatalog {
    central: Vec<String>,
    by_profile: Vec<(RiderProfile, Vec<String>)>,
    locality: Option<String>,
}

impl Default for LandmarkCatalog {
    fn default() -> Self {
        LandmarkCatalog {
            central: owned(&CENTRAL_LANDMARKS),
            by_profile: vec![
                (
                    RiderProfile::Beginner,
                    owned(&[
                        "Parque Vicentina Aranha",
                        "Praça Afonso Pena",
                        "Parque Santos Dumont",
                    ]),
                ),
                (
                    RiderProfile::Intermediate,
                    owned(&[
                        "Parque Santos Dumont",
                        "Centro da Juventude",
                        "Praça Afonso Pena",
                    ]),
                ),
                (
                    RiderProfile::Advanced,
                    owned(&[
                        "Parque Ribeirão Vermelho",
                        "Parque da Cidade",
                        "Parque Vicentina Aranha",
                    ]),
                ),
                (
                    RiderProfile::Professional,
                    owned(&[
                        "Jardim Aquarius",
                        "Banhado",
                        "Urbanova",
                        "Parque da Cidade",
                    ]),
                ),
            ],
            locality: Some(DEFAULT_LOCALITY.to_string()),
        }
    }
}

impl LandmarkCatalog {
    /// Catalog over a custom library. Suggestions for every profile come
    /// from the front of `names`.
    pub fn new(names: Vec<String>) -> Self {
        LandmarkCatalog {
            central: names,
            by_profile: Vec::new(),
            locality: None,
        }
    }

    pub fn with_locality(mut self, locality: Option<String>) -> Self {
        self.locality = locality;
        self
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.central.is_empty()
    }

    /// Append the locality unless the name already mentions it
    pub fn qualify(&self, name: &str) -> String {
        let name = name.trim();
        match &self.locality {
            Some(locality) if !name.contains(locality.as_str()) => {
                format!("{}, {}", name, locality)
            }
            _ => name.to_string(),
        }
    }

    pub fn qualify_all(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter(|n| !n.trim().is_empty())
            .map(|n| self.qualify(n))
            .collect()
    }

    /// Qualified names used as single-landmark probes
    pub fn probes(&self) -> Vec<String> {
        self.qualify_all(&self.central)
    }

    /// Landmark list for the fallback rung when the caller supplied none
    pub fn suggest(&self, target_distance_km: f64, profile: RiderProfile) -> Vec<String> {
        let names: Vec<String> = if target_distance_km <= SINGLE_LANDMARK_MAX_KM {
            self.central.iter().take(1).cloned().collect()
        } else if target_distance_km <= PAIR_LANDMARK_MAX_KM {
            self.central.iter().take(2).cloned().collect()
        } else {
            let list = self
                .by_profile
                .iter()
                .find(|(p, _)| *p == profile)
                .map(|(_, names)| names.clone())
                .unwrap_or_else(|| self.central.clone());

            if target_distance_km <= TRUNCATE_LANDMARKS_MAX_KM {
                list.into_iter().take(2).collect()
            } else {
                list
            }
        };

        self.qualify_all(&names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_targets_use_single_central_landmark() {
        let catalog = LandmarkCatalog::default();
        assert_eq!(
            catalog.suggest(8.0, RiderProfile::Professional),
            vec!["Praça Afonso Pena, São José dos Campos, SP".to_string()]
        );
        assert_eq!(catalog.suggest(12.0, RiderProfile::Beginner).len(), 2);
    }

    #[test]
    fn test_long_targets_follow_profile() {
        let catalog = LandmarkCatalog::default();
        let advanced = catalog.suggest(25.0, RiderProfile::Advanced);
        assert_eq!(advanced.len(), 2);
        assert!(advanced[0].starts_with("Parque Ribeirão Vermelho"));

        let pro = catalog.suggest(40.0, RiderProfile::Professional);
        assert_eq!(pro.len(), 4);
        assert!(pro[0].starts_with("Jardim Aquarius"));
    }

    #[test]
    fn test_qualify_skips_names_with_locality() {
        let catalog = LandmarkCatalog::default();
        assert_eq!(
            catalog.qualify("Banhado, São José dos Campos, SP"),
            "Banhado, São José dos Campos, SP"
        );
        assert_eq!(catalog.qualify("Banhado"), "Banhado, São José dos Campos, SP");

        let bare = LandmarkCatalog::new(vec!["Ibirapuera".to_string()]);
        assert_eq!(bare.qualify("Ibirapuera"), "Ibirapuera");
    }

    #[test]
    fn test_custom_catalog_suggestions() {
        let catalog = LandmarkCatalog::new(vec![
            "Parque Ibirapuera".to_string(),
            "MASP".to_string(),
            "Parque Villa-Lobos".to_string(),
        ])
        .with_locality(Some("São Paulo, SP".to_string()));

        assert_eq!(
            catalog.suggest(30.0, RiderProfile::Advanced),
            vec![
                "Parque Ibirapuera, São Paulo, SP".to_string(),
                "MASP, São Paulo, SP".to_string(),
                "Parque Villa-Lobos, São Paulo, SP".to_string(),
            ]
        );
        assert_eq!(catalog.probes().len(), 3);
    }
}
