//! Distance tolerance decisions shared by every search rung.

use crate::constants::{NEAR_PERFECT_KM, TIE_EPSILON_KM, TOLERANCE_KM};
use crate::models::{CandidateRoute, SearchStrategy};

pub fn distance_error(total_distance_km: f64, target_distance_km: f64) -> f64 {
    (total_distance_km - target_distance_km).abs()
}

/// Within the reported tolerance (inclusive)
pub fn is_acceptable(error_km: f64) -> bool {
    error_km <= TOLERANCE_KM
}

/// Close enough that searching further is wasted oracle calls
pub fn is_near_perfect(error_km: f64) -> bool {
    error_km <= NEAR_PERFECT_KM
}

/// Strictly smaller error wins. On a tie an undershoot beats an overshoot;
/// otherwise the incumbent stays.
pub fn is_better(candidate_km: f64, incumbent_km: f64, target_distance_km: f64) -> bool {
    let candidate_error = distance_error(candidate_km, target_distance_km);
    let incumbent_error = distance_error(incumbent_km, target_distance_km);

    if (candidate_error - incumbent_error).abs() <= TIE_EPSILON_KM {
        return candidate_km <= target_distance_km && incumbent_km > target_distance_km;
    }
    candidate_error < incumbent_error
}

/// Best route seen so far in one search run
#[derive(Debug, Clone)]
pub struct BestCandidate {
    pub route: CandidateRoute,
    pub error_km: f64,
    pub strategy: SearchStrategy,
}

#[derive(Debug)]
pub struct BestTracker {
    target_distance_km: f64,
    best: Option<BestCandidate>,
}

impl BestTracker {
    pub fn new(target_distance_km: f64) -> Self {
        Self {
            target_distance_km,
            best: None,
        }
    }

    /// Offer a route; returns true when it replaced the incumbent
    pub fn offer(&mut self, route: CandidateRoute, strategy: SearchStrategy) -> bool {
        let improves = match &self.best {
            None => true,
            Some(current) => is_better(
                route.total_distance_km,
                current.route.total_distance_km,
                self.target_distance_km,
            ),
        };

        if improves {
            let error_km = distance_error(route.total_distance_km, self.target_distance_km);
            self.best = Some(BestCandidate {
                route,
                error_km,
                strategy,
            });
        }
        improves
    }

    pub fn best(&self) -> Option<&BestCandidate> {
        self.best.as_ref()
    }

    pub fn has_acceptable(&self) -> bool {
        self.best.as_ref().is_some_and(|b| is_acceptable(b.error_km))
    }

    pub fn into_best(self) -> Option<BestCandidate> {
        self.best
    }
}
