//! Deterministic waypoint sets to try, most promising first.
//!
//! The geometric part scales cardinal offsets by a distance-derived factor
//! (degrees), the rider profile factor and the ride style bias, then sweeps a
//! list of scalar multipliers from small to large. Named landmark probes follow
//! for targets under [`LANDMARK_PROBE_MAX_KM`]. Nothing here calls the oracle.

use crate::constants::*;
use crate::models::{GeoPoint, RideStyle, RiderProfile, SearchStrategy, StyleBias, WaypointSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePattern {
    North,
    South,
    East,
    West,
    /// Two waypoints: one north, one east
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    /// Single waypoint offset on both axes
    Diagonal,
    Landmark,
    /// No waypoints at all
    OriginOnly,
}

const SINGLE_PATTERNS: [ProbePattern; 4] = [
    ProbePattern::North,
    ProbePattern::South,
    ProbePattern::East,
    ProbePattern::West,
];

const PAIR_PATTERNS: [ProbePattern; 4] = [
    ProbePattern::NorthEast,
    ProbePattern::NorthWest,
    ProbePattern::SouthEast,
    ProbePattern::SouthWest,
];

/// Singles before pairs: one waypoint detours less, so it tends to undershoot
const SHORT_TARGET_PATTERNS: [ProbePattern; 8] = [
    ProbePattern::North,
    ProbePattern::South,
    ProbePattern::East,
    ProbePattern::West,
    ProbePattern::NorthEast,
    ProbePattern::NorthWest,
    ProbePattern::SouthEast,
    ProbePattern::SouthWest,
];

impl ProbePattern {
    /// (lat, lng) offsets in degrees, one per waypoint
    fn offsets(&self, lat_off: f64, lng_off: f64) -> Vec<(f64, f64)> {
        match self {
            ProbePattern::North => vec![(lat_off, 0.0)],
            ProbePattern::South => vec![(-lat_off, 0.0)],
            ProbePattern::East => vec![(0.0, lng_off)],
            ProbePattern::West => vec![(0.0, -lng_off)],
            ProbePattern::NorthEast => vec![(lat_off, 0.0), (0.0, lng_off)],
            ProbePattern::NorthWest => vec![(lat_off, 0.0), (0.0, -lng_off)],
            ProbePattern::SouthEast => vec![(-lat_off, 0.0), (0.0, lng_off)],
            ProbePattern::SouthWest => vec![(-lat_off, 0.0), (0.0, -lng_off)],
            ProbePattern::Diagonal => vec![(lat_off * DIAGONAL_SHARE, lng_off * DIAGONAL_SHARE)],
            ProbePattern::Landmark | ProbePattern::OriginOnly => vec![],
        }
    }
}

/// One entry of the candidate sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub waypoints: WaypointSet,
    pub pattern: ProbePattern,
    /// Multiplier for geometric candidates, divisor for shrink-pass ones
    pub scale: Option<f64>,
    pub strategy: SearchStrategy,
}

#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    origin: GeoPoint,
    target_distance_km: f64,
    profile: RiderProfile,
    bias: StyleBias,
    max_geometric: usize,
    landmark_probes: Vec<String>,
}

impl CandidateGenerator {
    pub fn new(
        origin: GeoPoint,
        target_distance_km: f64,
        profile: RiderProfile,
        style: RideStyle,
    ) -> Self {
        Self {
            origin,
            target_distance_km,
            profile,
            bias: style.bias(),
            max_geometric: DEFAULT_MAX_GEOMETRIC_CANDIDATES,
            landmark_probes: Vec::new(),
        }
    }

    pub fn with_max_geometric(mut self, max_geometric: usize) -> Self {
        self.max_geometric = max_geometric;
        self
    }

    /// Names probed one at a time after the geometric sweep
    pub fn with_landmark_probes(mut self, names: Vec<String>) -> Self {
        self.landmark_probes = names;
        self
    }

    /// Degrees of offset before profile and multiplier scaling
    pub fn base_factor(target_distance_km: f64) -> f64 {
        let per_km = if target_distance_km <= SHORT_REGIME_MAX_KM {
            SHORT_REGIME_DEG_PER_KM
        } else if target_distance_km <= MEDIUM_REGIME_MAX_KM {
            MEDIUM_REGIME_DEG_PER_KM
        } else {
            LONG_REGIME_DEG_PER_KM
        };

        let factor = target_distance_km * per_km;
        if target_distance_km <= VERY_SHORT_TARGET_KM {
            factor / 2.0
        } else {
            factor
        }
    }

    /// Base factor scaled by the rider profile
    pub fn scaled_factor(&self) -> f64 {
        Self::base_factor(self.target_distance_km) * self.profile.factor()
    }

    pub fn multipliers(target_distance_km: f64) -> &'static [f64] {
        if target_distance_km <= SHORT_REGIME_MAX_KM {
            &SHORT_TARGET_MULTIPLIERS
        } else {
            &LONG_TARGET_MULTIPLIERS
        }
    }

    fn patterns(target_distance_km: f64) -> &'static [ProbePattern] {
        if target_distance_km <= SHORT_REGIME_MAX_KM {
            &SHORT_TARGET_PATTERNS
        } else {
            &PAIR_PATTERNS
        }
    }

    /// Waypoints for `pattern` at `factor` degrees, or `None` if a point
    /// falls outside the coordinate range
    pub fn offset_set(&self, factor: f64, pattern: ProbePattern) -> Option<WaypointSet> {
        let lat_off = factor * self.bias.lat_bias;
        let lng_off = factor * self.bias.lng_bias;

        WaypointSet::from_points(
            pattern
                .offsets(lat_off, lng_off)
                .into_iter()
                .map(|(dlat, dlng)| self.origin.offset(dlat, dlng)),
        )
        .filter(|set| !set.is_empty())
    }

    /// Lazy, restartable sequence. Cloning the iterator replays it.
    pub fn candidates(&self) -> CandidateSequence<'_> {
        CandidateSequence {
            generator: self,
            grid_index: 0,
            geometric_emitted: 0,
            probe_index: 0,
        }
    }

    /// Tight probes around the origin for short strict-mode targets.
    /// Tightest divisor first.
    pub fn shrink_candidates(&self) -> Vec<Candidate> {
        let scaled = self.scaled_factor();
        let mut candidates = Vec::new();

        for divisor in SHRINK_DIVISORS {
            let factor = scaled / divisor;

            let singles = SINGLE_PATTERNS
                .iter()
                .chain(std::iter::once(&ProbePattern::Diagonal))
                .map(|p| (*p, factor));
            let pairs = PAIR_PATTERNS.iter().map(|p| (*p, factor * SHRINK_PAIR_SHARE));

            for (pattern, f) in singles.chain(pairs) {
                if let Some(waypoints) = self.offset_set(f, pattern) {
                    candidates.push(Candidate {
                        waypoints,
                        pattern,
                        scale: Some(divisor),
                        strategy: SearchStrategy::ShrinkPass,
                    });
                }
            }
        }

        candidates
    }

    fn probes_landmarks(&self) -> bool {
        self.target_distance_km < LANDMARK_PROBE_MAX_KM
    }
}

#[derive(Debug, Clone)]
pub struct CandidateSequence<'a> {
    generator: &'a CandidateGenerator,
    /// Position in the multiplier x pattern grid
    grid_index: usize,
    geometric_emitted: usize,
    probe_index: usize,
}

impl Iterator for CandidateSequence<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        let generator = self.generator;
        let target = generator.target_distance_km;
        let multipliers = CandidateGenerator::multipliers(target);
        let patterns = CandidateGenerator::patterns(target);
        let grid_len = multipliers.len() * patterns.len();

        while self.geometric_emitted < generator.max_geometric && self.grid_index < grid_len {
            let multiplier = multipliers[self.grid_index / patterns.len()];
            let pattern = patterns[self.grid_index % patterns.len()];
            self.grid_index += 1;

            let factor = generator.scaled_factor() * multiplier;
            if let Some(waypoints) = generator.offset_set(factor, pattern) {
                self.geometric_emitted += 1;
                return Some(Candidate {
                    waypoints,
                    pattern,
                    scale: Some(multiplier),
                    strategy: SearchStrategy::Geometric,
                });
            }
        }

        if !generator.probes_landmarks() {
            return None;
        }

        let name = generator.landmark_probes.get(self.probe_index)?;
        self.probe_index += 1;
        Some(Candidate {
            waypoints: WaypointSet::from_landmarks(std::slice::from_ref(name), 1),
            pattern: ProbePattern::Landmark,
            scale: None,
            strategy: SearchStrategy::Landmarks,
        })
    }
}
