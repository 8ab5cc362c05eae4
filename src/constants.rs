//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For knobs that benefit from runtime experimentation, see
//! [`PlannerConfig`](crate::config::PlannerConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Distance tolerance policy ---

/// Maximum acceptable |achieved - target| in km. A result is only ever
/// reported as within tolerance when its error is at most this value.
pub const TOLERANCE_KM: f64 = 2.0;
/// Error (km) at which the search stops immediately.
pub const NEAR_PERFECT_KM: f64 = 0.5;
/// Errors closer than this are treated as a tie.
pub const TIE_EPSILON_KM: f64 = 1e-6;

// --- Candidate generation: base scale regimes ---
// base_factor (degrees) = target_km * regime coefficient. Short targets get
// proportionally smaller offsets because road distance grows faster than the
// straight-line offset on short trips.

/// Upper bound (km) of the short regime.
pub const SHORT_REGIME_MAX_KM: f64 = 15.0;
/// Upper bound (km) of the medium regime.
pub const MEDIUM_REGIME_MAX_KM: f64 = 30.0;
/// Degrees of offset per target km, short regime (<= 15 km).
pub const SHORT_REGIME_DEG_PER_KM: f64 = 0.0015;
/// Degrees of offset per target km, medium regime (<= 30 km).
pub const MEDIUM_REGIME_DEG_PER_KM: f64 = 0.0018;
/// Degrees of offset per target km, long regime (> 30 km).
pub const LONG_REGIME_DEG_PER_KM: f64 = 0.002;
/// Targets at or below this distance (km) get their factor halved again.
pub const VERY_SHORT_TARGET_KM: f64 = 7.0;
/// Targets at or above this distance (km) never probe landmarks.
pub const LANDMARK_PROBE_MAX_KM: f64 = 30.0;

/// Scalar multipliers for short targets, clustered at the low end.
pub const SHORT_TARGET_MULTIPLIERS: [f64; 10] = [0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3];
/// Scalar multipliers for medium and long targets.
pub const LONG_TARGET_MULTIPLIERS: [f64; 15] = [
    0.5, 0.6, 0.7, 0.75, 0.8, 0.85, 0.9, 0.95, 1.0, 1.05, 1.1, 1.15, 1.2, 1.25, 1.3,
];
/// Default cap on geometric candidates per search.
pub const DEFAULT_MAX_GEOMETRIC_CANDIDATES: usize = 60;

// --- Strict-mode shrink pass ---

/// Shrink pass only runs for targets at or below this distance (km).
pub const SHRINK_PASS_MAX_TARGET_KM: f64 = 10.0;
/// Divisors applied to the scaled base factor, tightest first.
pub const SHRINK_DIVISORS: [f64; 4] = [40.0, 30.0, 20.0, 10.0];
/// Diagonal probes use this share of the factor on each axis.
pub const DIAGONAL_SHARE: f64 = 0.7;
/// Paired probes in the shrink pass use this share of the factor.
pub const SHRINK_PAIR_SHARE: f64 = 0.5;

// --- Fallback ladder ---

/// Landmark fallback rung uses at most this many landmarks.
pub const LANDMARK_FALLBACK_MAX_WAYPOINTS: usize = 2;

// --- Elevation sampling ---

/// Number of leading steps sampled for elevation.
pub const ELEVATION_MAX_SAMPLES: usize = 5;
/// Placeholder spacing between elevation samples (km).
pub const ELEVATION_SAMPLE_SPACING_KM: f64 = 0.5;

// --- Adapter defaults ---

/// Default per-request timeout for provider calls (seconds).
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 10;
/// Default deadline for one whole search (seconds).
pub const DEFAULT_SEARCH_DEADLINE_SECS: u64 = 120;

// --- Itinerary summary ---

/// Maximum main-road highlights reported.
pub const MAX_HIGHLIGHTS: usize = 8;
/// Instructions used when no main road is recognised.
pub const FALLBACK_HIGHLIGHTS: usize = 5;
