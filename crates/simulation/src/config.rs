// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Seed used when no `WorldSettings` override is inserted.
pub const DEFAULT_TERRAIN_SEED: f64 = 123.0;

/// Amplitude of the first (lowest-frequency) height octave.
pub const BASE_AMPLITUDE: f64 = 25.0;
/// Frequency of the first height octave, in cycles per world unit.
pub const BASE_FREQUENCY: f64 = 0.012;
/// Frequency multipliers of the four height octaves.
pub const OCTAVE_FREQUENCIES: [f64; 4] = [1.0, 2.5, 6.0, 15.0];
/// Amplitude divisors of the four height octaves.
pub const OCTAVE_AMPLITUDE_DIVISORS: [f64; 4] = [1.0, 4.0, 10.0, 30.0];
/// Negative summed heights are scaled by this factor (flattens basins).
pub const VALLEY_FLATTENING: f64 = 0.6;

pub const WATER_LEVEL: f64 = 1.8;
pub const SAND_LEVEL: f64 = 3.8;
pub const GRASS_LEVEL: f64 = 14.0;
pub const ROCK_LEVEL: f64 = 22.0;
pub const TREELINE: f64 = 18.0;

/// Macro colour noise is sampled at this fraction of world coordinates.
pub const MACRO_NOISE_SCALE: f64 = 0.15;
/// Micro colour noise is sampled at this fraction of world coordinates.
pub const MICRO_NOISE_SCALE: f64 = 0.8;

// ---------------------------------------------------------------------------
// Chunk streaming and flora
// ---------------------------------------------------------------------------

/// Edge length of a square chunk in world units.
pub const CHUNK_SIZE: f32 = 200.0;
/// Grid segments per chunk edge; a chunk has `(CHUNK_SEGMENTS + 1)^2` vertices.
pub const CHUNK_SEGMENTS: usize = 128;
/// Chebyshev radius of the active chunk disk around the focus chunk.
pub const DEFAULT_RENDER_DISTANCE: i32 = 2;

pub const FLORA_PER_CHUNK: usize = 150;
/// Rejection sampling gives up after `FLORA_PER_CHUNK * FLORA_ATTEMPT_FACTOR` candidates.
pub const FLORA_ATTEMPT_FACTOR: f32 = 2.5;
/// Fraction of otherwise-valid candidates that survive the thinning gate.
pub const FLORA_ACCEPT_CHANCE: f64 = 0.25;
/// Frequency of the `sin(x) * cos(z)` clustering field that carves clearings.
pub const FLORA_CLUSTER_FREQUENCY: f64 = 0.05;
/// Cluster field values below this are clearings.
pub const FLORA_CLEARING_THRESHOLD: f64 = -0.2;

// LCG constants for the chunk-seeded flora sequence.
pub const LCG_MULTIPLIER: u64 = 9301;
pub const LCG_INCREMENT: u64 = 49297;
pub const LCG_MODULUS: u64 = 233_280;

// ---------------------------------------------------------------------------
// Flocking
// ---------------------------------------------------------------------------

pub const FLOCK_SIZE: usize = 100;
pub const DEFAULT_FLOCK_SEED: u64 = 42;

pub const MAX_FORCE: f32 = 0.03;
pub const MIN_SPEED: f32 = 0.4;
pub const MAX_SPEED: f32 = 0.8;

pub const PERCEPTION_RADIUS: f32 = 15.0;
pub const SEPARATION_RADIUS: f32 = 4.0;

pub const SEPARATION_WEIGHT: f32 = 3.5;
pub const ALIGNMENT_WEIGHT: f32 = 1.0;
pub const COHESION_WEIGHT: f32 = 1.0;
pub const SEEK_WEIGHT: f32 = 0.6;
pub const CAMERA_REPULSION_WEIGHT: f32 = 10.0;
pub const OBSTACLE_AVOIDANCE_WEIGHT: f32 = 18.0;
pub const GROUND_AVOIDANCE_WEIGHT: f32 = 12.0;
pub const CANOPY_WEAVE_WEIGHT: f32 = 8.0;
pub const WIND_WEIGHT: f32 = 1.0;

/// Wind only pushes the flock above this wind speed.
pub const WIND_FORCE_THRESHOLD: f32 = 1.2;
/// Wind drift per unit of wind speed above the threshold, before clamping.
pub const WIND_DRIFT_SCALE: f32 = 0.02;

pub const CAMERA_REPULSION_RADIUS: f32 = 25.0;

/// Forward look distance of the three terrain feelers.
pub const FEELER_LENGTH: f32 = 20.0;
/// Angle of the side feelers off the heading (0.5 rad, about 28.6 degrees).
pub const FEELER_ANGLE: f32 = 0.5;
/// Avoidance engages when probed terrain is within this many units below the agent.
pub const OBSTACLE_ALTITUDE_MARGIN: f32 = 5.0;
pub const OBSTACLE_UPWARD_BIAS: f32 = 0.5;

/// Below this clearance the agent is pushed straight up.
pub const GROUND_CLEARANCE: f32 = 4.0;

/// Terrain elevation band (exclusive) in which canopy weaving is active.
pub const CANOPY_BAND_MIN: f64 = 2.0;
pub const CANOPY_BAND_MAX: f64 = 18.0;
pub const CANOPY_CLEARANCE: f32 = 8.0;

/// The wander target is projected this far ahead of the flock centroid.
pub const WANDER_LOOKAHEAD: f32 = 80.0;
pub const WANDER_TURN_RATE: f32 = 0.02;
pub const WANDER_MIN_HOVER: f32 = 5.0;
pub const WANDER_MAX_HOVER: f32 = 15.0;

pub const MAX_BANK_ANGLE: f32 = 60.0 * std::f32::consts::PI / 180.0;
/// Radians of roll per unit of lateral acceleration.
pub const BANK_GAIN: f32 = 6.0;

/// Flap phase advance per frame per unit of speed.
pub const FLAP_RATE: f32 = 0.6;
pub const FLAP_AMPLITUDE: f32 = 0.6;
/// Wing flap amplitude gets turbulent jitter above this wind speed.
pub const WING_JITTER_WIND_THRESHOLD: f32 = 1.5;
pub const WING_JITTER_SCALE: f32 = 0.25;

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Fraction of the remaining distance to the preset covered per second.
pub const WEATHER_LERP_RATE: f32 = 1.5;

// ---------------------------------------------------------------------------
// Precipitation
// ---------------------------------------------------------------------------

pub const RAIN_CAPACITY: usize = 4000;
/// Half-width of the rain box centred on the viewer focus.
pub const RAIN_BOX_HALF_EXTENT: f32 = 60.0;
pub const RAIN_BOX_HEIGHT: f32 = 50.0;
/// Fall distance per frame.
pub const RAIN_FALL_SPEED: f32 = 1.5;
pub const RAIN_WIND_DRIFT: f32 = 0.15;
pub const DEFAULT_RAIN_SEED: u64 = 7;
