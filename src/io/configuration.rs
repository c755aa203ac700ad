//! Simulation constants and runtime configuration defaults

// Default values for configurable parameters
/// Default number of grid rows
pub const DEFAULT_ROWS: usize = 100;
/// Default number of grid columns
pub const DEFAULT_COLS: usize = 100;
/// Default probability of a cell being black
pub const DEFAULT_P_BLACK: f64 = 0.5;
/// Default probability of white cells connecting diagonally
pub const DEFAULT_D_WHITE: f64 = 0.0;
/// Default probability of black cells connecting diagonally
pub const DEFAULT_D_BLACK: f64 = 0.0;
/// Default number of iterations to accumulate statistics over
pub const DEFAULT_ITERATIONS: u64 = 1;

// Random source settings
/// State churn rounds applied to time-derived seeds before first use
pub const WARMUP_ROUNDS: usize = 127;
/// Replacement for a zero seed, which would lock xorshift at zero forever
pub const FALLBACK_SEED: u64 = 1;

// Progress bar display settings
/// Width of the iteration progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Iterations between progress bar position updates
pub const PROGRESS_UPDATE_INTERVAL: u64 = 16;

// Pattern image settings
/// Pixels with luma below this threshold are read as black cells
pub const PATTERN_LUMA_THRESHOLD: u8 = 128;
