//! Solver constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed board side length
pub const MAX_BOARD_SIZE: usize = 64;

/// Maximum allowed worker thread count
pub const MAX_WORKER_COUNT: usize = 256;

// Default values for configurable parameters
/// Default board side length (the classic 4x4 puzzle)
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Default number of worker threads
pub const DEFAULT_WORKER_COUNT: usize = 4;

// Progress display settings
/// Spinner refresh interval while a solve is racing
pub const SPINNER_TICK_MS: u64 = 80;

/// Character shown for an empty cell when rendering a board
pub const EMPTY_CELL_CHAR: char = '.';
