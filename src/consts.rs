//! Shared numeric constants for the sketchpad crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Half-width of the square around a rectangle corner that counts as a resize handle.
pub const HANDLE_TOLERANCE: f64 = 5.0;

// ── Scene ───────────────────────────────────────────────────────

/// Side length of the square handle boxes shown on a focused element.
pub const HANDLE_SIZE: f64 = 6.0;

// ── Configuration ───────────────────────────────────────────────

/// Environment variable overriding [`HANDLE_TOLERANCE`].
pub const ENV_HANDLE_TOLERANCE: &str = "SKETCHPAD_HANDLE_TOLERANCE";

/// Environment variable overriding [`HANDLE_SIZE`].
pub const ENV_HANDLE_SIZE: &str = "SKETCHPAD_HANDLE_SIZE";

/// Environment variable selecting the hit-test priority (`first` or `topmost`).
pub const ENV_HIT_PRIORITY: &str = "SKETCHPAD_HIT_PRIORITY";
