// Library surface for headless/integration tests and the TUI binary.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod engine;
pub mod keymap;
pub mod runtime;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod words;

/// Tick interval of the runtime loop; also the resolution of the
/// auto-commit scheduler.
pub const TICK_RATE_MS: u64 = 100;
