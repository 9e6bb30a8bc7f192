/// Text and binary program loading from disk.
pub mod loader;

/// Simulator lifecycle, breakpoints and external I/O.
pub mod simulator;
