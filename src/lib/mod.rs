//! Shared library modules providing error types, path helpers, interpreter commands, and telemetry initialization.

pub mod errors;
pub mod paths;
pub mod python;
pub mod telemetry;
