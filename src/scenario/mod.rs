//! Conformance scenarios and their runner
//!
//! Each scenario gets a fresh server process; the handshake state the
//! protocol requires never leaks between scenarios.

pub mod builtin;
mod config;
mod runner;

pub use config::{load_scenario, Expectation, Scenario, Step};
pub use runner::{RunSummary, Runner, ScenarioOutcome};
