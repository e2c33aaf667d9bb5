//! Common test utilities and helpers
//!
//! A scripted command runner for exercising the aggregator without git,
//! and fixture helpers for tests that drive a real git executable.

#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod scripted_runner;
