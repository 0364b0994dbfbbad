//! Tests for the sandpen core pipeline
//!
//! Unit tests for each stage (assembly, decoding, logging, debouncing) plus
//! session tests that drive the whole pipeline on a paused clock.

mod bridge;
mod libraries;
mod project;
