//! Logging integration tests
//!
//! Tests for log path resolution and the installed file pipeline.

mod paths;
mod pipeline;
