//! Shared fixtures for integration tests.
//!
//! - `runtime` builds an initialized runtime over the HTML grammar
//! - `blade_shapes` hand-builds trees in the shapes the Blade grammar produces

#![allow(dead_code)]

pub mod runtime;
