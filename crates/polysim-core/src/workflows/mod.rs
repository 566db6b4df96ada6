//! # Workflows Module
//!
//! High-level entry points that tie the [`engine`](crate::engine) and
//! [`core`](crate::core) layers together into complete simulations.
//!
//! - **Simulation Workflow** ([`simulate`]) - Builds the chains and modifier
//!   pipeline from a configuration, runs the integrator, and records a frame
//!   after every step.

pub mod simulate;
