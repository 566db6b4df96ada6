//! # Engine Module
//!
//! The stateful layer of polysim: it owns the simulated system and advances it
//! in time with a fixed-step fourth-order Runge-Kutta scheme.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Integrator parameters, chain and modifier
//!   descriptions, and validating builders
//! - **Integration** ([`integrator`]) - The RK4 integrator and its stage buffers
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Integration Scheme
//!
//! Every externally visible step runs a configured number of substeps. Each
//! substep evaluates the modifier pipeline at the four classical RK4 points,
//! each in its own pre-allocated stage buffer, and then combines the four rate
//! fields into the authoritative system.

pub mod config;
pub mod error;
pub mod integrator;
pub mod progress;
