//! # polysim Core Library
//!
//! Overdamped bead-chain polymer dynamics: chains of monomers evolve under an
//! ordered, composable pipeline of force modifiers, integrated with a
//! fixed-step classical fourth-order Runge-Kutta scheme.
//!
//! ## Architectural Philosophy
//!
//! The library keeps a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Vec3`, `Chain`,
//!   `System`), the force modifiers and their `Pipeline`, and frame output.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. It owns the system
//!   during integration through the `Rk4Integrator` and its stage buffers, and
//!   carries the configuration, error, and progress types.
//!
//! - **[`workflows`]: The Public API.** Runs a complete simulation from a
//!   `SimulationConfig`: chain assembly, pipeline assembly, stepping, and
//!   recording.

pub mod core;
pub mod engine;
pub mod workflows;
