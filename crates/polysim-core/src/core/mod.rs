//! # Core Module
//!
//! The fundamental building blocks of polysim: the data describing polymer
//! chains, the force modifiers that act on them, and output recording.
//!
//! ## Architecture
//!
//! - **Polymer Representation** ([`models`]) - Vectors, chains, and the system of chains
//! - **Rate Pipeline** ([`forces`]) - Force modifiers and their ordered pipeline
//! - **Output** ([`io`]) - Frame recording in the JSON-like trajectory format
//!
//! ## Physical Model
//!
//! The dynamics are overdamped and inertia free: every monomer carries a
//! location and a rate (the derivative of its location), and the modifiers
//! together define the rate field that the integrator follows.

pub mod forces;
pub mod io;
pub mod models;
