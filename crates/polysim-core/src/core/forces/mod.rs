//! # Force Modifier Module
//!
//! Force units that compute per-monomer rates of change, and the ordered
//! pipeline that runs them at every RK4 evaluation point.
//!
//! ## Overview
//!
//! Every modifier implements [`Modifier`]: it is initialized once against the
//! assembled system and then applied to a stage buffer, reading monomer
//! locations (and, for some modifiers, the rates accumulated so far) and adding
//! its contribution into the rates. [`oseen::OseenTensor`] is the exception: it
//! replaces the rate field with a hydrodynamically coupled version of it.
//!
//! ## Pipeline Order
//!
//! Order is part of the physical model. Modifiers placed before the Oseen tensor
//! have their contribution hydrodynamically coupled; modifiers placed after it
//! bypass the coupling and are added on top of the coupled field.
//! [`pipeline::StagedPipelineBuilder`] exposes this split directly.
//!
//! ## Key Components
//!
//! - [`spring`] - Backbone bond tension
//! - [`stiff`] - Discrete bending penalty
//! - [`pin`] - Harmonic restraints, explicit (`PinForce`) and captured at initialization (`AutoPinForce`)
//! - [`kinesin`] - Motor force tangent to the backbone
//! - [`constant`] - Uniform external force
//! - [`oseen`] - Global pairwise hydrodynamic coupling
//! - [`pipeline`] - Ordered modifier collection

pub mod constant;
pub mod kinesin;
pub mod oseen;
pub mod pin;
pub mod pipeline;
pub mod spring;
pub mod stiff;

use crate::core::models::system::System;
use std::fmt;

/// A force unit in the rate pipeline.
///
/// The integrator evaluates every modifier against one stage buffer at a time,
/// which serves as both input (locations, rates accumulated so far) and output
/// (the rates the modifier contributes to).
pub trait Modifier: fmt::Debug {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Smallest chain length the modifier's stencil can handle.
    fn min_chain_length(&self) -> usize {
        0
    }

    /// Called exactly once, after the pipeline is assembled and before the first
    /// step, with the fully constructed system.
    fn initialize(&mut self, _system: &System) {}

    /// Adds this modifier's contribution into the stage's rates.
    fn apply(&mut self, stage: &mut System);
}
