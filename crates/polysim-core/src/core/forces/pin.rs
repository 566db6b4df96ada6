use super::Modifier;
use crate::core::models::system::System;
use crate::core::models::vector::Vec3;
use tracing::debug;

/// Harmonic restraint of one monomer toward a fixed target.
///
/// Adds `k·(target - loc[link])` to monomer `link` of chain `chain`. The indices
/// are part of the modifier's contract with the system: out-of-range indices
/// are a programming error and panic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinForce {
    pub stiffness: f64,
    pub chain: usize,
    pub link: usize,
    pub target: Vec3,
}

impl PinForce {
    pub fn new(stiffness: f64, chain: usize, link: usize, target: Vec3) -> Self {
        Self {
            stiffness,
            chain,
            link,
            target,
        }
    }
}

impl Modifier for PinForce {
    fn name(&self) -> &'static str {
        "pin"
    }

    fn initialize(&mut self, system: &System) {
        let length = system.chain(self.chain).map(|c| c.len());
        assert!(
            length.is_some_and(|len| self.link < len),
            "pin target (chain {}, link {}) is outside the system (chain lengths {:?})",
            self.chain,
            self.link,
            system.shape()
        );
    }

    fn apply(&mut self, stage: &mut System) {
        let (loc, rates) = stage.chains_mut()[self.chain].split_mut();
        rates[self.link] += (self.target - loc[self.link]) * self.stiffness;
    }
}

/// Restrains monomer 0 of every chain toward where it was at initialization.
///
/// The anchors are captured once, in [`Modifier::initialize`], for the chains
/// present at that time. Chains without a captured anchor are not restrained.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoPinForce {
    pub stiffness: f64,
    anchors: Vec<Option<Vec3>>,
}

impl AutoPinForce {
    pub fn new(stiffness: f64) -> Self {
        Self {
            stiffness,
            anchors: Vec::new(),
        }
    }

    /// Captured anchors in chain order; `None` for a chain that had no monomers.
    pub fn anchors(&self) -> &[Option<Vec3>] {
        &self.anchors
    }
}

impl Modifier for AutoPinForce {
    fn name(&self) -> &'static str {
        "auto-pin"
    }

    fn min_chain_length(&self) -> usize {
        1
    }

    fn initialize(&mut self, system: &System) {
        self.anchors = system
            .chains()
            .iter()
            .map(|c| c.locations().first().copied())
            .collect();
        debug!(anchors = self.anchors.len(), "Captured chain anchors.");
    }

    fn apply(&mut self, stage: &mut System) {
        let k = self.stiffness;
        for (chain, anchor) in stage.chains_mut().iter_mut().zip(self.anchors.iter()) {
            if let Some(anchor) = anchor {
                let (loc, rates) = chain.split_mut();
                rates[0] += (*anchor - loc[0]) * k;
            }
        }
    }
}
