use super::Modifier;
use crate::core::models::system::System;

/// Discrete bending penalty.
///
/// Interior monomers `2 <= i <= n-3` receive `k·(2·loc[i] - loc[i+2] - loc[i-2])`.
/// The first two and last two monomers use one-sided two-term stencils, so a
/// chain needs at least four monomers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StiffForce {
    pub stiffness: f64,
}

impl StiffForce {
    pub fn new(stiffness: f64) -> Self {
        Self { stiffness }
    }
}

impl Modifier for StiffForce {
    fn name(&self) -> &'static str {
        "stiff"
    }

    fn min_chain_length(&self) -> usize {
        4
    }

    fn apply(&mut self, stage: &mut System) {
        let k = self.stiffness;
        for chain in stage.chains_mut() {
            let n = chain.len();
            if n < 4 {
                continue;
            }
            let (loc, rates) = chain.split_mut();

            for i in 2..n - 2 {
                rates[i] += (loc[i] * 2.0 - loc[i + 2] - loc[i - 2]) * k;
            }
            rates[0] += (loc[0] - loc[2]) * k;
            rates[1] += (loc[1] - loc[3]) * k;
            rates[n - 2] += (loc[n - 2] - loc[n - 4]) * k;
            rates[n - 1] += (loc[n - 1] - loc[n - 3]) * k;
        }
    }
}
