use super::Modifier;
use crate::core::models::system::System;
use crate::core::models::vector::Vec3;

/// Backbone bond tension with unit rest length.
///
/// Each bond `d` pulls with `k·(d - unit(d))`. Interior monomers feel the
/// difference of their two adjoining bonds, end monomers only their single bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringForce {
    pub stiffness: f64,
}

impl SpringForce {
    pub fn new(stiffness: f64) -> Self {
        Self { stiffness }
    }
}

#[inline]
fn stretch(d: Vec3) -> Vec3 {
    d - d.normalize()
}

impl Modifier for SpringForce {
    fn name(&self) -> &'static str {
        "spring"
    }

    fn min_chain_length(&self) -> usize {
        2
    }

    fn apply(&mut self, stage: &mut System) {
        let k = self.stiffness;
        for chain in stage.chains_mut() {
            let n = chain.len();
            if n < 2 {
                continue;
            }
            let (loc, rates) = chain.split_mut();

            for i in 1..n - 1 {
                let a = loc[i - 1] - loc[i];
                let b = loc[i] - loc[i + 1];
                rates[i] += (stretch(a) - stretch(b)) * k;
            }
            rates[0] += stretch(loc[1] - loc[0]) * k;
            rates[n - 1] += stretch(loc[n - 2] - loc[n - 1]) * k;
        }
    }
}
