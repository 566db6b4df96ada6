use super::Modifier;
use crate::core::models::system::System;

/// Motor force directed along the local backbone tangent.
///
/// Interior monomers receive `k·(loc[i-1] - loc[i+1])`; the ends use the
/// one-sided tangent toward their single neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinesinForce {
    pub magnitude: f64,
}

impl KinesinForce {
    pub fn new(magnitude: f64) -> Self {
        Self { magnitude }
    }
}

impl Modifier for KinesinForce {
    fn name(&self) -> &'static str {
        "kinesin"
    }

    fn min_chain_length(&self) -> usize {
        2
    }

    fn apply(&mut self, stage: &mut System) {
        let k = self.magnitude;
        for chain in stage.chains_mut() {
            let n = chain.len();
            if n < 2 {
                continue;
            }
            let (loc, rates) = chain.split_mut();

            for i in 1..n - 1 {
                rates[i] += (loc[i - 1] - loc[i + 1]) * k;
            }
            rates[0] += (loc[0] - loc[1]) * k;
            rates[n - 1] += (loc[n - 2] - loc[n - 1]) * k;
        }
    }
}
