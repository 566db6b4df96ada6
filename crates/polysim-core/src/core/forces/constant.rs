use super::Modifier;
use crate::core::models::system::System;
use crate::core::models::vector::Vec3;

/// Uniform external force added to every monomer of every chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstForce {
    pub force: Vec3,
}

impl ConstForce {
    pub fn new(force: Vec3) -> Self {
        Self { force }
    }
}

impl Modifier for ConstForce {
    fn name(&self) -> &'static str {
        "const"
    }

    fn apply(&mut self, stage: &mut System) {
        for chain in stage.chains_mut() {
            for rate in chain.rates_mut() {
                *rate += self.force;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forces::test_utils::*;

    #[test]
    fn const_force_is_added_to_every_monomer() {
        let mut system = System::from_chains(vec![
            straight_chain(2, 1.0, Vec3::zeros()),
            straight_chain(3, 1.0, Vec3::new(0.0, 2.0, 0.0)),
        ]);
        system.chains_mut()[1].rates_mut()[1] = Vec3::new(1.0, 0.0, 0.0);
        ConstForce::new(Vec3::new(0.0, 0.0, 1.0)).apply(&mut system);

        assert_eq!(system.rates().count(), 5);
        assert_eq!(system.chains()[0].rates()[0], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(system.chains()[1].rates()[1], Vec3::new(1.0, 0.0, 1.0));
    }
}
