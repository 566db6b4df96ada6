use polysim::core::models::vector::Vec3;
use polysim::engine::config::{
    ChainSpec, HydrodynamicsConfig, IntegratorConfig, ModifierConfig, PipelineConfig,
};

/// The setup used when no configuration file is given: two 12-monomer chains
/// under springs, bending stiffness and pinned heads, hydrodynamically coupled,
/// with a kinesin drive that bypasses the coupling.
pub struct DefaultsConfig {
    pub seed: u64,
    pub frames: usize,
    pub integrator: IntegratorConfig,
    pub chains: Vec<ChainSpec>,
    pub pipeline: PipelineConfig,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            seed: 3141,
            frames: 20,
            integrator: IntegratorConfig::default(),
            chains: vec![
                ChainSpec::new(12, Vec3::new(0.0, 0.0, 0.0)),
                ChainSpec::new(12, Vec3::new(0.0, 1.0, 0.0)),
            ],
            pipeline: PipelineConfig {
                coupled: vec![
                    ModifierConfig::Spring { stiffness: 100.0 },
                    ModifierConfig::Stiff { stiffness: 10.0 },
                    ModifierConfig::AutoPin { stiffness: 100.0 },
                ],
                hydrodynamics: Some(HydrodynamicsConfig::new(0.1)),
                uncoupled: vec![ModifierConfig::Kinesin { magnitude: 1.0 }],
            },
        }
    }
}
