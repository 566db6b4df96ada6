use crate::core::forces::Modifier;
use crate::core::forces::constant::ConstForce;
use crate::core::forces::kinesin::KinesinForce;
use crate::core::forces::oseen::{DEFAULT_CLAMP, OseenTensor};
use crate::core::forces::pin::{AutoPinForce, PinForce};
use crate::core::forces::pipeline::{Pipeline, StagedPipelineBuilder};
use crate::core::forces::spring::SpringForce;
use crate::core::forces::stiff::StiffForce;
use crate::core::models::vector::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Pin target (chain {chain}, link {link}) lies outside the configured chains")]
    PinOutOfRange { chain: usize, link: usize },
}

fn require_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be finite, got {}", value),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegratorConfig {
    pub timestep: f64,
    pub substeps: usize,
}

impl IntegratorConfig {
    pub const REFERENCE_TIMESTEP: f64 = 0.003;
    pub const REFERENCE_SUBSTEPS: usize = 100;

    /// Simulated time covered by one externally visible step.
    pub fn step_duration(&self) -> f64 {
        self.timestep * self.substeps as f64
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "timestep",
                reason: format!("must be positive and finite, got {}", self.timestep),
            });
        }
        if self.substeps == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "substeps",
                reason: "at least one substep is required".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            timestep: Self::REFERENCE_TIMESTEP,
            substeps: Self::REFERENCE_SUBSTEPS,
        }
    }
}

#[derive(Default)]
pub struct IntegratorConfigBuilder {
    timestep: Option<f64>,
    substeps: Option<usize>,
}

impl IntegratorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timestep(mut self, timestep: f64) -> Self {
        self.timestep = Some(timestep);
        self
    }
    pub fn substeps(mut self, substeps: usize) -> Self {
        self.substeps = Some(substeps);
        self
    }

    pub fn build(self) -> Result<IntegratorConfig, ConfigError> {
        let config = IntegratorConfig {
            timestep: self
                .timestep
                .ok_or(ConfigError::MissingParameter("timestep"))?,
            substeps: self
                .substeps
                .ok_or(ConfigError::MissingParameter("substeps"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// One chain to build: `length` monomers random-walked from `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainSpec {
    pub length: usize,
    #[serde(default)]
    pub origin: Vec3,
}

impl ChainSpec {
    pub fn new(length: usize, origin: Vec3) -> Self {
        Self { length, origin }
    }
}

/// Any modifier other than the hydrodynamic coupling, as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModifierConfig {
    Spring {
        stiffness: f64,
    },
    Stiff {
        stiffness: f64,
    },
    Pin {
        stiffness: f64,
        chain: usize,
        link: usize,
        target: Vec3,
    },
    AutoPin {
        stiffness: f64,
    },
    Kinesin {
        magnitude: f64,
    },
    Const {
        force: Vec3,
    },
}

impl ModifierConfig {
    pub fn build(&self) -> Box<dyn Modifier> {
        match *self {
            Self::Spring { stiffness } => Box::new(SpringForce::new(stiffness)),
            Self::Stiff { stiffness } => Box::new(StiffForce::new(stiffness)),
            Self::Pin {
                stiffness,
                chain,
                link,
                target,
            } => Box::new(PinForce::new(stiffness, chain, link, target)),
            Self::AutoPin { stiffness } => Box::new(AutoPinForce::new(stiffness)),
            Self::Kinesin { magnitude } => Box::new(KinesinForce::new(magnitude)),
            Self::Const { force } => Box::new(ConstForce::new(force)),
        }
    }

    /// Checks parameters, and that a pin addresses a monomer of one of `chains`.
    pub fn validate(&self, chains: &[ChainSpec]) -> Result<(), ConfigError> {
        match *self {
            Self::Spring { stiffness } | Self::Stiff { stiffness } | Self::AutoPin { stiffness } => {
                require_finite("stiffness", stiffness)
            }
            Self::Kinesin { magnitude } => require_finite("magnitude", magnitude),
            Self::Const { force } => force
                .as_array()
                .iter()
                .try_for_each(|c| require_finite("force", *c)),
            Self::Pin {
                stiffness,
                chain,
                link,
                target,
            } => {
                require_finite("stiffness", stiffness)?;
                target
                    .as_array()
                    .iter()
                    .try_for_each(|c| require_finite("target", *c))?;
                match chains.get(chain) {
                    Some(spec) if link < spec.length => Ok(()),
                    _ => Err(ConfigError::PinOutOfRange { chain, link }),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HydrodynamicsConfig {
    pub coupling: f64,
    #[serde(default = "default_clamp")]
    pub clamp: f64,
}

fn default_clamp() -> f64 {
    DEFAULT_CLAMP
}

impl HydrodynamicsConfig {
    pub fn new(coupling: f64) -> Self {
        Self {
            coupling,
            clamp: DEFAULT_CLAMP,
        }
    }

    pub fn build(&self) -> OseenTensor {
        OseenTensor::new(self.coupling).with_clamp(self.clamp)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require_finite("coupling", self.coupling)?;
        if !(self.clamp.is_finite() && self.clamp >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "clamp",
                reason: format!("must be non-negative and finite, got {}", self.clamp),
            });
        }
        Ok(())
    }
}

/// The modifier pipeline in its three sections.
///
/// `coupled` modifiers are mixed by the hydrodynamic coupling, `uncoupled`
/// modifiers are added after it. Without `hydrodynamics` the two sections
/// simply run one after the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub coupled: Vec<ModifierConfig>,
    #[serde(default)]
    pub hydrodynamics: Option<HydrodynamicsConfig>,
    #[serde(default)]
    pub uncoupled: Vec<ModifierConfig>,
}

impl PipelineConfig {
    pub fn modifier_count(&self) -> usize {
        self.coupled.len() + self.uncoupled.len() + usize::from(self.hydrodynamics.is_some())
    }

    pub fn build(&self) -> Pipeline {
        let mut builder = StagedPipelineBuilder::new();
        for modifier in &self.coupled {
            builder = builder.coupled_boxed(modifier.build());
        }
        if let Some(hydro) = &self.hydrodynamics {
            builder = builder.hydrodynamics(hydro.build());
        }
        for modifier in &self.uncoupled {
            builder = builder.uncoupled_boxed(modifier.build());
        }
        builder.build()
    }

    fn validate(&self, chains: &[ChainSpec]) -> Result<(), ConfigError> {
        for modifier in self.coupled.iter().chain(self.uncoupled.iter()) {
            modifier.validate(chains)?;
        }
        if let Some(hydro) = &self.hydrodynamics {
            hydro.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub integrator: IntegratorConfig,
    pub chains: Vec<ChainSpec>,
    pub pipeline: PipelineConfig,
    pub frames: usize,
    pub seed: u64,
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    integrator: Option<IntegratorConfig>,
    chains: Vec<ChainSpec>,
    pipeline: Option<PipelineConfig>,
    frames: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn integrator(mut self, config: IntegratorConfig) -> Self {
        self.integrator = Some(config);
        self
    }
    pub fn chain(mut self, spec: ChainSpec) -> Self {
        self.chains.push(spec);
        self
    }
    pub fn chains(mut self, specs: impl IntoIterator<Item = ChainSpec>) -> Self {
        self.chains.extend(specs);
        self
    }
    pub fn pipeline(mut self, config: PipelineConfig) -> Self {
        self.pipeline = Some(config);
        self
    }
    pub fn frames(mut self, frames: usize) -> Self {
        self.frames = Some(frames);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let integrator = self.integrator.unwrap_or_default();
        integrator.validate()?;

        if self.chains.is_empty() {
            return Err(ConfigError::MissingParameter("chains"));
        }
        if let Some(index) = self.chains.iter().position(|c| c.length == 0) {
            return Err(ConfigError::InvalidParameter {
                name: "chains",
                reason: format!("chain {} has no monomers", index),
            });
        }

        let pipeline = self.pipeline.unwrap_or_default();
        pipeline.validate(&self.chains)?;

        Ok(SimulationConfig {
            integrator,
            chains: self.chains,
            pipeline,
            frames: self
                .frames
                .ok_or(ConfigError::MissingParameter("frames"))?,
            seed: self.seed.ok_or(ConfigError::MissingParameter("seed"))?,
        })
    }
}
