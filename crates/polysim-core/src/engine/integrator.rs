use super::config::IntegratorConfig;
use super::error::EngineError;
use crate::core::forces::pipeline::Pipeline;
use crate::core::models::system::System;
use tracing::{debug, info, instrument, trace};

/// The four RK4 evaluation points. `buffers[0]` is the authoritative system.
#[derive(Debug)]
struct StageBuffers {
    buffers: [System; 4],
    half_step: f64,
    sixth_step: f64,
}

impl StageBuffers {
    fn new(system: System, timestep: f64) -> Self {
        let scratch = || system.zeroed_like();
        let (s1, s2, s3) = (scratch(), scratch(), scratch());
        Self {
            buffers: [system, s1, s2, s3],
            half_step: timestep / 2.0,
            sixth_step: timestep / 6.0,
        }
    }

    fn assert_shapes(&self) {
        let [s0, rest @ ..] = &self.buffers;
        assert!(
            rest.iter().all(|stage| stage.same_shape(s0)),
            "RK4 stage buffers no longer match the system's shape"
        );
    }

    fn substep(&mut self, pipeline: &mut Pipeline, timestep: f64) {
        let [s0, s1, s2, s3] = &mut self.buffers;

        for stage in [&mut *s0, &mut *s1, &mut *s2, &mut *s3] {
            stage.zero_rates();
        }

        pipeline.apply(s0);
        advance(s1, s0, s0, self.half_step);
        pipeline.apply(s1);
        advance(s2, s0, s1, self.half_step);
        pipeline.apply(s2);
        advance(s3, s0, s2, timestep);
        pipeline.apply(s3);

        let sixth = self.sixth_step;
        for (c, chain) in s0.chains_mut().iter_mut().enumerate() {
            let (k2, k3, k4) = (
                s1.chains()[c].rates(),
                s2.chains()[c].rates(),
                s3.chains()[c].rates(),
            );
            let (locations, k1) = chain.split_locations_mut();
            for (m, loc) in locations.iter_mut().enumerate() {
                *loc += (k1[m] + k2[m] * 2.0 + k3[m] * 2.0 + k4[m]) * sixth;
            }
        }
    }
}

/// `target.loc = base.loc + slope.rate * dt`, monomer by monomer.
fn advance(target: &mut System, base: &System, slope: &System, dt: f64) {
    for ((out, from), with) in target
        .chains_mut()
        .iter_mut()
        .zip(base.chains())
        .zip(slope.chains())
    {
        for ((loc, origin), rate) in out
            .locations_mut()
            .iter_mut()
            .zip(from.locations())
            .zip(with.rates())
        {
            *loc = *origin + *rate * dt;
        }
    }
}

/// Fixed-step classical fourth-order Runge-Kutta integrator.
///
/// Each call to [`step`](Rk4Integrator::step) performs `substeps` RK4 substeps
/// of size `timestep`, evaluating the modifier pipeline four times per substep.
/// The integrator takes ownership of the system at initialization, so chains
/// cannot be added or removed afterwards.
#[derive(Debug)]
pub struct Rk4Integrator {
    config: IntegratorConfig,
    pipeline: Pipeline,
    stages: Option<StageBuffers>,
    steps_taken: u64,
}

impl Rk4Integrator {
    pub fn new(config: IntegratorConfig, pipeline: Pipeline) -> Self {
        Self {
            config,
            pipeline,
            stages: None,
            steps_taken: 0,
        }
    }

    /// Adopts `system` as the authoritative stage and prepares every modifier.
    #[instrument(skip_all, name = "integrator_initialize")]
    pub fn initialize(&mut self, system: System) -> Result<(), EngineError> {
        if self.stages.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }
        if system.is_empty() {
            return Err(EngineError::EmptySystem);
        }

        if let Some((required, modifier)) = self.pipeline.required_chain_length() {
            let too_short = system
                .chains()
                .iter()
                .enumerate()
                .find(|(_, chain)| chain.len() < required);
            if let Some((chain, c)) = too_short {
                return Err(EngineError::ChainTooShort {
                    chain,
                    length: c.len(),
                    modifier,
                    required,
                });
            }
        }

        self.pipeline.initialize(&system);
        let stages = StageBuffers::new(system, self.config.timestep);

        info!(
            chains = stages.buffers[0].chain_count(),
            monomers = stages.buffers[0].monomer_count(),
            modifiers = ?self.pipeline.names(),
            timestep = self.config.timestep,
            substeps = self.config.substeps,
            "Integrator initialized."
        );
        self.stages = Some(stages);
        Ok(())
    }

    /// Advances the system by `substeps` RK4 substeps and returns it.
    pub fn step(&mut self) -> Result<&System, EngineError> {
        let stages = self.stages.as_mut().ok_or(EngineError::NotInitialized)?;
        stages.assert_shapes();

        for substep in 0..self.config.substeps {
            trace!(substep, "RK4 substep.");
            stages.substep(&mut self.pipeline, self.config.timestep);
        }
        self.steps_taken += 1;
        debug!(
            step = self.steps_taken,
            time = self.steps_taken as f64 * self.config.step_duration(),
            "Step complete."
        );

        Ok(&stages.buffers[0])
    }

    /// The authoritative system, once initialized.
    pub fn system(&self) -> Option<&System> {
        self.stages.as_ref().map(|s| &s.buffers[0])
    }

    pub fn into_system(self) -> Option<System> {
        self.stages.map(|s| {
            let [system, ..] = s.buffers;
            system
        })
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn is_initialized(&self) -> bool {
        self.stages.is_some()
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Simulated time since initialization.
    pub fn elapsed_time(&self) -> f64 {
        self.steps_taken as f64 * self.config.step_duration()
    }
}
