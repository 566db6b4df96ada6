use crate::core::io::frames::FrameRecorder;
use crate::core::models::chain::Chain;
use crate::core::models::system::System;
use crate::engine::config::{ChainSpec, SimulationConfig};
use crate::engine::error::EngineError;
use crate::engine::integrator::Rk4Integrator;
use crate::engine::progress::{Progress, ProgressReporter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub frames_recorded: usize,
    pub substeps_per_frame: usize,
    pub simulated_time: f64,
    pub final_system: System,
}

/// Builds one random-walk chain per `ChainSpec`, drawing from a single generator in
/// chain order.
pub fn build_system(chains: &[ChainSpec], seed: u64) -> System {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut system = System::new();
    for spec in chains {
        let mut chain = Chain::new(spec.length);
        chain.random_walk_from(spec.origin, &mut rng);
        let index = system.add_chain(chain);
        debug!(chain = index, length = spec.length, origin = %spec.origin, "Added chain.");
    }
    system
}

/// Runs a complete simulation, writing one frame to `writer` after every step.
///
/// A step that leaves any location non-finite is not recorded: the recording
/// is closed over the frames written so far and `EngineError::Diverged` is
/// returned.
#[instrument(skip_all, name = "simulation_workflow")]
pub fn run<W: Write>(
    config: &SimulationConfig,
    writer: W,
    reporter: &ProgressReporter,
) -> Result<SimulationSummary, EngineError> {
    // === Phase 1: Assemble chains and modifiers ===
    reporter.report(Progress::PhaseStart { name: "Setup" });
    info!(
        chains = config.chains.len(),
        modifiers = config.pipeline.modifier_count(),
        seed = config.seed,
        "Assembling simulation."
    );

    let system = build_system(&config.chains, config.seed);
    let mut integrator = Rk4Integrator::new(config.integrator, config.pipeline.build());
    integrator.initialize(system)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Step and record ===
    reporter.report(Progress::PhaseStart { name: "Simulation" });
    reporter.report(Progress::StepsStart {
        total_steps: config.frames as u64,
    });

    let mut recorder = FrameRecorder::new(writer);
    for _ in 0..config.frames {
        let system = integrator.step()?;
        if let Some(chain) = system.first_non_finite_chain() {
            let step = integrator.steps_taken();
            warn!(step, chain, "Simulation diverged; closing the recording early.");
            recorder.finish()?;
            return Err(EngineError::Diverged { step, chain });
        }
        recorder.record(system)?;
        reporter.report(Progress::StepFinished {
            step: integrator.steps_taken(),
            time: integrator.elapsed_time(),
        });
    }
    let frames_recorded = recorder.frames_recorded();
    recorder.finish()?;

    reporter.report(Progress::StepsFinish);
    reporter.report(Progress::PhaseFinish);

    let simulated_time = integrator.elapsed_time();
    info!(frames = frames_recorded, simulated_time, "Simulation complete.");

    let final_system = integrator
        .into_system()
        .ok_or(EngineError::NotInitialized)?;

    Ok(SimulationSummary {
        frames_recorded,
        substeps_per_frame: config.integrator.substeps,
        simulated_time,
        final_system,
    })
}
