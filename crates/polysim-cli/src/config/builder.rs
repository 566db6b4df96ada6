use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use polysim::engine::config as core_config;
use tracing::debug;

/// Merges command-line overrides over the configuration file over the
/// built-in defaults. Chains and pipeline are taken as a whole from the first
/// source that defines them.
pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        debug!("No configuration file given, using the built-in setup.");
        FileConfig::default()
    };

    merge(args, file_config, defaults)
}

fn merge(args: &RunArgs, mut file_config: FileConfig, defaults: DefaultsConfig) -> Result<AppConfig> {
    let integrator_file = file_config.integrator.take().unwrap_or_default();
    let integrator = core_config::IntegratorConfigBuilder::new()
        .timestep(
            args.timestep
                .or(integrator_file.timestep)
                .unwrap_or(defaults.integrator.timestep),
        )
        .substeps(
            args.substeps
                .or(integrator_file.substeps)
                .unwrap_or(defaults.integrator.substeps),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let frames = args
        .frames
        .or(file_config.frames)
        .unwrap_or(defaults.frames);
    let seed = args.seed.or(file_config.seed).unwrap_or(defaults.seed);
    let chains = file_config.chains.take().unwrap_or(defaults.chains);
    let pipeline = file_config.pipeline.take().unwrap_or(defaults.pipeline);

    let core_config = core_config::SimulationConfigBuilder::new()
        .integrator(integrator)
        .chains(chains)
        .pipeline(pipeline)
        .frames(frames)
        .seed(seed)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        output_path: args.output.clone(),
        core_config,
    })
}
