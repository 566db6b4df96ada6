use crate::cli::RunArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use polysim::{engine::progress::ProgressReporter, workflows};
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args)?;
    let config = &app_config.core_config;

    info!("Opening frame output at {:?}", &app_config.output_path);
    let file = File::create(&app_config.output_path).map_err(|e| {
        CliError::Argument(format!(
            "cannot create output file '{}': {}",
            app_config.output_path.display(),
            e
        ))
    })?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Simulating {} chain(s) for {} frame(s) of {} substep(s)...",
        config.chains.len(),
        config.frames,
        config.integrator.substeps
    );
    info!("Invoking the core simulation workflow...");

    let summary = workflows::simulate::run(config, BufWriter::new(file), &reporter)?;

    info!(
        "Workflow finished: {} frame(s), simulated time {:.4}.",
        summary.frames_recorded, summary.simulated_time
    );
    println!(
        "✓ {} frame(s) (t = {:.4}) written to: {}",
        summary.frames_recorded,
        summary.simulated_time,
        app_config.output_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn run_writes_a_frame_recording() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frames.json");
        let config_path = dir.path().join("sim.toml");
        fs::write(
            &config_path,
            "frames = 3\n[integrator]\nsubsteps = 2\n[[chains]]\nlength = 4\n[[pipeline.coupled]]\ntype = \"spring\"\nstiffness = 10.0\n",
        )
        .unwrap();

        run(RunArgs {
            config: Some(config_path),
            output: output.clone(),
            ..Default::default()
        })
        .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("[[[["));
        assert!(content.ends_with("]]]]"));
        assert_eq!(content.matches("[[[").count(), 3);
    }

    #[test]
    fn unwritable_output_is_an_argument_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(RunArgs {
            output: dir.path().join("missing").join("frames.json"),
            frames: Some(1),
            ..Default::default()
        });
        assert!(matches!(result, Err(CliError::Argument(_))));
    }
}
