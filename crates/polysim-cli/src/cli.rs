use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "polysim - Overdamped bead-chain polymer dynamics with composable force modifiers.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation and record one frame of chain locations per step.
    Run(RunArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to a simulation configuration file in TOML format.
    /// Without one, the built-in two-chain reference setup is used.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path of the frame recording to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    // --- Overrides ---
    /// Override the number of recorded frames (one step each).
    #[arg(short = 'n', long, value_name = "INT")]
    pub frames: Option<usize>,

    /// Override the random seed used to build the chains.
    #[arg(short, long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the RK4 timestep.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub timestep: Option<f64>,

    /// Override the number of RK4 substeps per recorded frame.
    #[arg(long, value_name = "INT")]
    pub substeps: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_requires_an_output_path() {
        assert!(Cli::try_parse_from(["polysim", "run"]).is_err());
    }

    #[test]
    fn run_parses_overrides_and_global_flags() {
        let cli = Cli::try_parse_from([
            "polysim", "-vv", "run", "-o", "out.json", "-n", "5", "--seed", "7", "-t", "0.01",
            "--substeps", "3",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        let Commands::Run(args) = cli.command;
        assert_eq!(args.output, PathBuf::from("out.json"));
        assert_eq!(args.config, None);
        assert_eq!(args.frames, Some(5));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.timestep, Some(0.01));
        assert_eq!(args.substeps, Some(3));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["polysim", "-q", "-v", "run", "-o", "out.json"]).is_err());
    }
}
