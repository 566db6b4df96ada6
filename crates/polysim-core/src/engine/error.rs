use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Cannot integrate an empty system")]
    EmptySystem,

    #[error(
        "Chain {chain} has {length} monomers, but modifier '{modifier}' requires at least {required}"
    )]
    ChainTooShort {
        chain: usize,
        length: usize,
        modifier: &'static str,
        required: usize,
    },

    #[error("Integrator has not been initialized with a system")]
    NotInitialized,

    #[error("Integrator has already been initialized")]
    AlreadyInitialized,

    #[error("Chain {chain} left finite space at step {step}; try a smaller timestep")]
    Diverged { step: u64, chain: usize },

    #[error("Failed to write output: {source}")]
    Output {
        #[from]
        source: std::io::Error,
    },
}
