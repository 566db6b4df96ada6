use polysim::engine::config as core_config;
use std::path::PathBuf;

#[derive(Debug)]
pub struct AppConfig {
    pub output_path: PathBuf,
    pub core_config: core_config::SimulationConfig,
}
