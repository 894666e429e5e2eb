pub mod cli;
pub mod config;
pub mod manifest;

pub use cli::{build_cli_command, Cli, Commands, OutputFormat};
pub use config::{
    load_config, save_config, GenerationConfig, LikelihoodConfig, ScenarioConfig,
    DEFAULT_EVALUATED_DAYS,
};
