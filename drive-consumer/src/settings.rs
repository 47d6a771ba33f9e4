use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Capacity of the shared result channel between fare tasks and the
    /// merger.
    pub result_buffer_size: usize,
}

impl Settings {
    pub fn new(input: &Path, output: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("result_buffer_size", 64_i64)?
            .add_source(Environment::with_prefix("DRIVE_CONSUMER").try_parsing(true))
            .set_override("input", input.to_string_lossy().into_owned())?
            .set_override("output", output.to_string_lossy().into_owned())?
            .build()?
            .try_deserialize()
    }
}
