//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use heartfall_config::Config;

#[derive(Debug, Parser)]
#[command(name = "heartfall")]
#[command(about = "Falling hearts and roses in your terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Seed for the particle random source
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file and apply command-line overrides on top.
    pub fn load_config(&self) -> heartfall_config::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(fps) = self.fps {
            config.display.fps = fps;
        }
        if let Some(path) = &self.log_file {
            config.log.file = Some(path.clone());
        }
    }
}
