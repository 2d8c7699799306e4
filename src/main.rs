use std::path::PathBuf;

use anyhow::Context;
use env_logger::Env;

use fractal_generator::{AppConfig, run};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::discover(config_path.as_deref())
        .context("failed to load configuration")?;

    run(config).context("fractal viewer failed")
}
