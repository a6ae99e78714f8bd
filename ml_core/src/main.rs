use std::env;

use anyhow::{Context, Result};
use log::info;

use ml_core::{train, TrainingConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => TrainingConfig::from_json_file(&path)
            .with_context(|| format!("cannot load config '{path}'"))?,
        None => TrainingConfig::default(),
    }
    .with_env_overrides();

    let report = train(&config)
        .with_context(|| format!("training on '{}' failed", config.data_path.display()))?;

    match report.mse {
        Some(mse) => println!("mean squared error: {mse}"),
        None => println!("mean squared error: n/a (no evaluation rows)"),
    }

    report
        .model
        .save(&config.model_path)
        .with_context(|| format!("cannot write '{}'", config.model_path.display()))?;
    info!(
        "model with {} columns written to {}",
        report.model.feature_names().len(),
        config.model_path.display()
    );

    Ok(())
}
