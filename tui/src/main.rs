use std::{env, fs::File};

use anyhow::{Context as _, Result};
use log::{info, warn};

use ml_core::HousePriceModel;

mod app;
mod config;
mod state;
mod ui;

use ui::screens::Context;

const DEFAULT_MODEL_PATH: &str = "model.json";
const LOG_FILE: &str = "immo-tui.log";

/// `immo-tui [model.json] [form.json]`
fn main() -> Result<()> {
    let log_file = File::create(LOG_FILE).with_context(|| format!("cannot create {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let mut args = env::args().skip(1);
    let model_path = args.next().unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());

    let model = match HousePriceModel::load(&model_path) {
        Ok(model) => {
            info!("loaded model from {model_path}");
            Some(model)
        }
        Err(e) => {
            warn!("cannot load model from {model_path}: {e}");
            None
        }
    };

    let form = match args.next() {
        Some(path) => config::json::load_form_config(&path).map_err(anyhow::Error::msg)?,
        None => config::FormConfig::default(),
    };

    app::run::run(Context { model, form })
}
