mod config;
mod domain;
mod infra;
mod logging;
mod platform;
mod ui;
mod usecase;


use std::sync::Arc;

use tracing::{error, info};

use crate::config::AppConfig;
use crate::platform::desktop::paths::ensure_webview_data_dir;
use crate::ui::app::App;

fn main() {
    logging::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed to resolve configuration");
            std::process::exit(1);
        }
    };
    let webview_data_dir = match ensure_webview_data_dir(&config.data_dir) {
        Ok(dir) => dir,
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed to prepare webview data directory");
            std::process::exit(1);
        }
    };
    info!(data_dir = %config.data_dir.display(), geocoder = config.geocoder_name(), "starting");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title("Store Location Updater"),
                )
                .with_data_directory(webview_data_dir),
        )
        .with_context(Arc::new(config))
        .launch(App);
}
