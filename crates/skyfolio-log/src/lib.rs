//! Structured logging for Skyfolio.
//!
//! Every crate logs under its own target. `skyfolio_animation` reports
//! section, mode and weather changes and the start sequence at `info`.
//! `skyfolio_environment` reports pool setup at `debug` and per-frame
//! recycling at `trace`, and `skyfolio_motion` reports propeller spin-up at
//! `debug`. Non-finite guards warn from `skyfolio_scene` and
//! `skyfolio_animation`.
//!
//! Output goes to the console with uptime timestamps, plus a JSON file in
//! debug builds. The filter honours `RUST_LOG` first, then the configured
//! `debug.log_level`.

use skyfolio_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names one: session
/// events and guard warnings, no per-frame output.
pub const DEFAULT_FILTER: &str = "info,winit=warn";

/// Filter that adds per-frame recycling and propeller state changes.
pub const FRAME_TRACE_FILTER: &str =
    "info,skyfolio_environment=trace,skyfolio_motion=debug,winit=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "skyfolio.log";

/// Installs the global subscriber. Call once, after the config is final.
///
/// * `log_dir` - where `skyfolio.log` goes; ignored unless `debug_build`
/// * `debug_build` - enables the JSON file layer
/// * `config` - its `debug.log_level` is used when `RUST_LOG` is unset
///
/// # Examples
///
/// ```no_run
/// use skyfolio_log::init_logging;
/// use skyfolio_config::Config;
///
/// init_logging(None, false, None);
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_for(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter string for `config`: its log level, or [`DEFAULT_FILTER`] when
/// absent or blank.
#[must_use]
pub fn filter_for(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
