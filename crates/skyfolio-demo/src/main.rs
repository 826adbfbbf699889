//! Headless Skyfolio session.
//!
//! Drives the scene animator through a scripted tour at a fixed 60 Hz step:
//! start flight, section changes, a free-flight leg steered with WASD and
//! arrows, weather switches and the return to the portfolio. Camera and plane
//! transforms are logged once per simulated second.
//!
//! Run with: `cargo run -p skyfolio-demo -- --weather day --json`

mod report;
mod script;

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use glam::Vec3;
use skyfolio_animation::{AnimatorSettings, SceneAnimator};
use skyfolio_config::{CliArgs, Config, ConfigError};
use skyfolio_environment::EnvironmentSettings;
use skyfolio_input::InputSampler;
use skyfolio_scene::Blueprint;
use tracing::{error, info};

use crate::report::RunReport;
use crate::script::{Script, apply};

const STEP: f32 = 1.0 / 60.0;
const STEPS_PER_SECOND: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlaneModel {
    Biplane,
    Jet,
}

/// CLI arguments for the demo binary.
#[derive(Parser, Debug)]
#[command(name = "skyfolio-demo", about = "Headless Skyfolio animation tour")]
struct DemoArgs {
    #[command(flatten)]
    config: CliArgs,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 20.0)]
    seconds: f32,

    /// Hero model whose parts are listed at startup.
    #[arg(long, value_enum, default_value_t = PlaneModel::Biplane)]
    plane: PlaneModel,

    /// Print the final state as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Log per-frame recycling and propeller changes.
    #[arg(long)]
    trace_frames: bool,
}

fn main() -> ExitCode {
    let args = DemoArgs::parse();

    let mut config = match load_config(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("skyfolio-demo: {err}");
            return ExitCode::from(2);
        }
    };

    if args.trace_frames {
        config.debug.log_level = skyfolio_log::FRAME_TRACE_FILTER.to_string();
    }
    skyfolio_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    info!("Skyfolio headless tour");
    info!(
        "Session: section {} | weather {} | free flight {} | reduced motion {}",
        config.session.start_section,
        config.session.weather,
        config.session.free_flight,
        config.motion.reduced_motion,
    );

    let blueprint = match args.plane {
        PlaneModel::Biplane => Blueprint::biplane(),
        PlaneModel::Jet => Blueprint::jet(),
    };
    info!("Model {:?}: {} parts", args.plane, blueprint.flatten().len());

    let mut animator = match SceneAnimator::new(settings_from(&config)) {
        Ok(animator) => animator,
        Err(err) => {
            error!("Cannot build the scene: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut input = InputSampler::new(config.motion.reduced_motion);
    let pointer = input.pointer_mut();
    pointer.on_resized(config.window.width, config.window.height);
    pointer.on_cursor_entered();

    let mut script = Script::tour();
    let steps = if args.seconds.is_finite() && args.seconds > 0.0 {
        (args.seconds * STEPS_PER_SECOND as f32).round() as u64
    } else {
        0
    };

    for step in 0..steps {
        let elapsed = step as f32 * STEP;
        for cue in script.due(elapsed) {
            apply(cue.action, &mut animator, &mut input);
        }
        let strategy = animator.advance(STEP, &input.sample());

        if (step + 1) % STEPS_PER_SECOND == 0 {
            let camera = animator.camera();
            let plane = animator.rig().world_matrix().transform_point3(Vec3::ZERO);
            info!(
                "t={:>5.2}s {:?} camera=({:.2}, {:.2}, {:.2}) look=({:.2}, {:.2}, {:.2}) plane=({:.2}, {:.2}, {:.2})",
                animator.clock().elapsed(),
                strategy,
                camera.position.x,
                camera.position.y,
                camera.position.z,
                camera.look_at.x,
                camera.look_at.y,
                camera.look_at.z,
                plane.x,
                plane.y,
                plane.z,
            );
        }
    }

    if !script.is_finished() {
        info!("Run ended before the tour finished");
    }

    let report = RunReport::capture(&animator);
    info!(
        "Done after {} frames: {} clouds and {} chunks recycled, {} particles visible",
        report.frames, report.clouds_recycled, report.chunks_recycled, report.visible_particles
    );

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("Cannot serialize the report: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

/// Defaults, or `config.ron` when a config directory is given, then the
/// remaining CLI overrides.
fn load_config(args: &CliArgs) -> Result<Config, ConfigError> {
    let mut config = match &args.config {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(args)?;
    config.validate()?;
    Ok(config)
}

fn settings_from(config: &Config) -> AnimatorSettings {
    AnimatorSettings {
        section: config.session.start_section,
        weather: config.session.weather,
        free_flight: config.session.free_flight,
        start_delay: config.motion.start_delay_ms as f32 / 1000.0,
        environment: EnvironmentSettings {
            seed: config.environment.seed,
            cloud_count: config.environment.cloud_pool,
            chunk_count: config.environment.chunk_pool,
            particle_count: config.environment.particle_pool,
        },
        ..AnimatorSettings::default()
    }
}
