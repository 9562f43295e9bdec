//! Still-life application
//!
//! Loads the application configuration (first argument, TOML or RON), then
//! prepares the still-life scene on the headless device, renders the
//! configured number of frames and tears everything down.

use std::path::{Path, PathBuf};

use tableau_engine::core::{ApplicationConfig, Config, ConfigError};
use tableau_engine::foundation::logging;
use tableau_engine::render::HeadlessDevice;
use tableau_engine::scene::{FrameStats, RenderSequence, SceneError, SceneManager};
use thiserror::Error;

/// Device calls kept in the headless command log
const COMMAND_LOG_LIMIT: usize = 4096;

/// Fatal application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The configuration could not be loaded or is not usable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scene script could not be loaded
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Application context: configuration, scene script and device
pub struct StillLifeApp {
    config: ApplicationConfig,
    sequence: RenderSequence,
    device: HeadlessDevice,
}

impl StillLifeApp {
    /// Build the context from an optional configuration file
    ///
    /// Relative script paths are resolved against the configuration file's
    /// directory.
    pub fn new(config_path: Option<&Path>) -> Result<Self, AppError> {
        let config = match config_path {
            Some(path) => ApplicationConfig::load_from_file(path)?,
            None => ApplicationConfig::default(),
        };
        config.validate().map_err(ConfigError::Invalid)?;

        logging::init(&config.engine.log_level);
        match config_path {
            Some(path) => log::info!("Loaded configuration from {}", path.display()),
            None => log::info!("No configuration given, using defaults"),
        }

        let sequence = match &config.scene.script {
            Some(script) => {
                let base = config_path.and_then(Path::parent).unwrap_or_else(|| Path::new(""));
                RenderSequence::load(base.join(script))?
            }
            None => RenderSequence::still_life(),
        };

        Ok(Self {
            config,
            sequence,
            device: HeadlessDevice::with_command_limit(COMMAND_LOG_LIMIT),
        })
    }

    /// Prepare, render and tear down the scene
    pub fn run(&mut self) -> FrameStats {
        let frames = self.config.engine.frames;
        let mut totals = FrameStats::default();

        {
            let mut scene = SceneManager::new(Some(&mut self.device)).with_sequence(self.sequence.clone());

            let report = scene.prepare(&self.config.assets, self.config.scene.materials.clone());
            if !report.is_complete() {
                log::warn!(
                    "Scene prepared with gaps: failed textures {:?}, missing textures {:?}, missing materials {:?}",
                    report.failed,
                    report.missing_textures,
                    report.missing_materials
                );
            }

            for frame in 0..frames {
                let stats = scene.render_frame();
                log::debug!("Frame {}: {:?}", frame, stats);

                totals.transforms += stats.transforms;
                totals.shading_resolutions += stats.shading_resolutions;
                totals.draws += stats.draws;
            }

            scene.teardown();
        }

        log::info!(
            "Rendered {} frame(s): {} device command(s), {} draw(s), {} texture(s) still live",
            frames,
            self.device.commands_recorded(),
            totals.draws,
            self.device.live_texture_count()
        );

        totals
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook for better error reporting
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {}", panic_info);
    }));

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let mut app = StillLifeApp::new(config_path.as_deref())?;

    log::info!("Starting still life");
    let totals = app.run();
    log::info!(
        "Still life finished: {} transform(s), {} shading resolution(s), {} draw(s)",
        totals.transforms,
        totals.shading_resolutions,
        totals.draws
    );

    Ok(())
}
