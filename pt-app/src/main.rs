//! This binary crate runs Particle Photo Tree. It loads the config, uploads any images given on
//! the command line, and then runs the scene at 60 frames per second, reading commands from
//! `stdin` until told to quit.

mod app;
mod commands;
mod logging;
mod renderers;

use self::{
    app::{App, Control},
    commands::Command,
    renderers::RendererWrapper,
};
use color_eyre::Result;
use pt_config::{config_path, data_dir, TreeConfig};
use pt_renderer_trait::Renderer;
use std::{path::PathBuf, time::Duration};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::MissedTickBehavior,
};
use tracing::{debug, info, instrument, warn};

/// How long each frame lasts.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Run the frame loop until `quit` is typed, `stdin` fails, or ctrl-c is pressed.
#[instrument(skip_all)]
async fn run(app: &mut App, renderer: &mut RendererWrapper) -> Result<()> {
    let mut interval = tokio::time::interval(FRAME_DURATION);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut last_frame = interval.tick().await.into_std();

    info!("Beginning frame loop");

    loop {
        tokio::select! {
            biased;

            _ = tokio::signal::ctrl_c() => {
                info!("Received ctrl-c");
                break;
            }

            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match line.parse::<Command>() {
                    Ok(command) => {
                        debug!(?command, "Received command");
                        let now = tokio::time::Instant::now().into_std();
                        if app.handle(command, now).await == Control::Quit {
                            break;
                        }
                    }
                    Err(error) => warn!(%error, "Invalid command"),
                },
                Ok(None) => {
                    info!("stdin closed, no more commands will be read");
                    stdin_open = false;
                }
                Err(error) => {
                    warn!(?error, "Unable to read from stdin");
                    stdin_open = false;
                }
            },

            instant = interval.tick() => {
                let now = instant.into_std();
                let delta = now.saturating_duration_since(last_frame).as_secs_f32();
                last_frame = now;

                for event in app.scene.update(delta, now) {
                    debug!(%event, "Transition");
                }
                renderer.render_frame(&app.scene.frame());
            }
        }
    }

    Ok(())
}

#[instrument]
fn main() -> Result<()> {
    color_eyre::install()?;

    let data_dir = data_dir();
    let _guard = logging::init_tracing(&data_dir.join("logs"));

    info!(?data_dir, "Initialising Particle Photo Tree");

    let config_path = config_path();
    let config = TreeConfig::from_file(&config_path);
    let mut app = App::new(config, config_path);
    let mut renderer = RendererWrapper::init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let images: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
        if !images.is_empty() {
            app.upload(&images, tokio::time::Instant::now().into_std())
                .await;
        }

        run(&mut app, &mut renderer).await
    })?;

    info!("Shutting down. Saving config");
    app.save_config();
    drop(renderer);

    Ok(())
}
