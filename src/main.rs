//! Photosphere Viewer - desktop entry point
//!
//! Opens a scene JSON (or an inline scene built from flags) and presents it
//! in a winit window. Status and errors show in the window title.

use clap::Parser;
use photosphere_viewer::native::{self, SceneLocation, ViewerConfig};
use photosphere_viewer::SceneDescriptor;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "photosphere-viewer", about = "Photosphere and 360 video viewer")]
struct Cli {
    /// Scene JSON file. Opens a file picker when neither this nor an inline
    /// scene is given.
    scene: Option<PathBuf>,

    /// Equirectangular image for an inline scene.
    #[arg(long, conflicts_with = "scene")]
    image: Option<String>,

    /// Low resolution image shown while `--image` loads.
    #[arg(long, conflicts_with = "scene")]
    preview: Option<String>,

    /// 360 video for an inline scene.
    #[arg(long, conflicts_with = "scene")]
    video: Option<String>,

    /// Inline media is a top/bottom stereo pair.
    #[arg(long)]
    stereo: bool,

    /// Initial yaw in degrees.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    yaw: f64,

    /// Show frame statistics.
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn scene_location(&self) -> Option<SceneLocation> {
        if let Some(path) = &self.scene {
            return Some(SceneLocation::File(path.clone()));
        }
        if self.image.is_some() || self.preview.is_some() || self.video.is_some() {
            return Some(SceneLocation::Inline(SceneDescriptor {
                yaw: self.yaw,
                is_stereo: self.stereo,
                preview: self.preview.clone(),
                image: self.image.clone(),
                video: self.video.clone(),
            }));
        }
        rfd::FileDialog::new()
            .set_title("Open scene")
            .add_filter("Scene", &["json"])
            .pick_file()
            .map(SceneLocation::File)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let Some(scene) = cli.scene_location() else {
        log::info!("No scene selected, exiting");
        return ExitCode::SUCCESS;
    };

    log::info!("Photosphere Viewer");
    log::info!("   Press ESC or close window to exit");

    let config = ViewerConfig {
        scene,
        debug: cli.debug,
    };
    match native::run(config) {
        Ok(()) => {
            log::info!("Goodbye!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
