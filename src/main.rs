//! molecule_rt - spins a hydroxymethylene molecule as shaded ASCII in the terminal
//!
//! Usage:
//!   molecule_rt                     - Two full turns of the built-in molecule
//!   molecule_rt --config run.yaml   - Override viewport, axis and pacing
//!   molecule_rt --frame 157         - Print a single frame and exit

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use molecule_rt::config::AppConfig;
use molecule_rt::scene::{Axis, HitResolution};
use molecule_rt::terminal::print_frame;
use molecule_rt::{Animator, TerminalDisplay};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AxisArg {
    X,
    Y,
    Z,
}

impl From<AxisArg> for Axis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::X => Axis::X,
            AxisArg::Y => Axis::Y,
            AxisArg::Z => Axis::Z,
        }
    }
}

#[derive(Parser)]
#[command(name = "molecule_rt")]
#[command(version = "0.1.0")]
#[command(about = "Terminal ASCII ray tracer animating a rotating molecule")]
struct Cli {
    /// Path to a YAML viewport/animation config (built-in defaults if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override number of frames to play
    #[arg(long)]
    frames: Option<u32>,

    /// Override delay between frames in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Override rotation axis
    #[arg(long, value_enum)]
    axis: Option<AxisArg>,

    /// Shade the closest sphere along each ray instead of the first in scene order
    #[arg(long)]
    nearest: bool,

    /// Print only frame N and exit
    #[arg(long, value_name = "N")]
    frame: Option<u32>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
            .to_string()
    };

    // Frames own stdout; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config_or_exit(cli.config.as_ref());
    apply_overrides(&mut config, &cli);

    let scene = match config.build_scene() {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(
        atoms = scene.atoms.len(),
        axis = ?scene.axis,
        resolution = ?scene.resolution,
        "Scene ready"
    );

    let mut animator = Animator::new(scene, config.renderer(), config.animation.clone());

    if let Some(index) = cli.frame {
        let frame = animator.render_frame(index);
        print_frame(&mut std::io::stdout().lock(), &frame)?;
        return Ok(());
    }

    let mut terminal = TerminalDisplay::new()?;
    animator.run(&mut terminal)?;

    Ok(())
}

/// Fold command-line overrides into the loaded config
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(frames) = cli.frames {
        config.animation.frame_count = frames;
    }
    if let Some(delay) = cli.delay_ms {
        config.animation.frame_delay_ms = delay;
    }
    if let Some(axis) = cli.axis {
        config.scene.rotation_axis = axis.into();
    }
    if cli.nearest {
        config.scene.hit_resolution = HitResolution::Nearest;
    }
}

/// Load configuration or exit with error
fn load_config_or_exit(config_path: Option<&PathBuf>) -> AppConfig {
    match AppConfig::load_or_default(config_path.map(PathBuf::as_path)) {
        Ok(config) => {
            if let Some(path) = config_path {
                tracing::info!("Loaded configuration from {:?}", path);
            }
            config
        }
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            eprintln!("\nSee config.yaml.default for the available settings.");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_keeps_defaults() {
        let cli = Cli::parse_from(["molecule_rt"]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.animation.frame_count, 628);
        assert_eq!(config.animation.frame_delay_ms, 17);
        assert_eq!(config.scene.rotation_axis, Axis::Y);
        assert_eq!(config.scene.hit_resolution, HitResolution::Priority);
    }

    #[test]
    fn test_overrides_applied() {
        let cli = Cli::parse_from([
            "molecule_rt",
            "--frames",
            "10",
            "--delay-ms",
            "0",
            "--axis",
            "z",
            "--nearest",
        ]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.animation.frame_count, 10);
        assert_eq!(config.animation.frame_delay_ms, 0);
        assert_eq!(config.scene.rotation_axis, Axis::Z);
        assert_eq!(config.scene.hit_resolution, HitResolution::Nearest);
    }

    #[test]
    fn test_single_frame_flag() {
        let cli = Cli::parse_from(["molecule_rt", "--frame", "157"]);
        assert_eq!(cli.frame, Some(157));
    }
}
