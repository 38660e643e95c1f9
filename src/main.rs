use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_gym::input::Speed;
use snake_gym::modes::{RolloutConfig, RolloutMode, WatchMode};
use snake_gym::render::SurfaceKind;
use snake_gym::rl::{EnvConfig, GlobalStrategy, LocalStrategy, ObservationStrategy, SnakeEnv};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_gym")]
#[command(version, about = "Gym-style environment for a remotely hosted snake engine")]
struct Cli {
    /// What to run against the engine
    #[arg(long, value_enum, default_value = "rollout")]
    mode: Mode,

    /// Observation strategy
    #[arg(long, value_enum, default_value = "local")]
    strategy: StrategyKind,

    /// JSON environment config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gateway address (host:port)
    #[arg(long)]
    addr: Option<String>,

    /// Board width
    #[arg(long)]
    width: Option<usize>,

    /// Board height
    #[arg(long)]
    height: Option<usize>,

    /// Episodes to play (0 in watch mode runs until quit)
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Engine seed applied before the first episode
    #[arg(long)]
    seed: Option<u64>,

    /// Seed of the random agent
    #[arg(long, default_value = "0")]
    agent_seed: u64,

    /// Where watch mode draws the board
    #[arg(long, value_enum)]
    surface: Option<SurfaceArg>,

    /// Initial tick speed in watch mode (keys 1-4 change it)
    #[arg(long, value_enum, default_value = "normal")]
    speed: SpeedArg,

    /// Step cap per episode in rollout mode
    #[arg(long, default_value = "10000")]
    max_steps: usize,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Headless episodes, prints statistics
    Rollout,
    /// Render episodes in the terminal
    Watch,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// Feature vector, relative turns
    Local,
    /// Board bitmap, absolute directions
    Global,
}

#[derive(Clone, Copy, ValueEnum)]
enum SurfaceArg {
    /// Desktop window, exact pixels
    Window,
    /// Colored blocks in this terminal
    Terminal,
}

impl From<SurfaceArg> for SurfaceKind {
    fn from(arg: SurfaceArg) -> Self {
        match arg {
            SurfaceArg::Window => SurfaceKind::Window,
            SurfaceArg::Terminal => SurfaceKind::Terminal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SpeedArg {
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl From<SpeedArg> for Speed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Slow => Speed::Slow,
            SpeedArg::Normal => Speed::Normal,
            SpeedArg::Fast => Speed::Fast,
            SpeedArg::VeryFast => Speed::VeryFast,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = match &cli.config {
        Some(path) => EnvConfig::load(path)?,
        None => EnvConfig::default(),
    };
    if let Some(addr) = &cli.addr {
        config.gateway_addr = addr.clone();
    }
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(surface) = cli.surface {
        config.surface = surface.into();
    }
    config.visualize = cli.mode == Mode::Watch;

    match cli.strategy {
        StrategyKind::Local => {
            let strategy = LocalStrategy::new(config.relative_actions);
            run(&cli, &config, strategy).await
        }
        StrategyKind::Global => {
            let strategy = GlobalStrategy::new(config.absolute_actions);
            run(&cli, &config, strategy).await
        }
    }
}

async fn run<S: ObservationStrategy>(cli: &Cli, config: &EnvConfig, strategy: S) -> Result<()> {
    let env = SnakeEnv::connect(config, strategy)?;

    match cli.mode {
        Mode::Rollout => {
            let rollout_config = RolloutConfig {
                episodes: cli.episodes,
                seed: cli.seed,
                agent_seed: cli.agent_seed,
                max_steps: cli.max_steps,
                ..Default::default()
            };
            let max_reward = env.max_reward();
            let mut rollout = RolloutMode::new(env, rollout_config);
            let stats = rollout.run()?;

            println!("{}", stats.format_summary());
            println!("Normalized return: {:.4}", stats.normalized_return(max_reward));
        }
        Mode::Watch => {
            let mut watch =
                WatchMode::new(env, cli.agent_seed, cli.episodes).with_speed(cli.speed.into());
            let stats = watch.run(cli.seed).await?;

            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    // Watch mode owns the terminal, so stderr logging is kept quiet there
    let default_level = match (cli.mode, &cli.log_file) {
        (Mode::Watch, None) => "warn",
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    File::create(path).with_context(|| format!("Failed to create log file {:?}", path))
}
