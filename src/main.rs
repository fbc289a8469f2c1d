//! Chat Life - Entry Point
//!
//! Loads the configuration, starts the simulation driver and wires the
//! command feeds (chat, keyboard or stdin) and the renderer to it.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::io::BufReader;
use tokio::runtime::Runtime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use chat_life::chat::{forward_lines, ChatClient};
use chat_life::core::config::AppConfig;
use chat_life::core::error::{LifeError, Result};
use chat_life::input::spawn_keyboard;
use chat_life::render::terminal::TerminalRenderer;
use chat_life::render::LogSink;
use chat_life::rules::RuleEvaluator;
use chat_life::simulation::{event_channel, Driver, EventSender, SimEvent, SimulationState};

/// Cellular automaton steered by chat commands
#[derive(Parser, Debug)]
#[command(name = "chat-life")]
#[command(about = "Game of Life with a rule laboratory, driven live by chat commands")]
struct Args {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Random seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,

    /// Board width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Board height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between generations
    #[arg(long)]
    tick_ms: Option<u64>,

    /// No terminal UI: commands come from stdin, status goes to the log
    #[arg(long)]
    headless: bool,

    /// Do not connect to chat even if the config enables it
    #[arg(long)]
    no_chat: bool,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write logs to this file (the terminal UI hides stderr otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Headless status is logged every this many ticks
const STATUS_EVERY: u64 = 10;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("chat-life: cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("chat-life: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("chat-life: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &Args) -> std::io::Result<()> {
    let writer = match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        // Raw-mode output would be garbled by log lines
        None if !args.headless => BoxMakeWriter::new(std::io::sink),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_life=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(args.log_file.is_none())
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let sim = &mut config.simulation;
    if let Some(width) = args.width {
        sim.width = width;
    }
    if let Some(height) = args.height {
        sim.height = height;
    }
    if let Some(ms) = args.tick_ms {
        sim.tick_interval_ms = ms;
    }
    if args.seed.is_some() {
        sim.seed = args.seed;
    }
    if args.no_chat {
        config.chat.enabled = false;
    }

    config.validate().map_err(LifeError::Config)?;
    Ok(config)
}

fn run(args: Args, config: AppConfig) -> Result<()> {
    let rt = Runtime::new()?;
    let result = rt.block_on(simulate(&args, config));
    // tokio's stdin reader sits on a blocking thread that never returns
    rt.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn simulate(args: &Args, config: AppConfig) -> Result<()> {
    let seed = config.simulation.seed.unwrap_or_else(rand::random);
    tracing::info!("Chat Life starting (seed {})", seed);

    let state = SimulationState::from_config(&config.simulation, seed);
    let evaluator = RuleEvaluator::new(config.simulation.boundary);
    let driver = Driver::new(state, evaluator, config.simulation.tick_interval())
        .with_max_ticks(args.max_ticks);

    let (events, receiver) = event_channel();

    if config.chat.enabled {
        spawn_chat(&config, events.clone())?;
    }

    let state = if args.headless {
        spawn_stdin(events.clone());
        spawn_ctrl_c(events);
        let mut sink = LogSink::new(STATUS_EVERY);
        driver.run(receiver, &mut sink).await?
    } else {
        let mut renderer = TerminalRenderer::new(config.display.clone())?;
        spawn_keyboard(events)?;
        driver.run(receiver, &mut renderer).await?
    };

    tracing::info!(
        "Stopped after {} ticks, generation {}, population {}",
        state.clock.ticks(),
        state.clock.generation(),
        state.grid.population()
    );
    Ok(())
}

fn spawn_chat(config: &AppConfig, events: EventSender) -> Result<()> {
    let client = ChatClient::from_config(&config.chat)?;
    tokio::spawn(async move {
        match client.run(events).await {
            Ok(()) => tracing::info!("Chat feed finished"),
            Err(e) => tracing::warn!("Chat feed stopped: {}", e),
        }
    });
    Ok(())
}

fn spawn_stdin(events: EventSender) {
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        match forward_lines(stdin, events).await {
            Ok(count) => tracing::info!("stdin closed after {} commands", count),
            Err(e) => tracing::warn!("stdin feed stopped: {}", e),
        }
    });
}

fn spawn_ctrl_c(events: EventSender) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = events.send(SimEvent::Shutdown);
        }
    });
}
