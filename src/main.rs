//! COSMA // SSA Platform
//!
//! Terminal console for space situational awareness and collision
//! avoidance maneuver planning.

use anyhow::Context;
use clap::Parser;
use cosma_console::config::ConsoleConfig;
use cosma_console::console::clock::WallClock;
use cosma_console::tui::App;
use cosma_console::{Catalog, Console};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Forwards formatted tracing output to the TUI log pane
#[derive(Clone)]
struct ChannelWriter {
    sender: Sender<String>,
}

impl io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(text) = String::from_utf8(buf.to_vec()) {
            let _ = self.sender.send(text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "COSMA space situational awareness console", long_about = None)]
struct Cli {
    /// Catalog JSON with satellites, alerts and risk events. Uses the builtin catalog if omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Console settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the clock refresh interval in milliseconds.
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Seed for the telemetry rate generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the initial console state as JSON and exit.
    #[arg(long)]
    snapshot: bool,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> cosma_console::Result<()> {
    let cli = Cli::parse();

    let log_rx = if cli.snapshot {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .compact()
            .with_writer(io::stderr)
            .init();
        None
    } else {
        let (log_tx, log_rx) = mpsc::channel::<String>();
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .compact()
            .with_ansi(false)
            .with_writer(move || ChannelWriter {
                sender: log_tx.clone(),
            })
            .init();
        Some(log_rx)
    };

    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConsoleConfig::default(),
    };
    if let Some(ms) = cli.tick_ms {
        config.tick_interval_ms = ms;
    }
    if cli.seed.is_some() {
        config.telemetry_seed = cli.seed;
    }
    config.validate().context("invalid console settings")?;

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_file(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };
    info!(
        satellites = catalog.satellites.len(),
        risks = catalog.risks.len(),
        "catalog loaded"
    );

    let console = Console::new(catalog, &config, chrono::Utc::now());

    if cli.snapshot {
        let json = console
            .snapshot()
            .to_json_pretty()
            .context("serializing snapshot")?;
        println!("{}", json);
        return Ok(());
    }

    let mut app = App::new(console, &config, Box::new(WallClock));
    if let Some(rx) = log_rx {
        app = app.with_log_receiver(rx);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    println!("{}", app.console.check_status());
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    info!("console online");
    while app.running {
        app.update();

        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}
