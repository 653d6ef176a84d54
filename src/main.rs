//! Terminal lifecycle, event loop, and cleanup for the cheat.sh client; `relay` runs the proxy.

mod actions;
mod app;
mod backend;
mod cache;
mod config;
mod error;
mod events;
mod history;
mod relay;
mod selection;
mod services;
mod session;
mod state;
mod store;
mod suggest;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use app::App;
use backend::RelayClient;
use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_UPSTREAM};
use events::{key_to_action, TICK_RATE};
use store::FileStore;

#[derive(Parser, Debug)]
#[command(name = "cheatsh", version, about = "cheat.sh lookup client with autocomplete")]
struct Cli {
    /// Relay endpoint queried as `<endpoint>?q=<query>`
    #[arg(long, default_value = DEFAULT_ENDPOINT, env = "CHEATSH_ENDPOINT")]
    endpoint: String,

    /// Directory for history, theme and the command cache
    #[arg(long, env = "CHEATSH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the CORS relay in front of the text service
    Relay {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:8787", env = "LISTEN_ADDR")]
        addr: SocketAddr,

        /// Upstream text service base URL
        #[arg(long, default_value = DEFAULT_UPSTREAM, env = "CHEATSH_UPSTREAM")]
        upstream: String,
    },
}

fn env_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive("cheatsh_tui=info".parse()?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        Some(Command::Relay { addr, upstream }) => {
            tracing_subscriber::fmt().with_env_filter(env_filter()?).init();
            runtime.block_on(relay::serve(addr, &upstream))
        }
        None => {
            let config = ClientConfig::new(cli.endpoint, cli.data_dir);
            init_file_logging(&config)?;
            let _guard = runtime.enter();
            run_tui(&config, runtime.handle().clone())
        }
    }
}

/// The TUI owns stdout, so logs go to a file in the data directory.
fn init_file_logging(config: &ClientConfig) -> Result<()> {
    fs::create_dir_all(&config.data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn run_tui(config: &ClientConfig, runtime: tokio::runtime::Handle) -> Result<()> {
    let client = RelayClient::new(config.endpoint.clone())?;
    let store = FileStore::open(config.store_path());
    let mut app = App::new(client, Box::new(store), runtime);
    app.bootstrap();

    // Set up the terminal in raw / alternate-screen mode.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.show_cursor()?;

    let result = run_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick = app.tick.wrapping_add(1);
        app.poll_results();

        if app.should_quit {
            return Ok(());
        }

        let tick = app.tick;
        terminal.draw(|frame| {
            app.state.results.set_viewport(ui::results_viewport(frame.area()));
            ui::render(frame, app, tick);
        })?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if let Some(a) = key_to_action(&key, app.selection.is_visible()) {
                    app.dispatch(a);
                    if app.should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
