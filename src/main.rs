//! portwire CLI - terminal patchbay for the JACK audio server

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use portwire::app::{App, Command};
use portwire::graph::PortCategory;
use portwire::jack_server::JackServer;
use portwire::server::GraphServer;
use portwire::signal::ChangeSignal;
use portwire::ui;

#[derive(Parser)]
#[command(name = "portwire")]
#[command(about = "Terminal patchbay for the JACK audio server", long_about = None)]
struct Cli {
    /// Start on the audio category instead of MIDI
    #[arg(short, long)]
    audio: bool,

    /// JACK client name
    #[arg(long, default_value = "portwire")]
    client_name: String,

    /// Input wait in milliseconds; doubles as the status refresh tick
    #[arg(long, default_value = "1000")]
    tick_ms: u64,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("portwire: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The TUI owns stdout; logs go to stderr.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let category = if cli.audio {
        PortCategory::Audio
    } else {
        PortCategory::Midi
    };

    let signal = ChangeSignal::new();
    let server = JackServer::connect(&cli.client_name, signal.clone())?;
    let mut app = App::new(server, signal, category);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, Duration::from_millis(cli.tick_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// One blocking-input cycle per iteration: draw, wait with a bounded
/// timeout, dispatch, then let the app consume the change signal and run
/// any scheduled rebuild. The timeout keeps the DSP load display fresh
/// even without a keypress.
fn run_app<S: GraphServer>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.help_visible() {
                        // Any key dismisses the help overlay.
                        app.close_help();
                    } else if let Some(command) = map_key(key) {
                        app.apply(command);
                    }
                }
                Event::Resize(_, _) => app.apply(Command::Refresh),
                _ => {}
            }
        }

        app.tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Classic patchbay bindings, vi-style duplicates included.
fn map_key(key: KeyEvent) -> Option<Command> {
    let command = match key.code {
        KeyCode::Tab | KeyCode::Char('J') => Command::FocusNext,
        KeyCode::BackTab | KeyCode::Char('K') => Command::FocusPrevious,
        KeyCode::Char(' ') => Command::FocusConnections,
        KeyCode::Left | KeyCode::Char('h') => Command::FocusOutputs,
        KeyCode::Right | KeyCode::Char('l') => Command::FocusInputs,
        KeyCode::Down | KeyCode::Char('j') => Command::NextItem,
        KeyCode::Up | KeyCode::Char('k') => Command::PreviousItem,
        KeyCode::Home => Command::FirstItem,
        KeyCode::End => Command::LastItem,
        KeyCode::Char('a') => Command::SelectCategory(PortCategory::Audio),
        KeyCode::Char('m') => Command::SelectCategory(PortCategory::Midi),
        KeyCode::Char('c') | KeyCode::Enter => Command::Connect,
        KeyCode::Char('d') | KeyCode::Backspace => Command::Disconnect,
        KeyCode::Char('D') => Command::DisconnectAll,
        KeyCode::Char('r') => Command::Refresh,
        KeyCode::Char('?') | KeyCode::Char('H') => Command::Help,
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}
