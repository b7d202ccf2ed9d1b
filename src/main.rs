//! `SlideText` - show selected text as full-screen terminal slides.

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::{panic, time::Duration};

use slidetext::app::App;
use slidetext::config::{self, Config};
use slidetext::constants::ui::EVENT_POLL_MS;
use slidetext::services::{ClipboardWatcher, SystemClipboard, TextSource};
use slidetext::settings::SettingsStore;
use slidetext::{logging, ui};

/// Show text as full-screen slides split on delimiter characters.
#[derive(Debug, Parser)]
#[command(name = "slidetext", version, about)]
struct Cli {
    /// File to show; `-` reads standard input
    file: Option<PathBuf>,

    /// Show this text instead of a file
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Start with the current clipboard text
    #[arg(long, short = 'c', conflicts_with_all = ["file", "text"])]
    clipboard: bool,

    /// Open every new clipboard text as slides while running
    #[arg(long, short = 'w')]
    watch: bool,

    /// Settings file to use
    #[arg(long, value_name = "PATH")]
    settings: Option<String>,

    /// Clipboard poll interval for --watch, in milliseconds
    #[arg(long, value_name = "MS")]
    poll_ms: Option<String>,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) -> slidetext::Result<()> {
        if let Some(path) = &self.settings {
            config.settings_path = config::expand_path(path);
        }
        if let Some(ms) = &self.poll_ms {
            config.poll_interval = config::parse_poll_interval(ms)?;
        }
        Ok(())
    }

    /// Text handed over at launch, if any.
    fn initial_text(&self) -> anyhow::Result<Option<String>> {
        if let Some(text) = &self.text {
            return Ok(Some(text.clone()));
        }
        if self.clipboard {
            let text = SystemClipboard::new()
                .and_then(|mut c| c.read_text())
                .context("reading clipboard")?;
            return Ok(Some(text.unwrap_or_default()));
        }
        match &self.file {
            Some(path) if path.as_os_str() == "-" => read_stdin().map(Some),
            Some(path) => fs_err::read_to_string(path).map(Some).context("reading input file"),
            None if !io::stdin().is_terminal() => read_stdin().map(Some),
            None => Ok(None),
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text).context("reading standard input")?;
    Ok(text)
}

// Helper function to ensure the terminal is cleaned up on exit
fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> slidetext::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    cli.apply_to(&mut config)?;
    if let Err(e) = logging::init(&config) {
        eprintln!("Logging disabled: {e}");
    }

    let initial_text = cli.initial_text()?;

    // A broken settings file must not keep the slides from showing.
    let store = SettingsStore::open(&config.settings_path).unwrap_or_else(|e| {
        tracing::warn!("Using default settings: {e}");
        SettingsStore::with_defaults(&config.settings_path)
    });

    // Setup panic handling that cleans up the terminal first
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Setup terminal; keys are read from the tty even when stdin carried the text
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(&config, store, initial_text);
    if cli.watch {
        let _watcher = ClipboardWatcher::spawn(SystemClipboard::new, app.async_task_tx.clone(), config.poll_interval);
    }
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    if let Err(e) = cleanup_terminal(&mut terminal) {
        eprintln!("Error cleaning up terminal: {e:?}");
    }

    if let Err(err) = res {
        tracing::error!("{err}");
        eprintln!("{err:?}");
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> slidetext::Result<()> {
    loop {
        app.handle_updates();

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                event::Event::Key(key) => app.handle_key(key),
                event::Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        } else {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
