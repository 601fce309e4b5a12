#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use haulog::api::ApiClient;
use haulog::config::Config;
use haulog::geo::Geocoder;
use haulog::tui::{App, Worker};

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let api = ApiClient::new(&config.api_base_url)?;
    let geocoder = Geocoder::new(&config.geocoder_url)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let (tx, rx) = mpsc::channel();
    let worker = Worker::new(runtime.handle().clone(), api, geocoder, tx);
    let mut app = App::new();
    let result = app.run(&mut terminal, &worker, &rx);

    let restore_result = restore_terminal();
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

/// Routes tracing output to a file under the XDG state directory.
///
/// The terminal itself belongs to ratatui, so diagnostics must not touch
/// stdout or stderr while the app is running.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn init_tracing() -> Result<(), io::Error> {
    let base = dirs::state_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("haulog");
    std::fs::create_dir_all(&base)?;
    let log_file = std::fs::File::create(base.join("haulog.log"))?;

    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .init();
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
