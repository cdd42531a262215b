#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use santri::backend::RestBackend;
use santri::config::{default_config_path, load_config};
use santri::intake::HttpIntake;
use santri::storage::{ReceiptStore, data_dir};
use santri::tui::App;

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&default_config_path()?)?;
    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;

    let dir = data_dir()?;
    let log_path = santri::logging::init(&dir)?;
    info!(log = %log_path.display(), "starting");

    let intake = HttpIntake::new(
        &config.intake_url,
        config.webhooks.clone(),
        config.request_timeout(),
    )?;
    if !intake.is_configured() {
        warn!("no intake URL configured; submissions will fail");
    }
    let backend = RestBackend::new(
        &config.backend.url,
        &config.backend.anon_key,
        config.request_timeout(),
    )?;
    if !backend.is_configured() {
        warn!("no backend URL configured; sign-in is unavailable");
    }
    let receipts = ReceiptStore::new(&dir)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = App::new(intake, backend, receipts).and_then(|mut app| app.run(&mut terminal));

    let restore_result = restore_terminal();
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
