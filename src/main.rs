use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use std::{env, io};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod classify;
mod cli;
mod config;
mod error;
mod owm;
mod units;
mod weather;

use crate::app::{run_app, App};
use crate::cli::Args;
use crate::config::{Config, API_KEY_ENV};
use crate::error::{WxError, ENTER_CITY};
use crate::owm::OpenWeather;
use crate::units::temperature::Scale;
use crate::weather::submit;

fn init_logging(level: &str, to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let log_file = config::log_path().filter(|_| to_file).and_then(|path| {
        fs::create_dir_all(path.parent()?).ok()?;
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    match log_file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        // a TUI without a log file stays silent rather than drawing over the screen
        None if to_file => builder.with_writer(io::sink).init(),
        None => builder.with_writer(io::stderr).init(),
    }
}

fn remember_city(path: &Path, stored: &Config, city: Option<String>) {
    if city.is_none() || city == stored.last_city {
        return;
    }
    let updated = Config {
        last_city: city,
        ..stored.clone()
    };
    if let Err(err) = updated.save(path) {
        warn!(path = %path.display(), error = %err, "could not save last city");
    }
}

fn run_plain(
    args: &Args,
    source: &OpenWeather,
    scale: Scale,
    city: Option<String>,
) -> Result<Option<String>, WxError> {
    let Some(city) = city else {
        eprintln!("{ENTER_CITY}");
        return Ok(None);
    };
    let lookup = submit(source, &city, scale);
    if let Some(message) = lookup.error() {
        eprintln!("{message}");
        return Ok(None);
    }
    let Some(view) = lookup.view() else {
        return Ok(None);
    };

    if args.json {
        let json = serde_json::to_string_pretty(view).map_err(io::Error::from)?;
        println!("{json}");
    } else {
        for line in view.lines() {
            println!("{line}");
        }
    }
    Ok(Some(city.trim().to_string()))
}

fn run_tui(
    source: &OpenWeather,
    scale: Scale,
    city: Option<String>,
) -> Result<Option<String>, WxError> {
    let mut app = App::new(source, scale, city.unwrap_or_default());

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(app.last_city)
}

fn run(args: Args) -> Result<ExitCode, WxError> {
    let config_path = args
        .config
        .clone()
        .or_else(config::default_path)
        .ok_or_else(|| {
            WxError::config("Could not determine the config directory; pass --config.")
        })?;
    let stored = Config::load(&config_path)?;
    let config = stored
        .clone()
        .with_overrides(env::var(API_KEY_ENV).ok(), args.api_key.clone());

    init_logging(&config.log_level, !args.plain);
    info!(config = %config_path.display(), plain = args.plain, "starting");

    let scale = if args.celsius {
        Scale::Celsius
    } else {
        config.scale
    };
    let source = OpenWeather::new(&config.base_url, config.api_key()?, config.timeout())?;
    let city = args.city.clone().or_else(|| config.last_city.clone());

    let found = if args.plain {
        run_plain(&args, &source, scale, city)?
    } else {
        run_tui(&source, scale, city)?
    };

    let code = if args.plain && found.is_none() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    };
    remember_city(&config_path, &stored, found);
    Ok(code)
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("citywx: {err}");
            ExitCode::FAILURE
        }
    }
}
