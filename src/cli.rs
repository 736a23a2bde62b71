use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Current weather for a city, in the terminal";

const LONG_ABOUT: &str = "
TUI for looking up the current weather of a city, sourced from OpenWeatherMap.

Type a city name and press Enter to fetch temperature, real feel, wind, humidity and conditions.
Press Esc to quit.

An OpenWeatherMap API key is required. It is read from the config file, the OPENWEATHER_API_KEY
environment variable, or --api-key, in increasing order of precedence.

The last city looked up is saved, so subsequent runs of `citywx` start with it unless another city
is given.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "City to look up (e.g. Miami, \"New York\", Paris,FR)")]
    pub city: Option<String>,

    #[arg(long, help = "Print the weather card once and exit instead of opening the TUI")]
    pub plain: bool,

    #[arg(long, requires = "plain", help = "With --plain, print the card as JSON")]
    pub json: bool,

    #[arg(long, help = "Show temperatures in Celsius")]
    pub celsius: bool,

    #[arg(long, value_name = "KEY", help = "OpenWeatherMap API key")]
    pub api_key: Option<String>,

    #[arg(long, value_name = "PATH", help = "Config file to use instead of the default location")]
    pub config: Option<PathBuf>,
}
