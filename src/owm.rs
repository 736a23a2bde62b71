use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::WxError;

pub const BASE_URL: &str = "https://api.openweathermap.org";
const WEATHER_PATH: &str = "data/2.5/weather";

pub mod current {
    use super::*;

    /// Subset of the `/data/2.5/weather` response the card needs.
    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct CurrentWeather {
        pub name: String,

        pub coord: Coord,

        pub main: Main,

        pub weather: Vec<Condition>,

        pub wind: Wind,
    }

    impl CurrentWeather {
        pub fn condition(&self) -> Result<&Condition, WxError> {
            self.weather.first().ok_or(WxError::Payload("weather"))
        }
    }

    #[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
    pub struct Coord {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
    pub struct Main {
        /// Kelvin, the provider's default unit.
        pub temp: f64,

        pub feels_like: f64,

        pub humidity: f64,
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Condition {
        pub id: i64,
        pub description: String,
    }

    #[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
    pub struct Wind {
        /// Metres per second.
        pub speed: f64,

        /// Omitted by the provider in calm conditions.
        #[serde(default)]
        pub deg: Option<f64>,
    }
}

use current::CurrentWeather;

/// Anything that can produce the current weather for a city name.
pub trait WeatherSource {
    fn fetch(&self, city: &str) -> Result<CurrentWeather, WxError>;
}

#[derive(Debug)]
pub struct OpenWeather {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeather {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, WxError> {
        let client = Client::builder()
            .user_agent(concat!("citywx/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn get_web_json(&self, city: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}/{WEATHER_PATH}", self.base_url);
        self.client
            .get(url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
    }
}

impl WeatherSource for OpenWeather {
    #[instrument(skip(self))]
    fn fetch(&self, city: &str) -> Result<CurrentWeather, WxError> {
        let response = self.get_web_json(city)?;
        let status = response.status();
        if !status.is_success() {
            return Err(WxError::Status {
                status,
                city: city.to_string(),
            });
        }
        let weather: CurrentWeather = response.json()?;
        weather.condition()?;
        debug!(name = %weather.name, code = weather.weather[0].id, "fetched current weather");
        Ok(weather)
    }
}
