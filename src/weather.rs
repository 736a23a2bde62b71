use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{info, warn};

use crate::classify::direction::{direction_for, CompassArrow};
use crate::classify::icon::{icon_for, IconCategory};
use crate::error::{WxError, ENTER_CITY};
use crate::owm::current::CurrentWeather;
use crate::owm::WeatherSource;
use crate::units::temperature::Scale;

/// Display-ready card for one successful lookup.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub temp: i64,
    pub feels_like: i64,
    pub scale: Scale,
    pub wind_speed: f64,
    pub wind_direction: CompassArrow,
    pub humidity: f64,
    pub description: String,
    pub icon: IconCategory,
    pub fetched_at: DateTime<Local>,
}

impl WeatherView {
    pub fn from_current(
        current: &CurrentWeather,
        scale: Scale,
        fetched_at: DateTime<Local>,
    ) -> Result<Self, WxError> {
        let condition = current.condition()?;
        Ok(Self {
            city: current.name.clone(),
            lat: current.coord.lat,
            lon: current.coord.lon,
            temp: scale.kelvin_to(current.main.temp)?,
            feels_like: scale.kelvin_to(current.main.feels_like)?,
            scale,
            wind_speed: current.wind.speed,
            wind_direction: current
                .wind
                .deg
                .map_or(CompassArrow::Unknown, direction_for),
            humidity: current.main.humidity,
            description: condition.description.clone(),
            icon: icon_for(condition.id),
            fetched_at,
        })
    }

    pub fn location_line(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }

    pub fn temp_line(&self) -> String {
        format!("{}°", self.temp)
    }

    pub fn feels_like_line(&self) -> String {
        format!("Real Feel: {}°", self.feels_like)
    }

    pub fn wind_line(&self) -> String {
        format!(
            "Wind Speed: {} {:.2}m/s",
            self.wind_direction.arrow(),
            self.wind_speed
        )
    }

    pub fn humidity_line(&self) -> String {
        format!("Humidity: {:.0}%", self.humidity)
    }

    /// The card as plain text lines, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.city.clone(),
            self.location_line(),
            format!("{}{}", self.temp, self.scale.symbol()),
            self.feels_like_line(),
            self.wind_line(),
            self.humidity_line(),
            self.description.clone(),
            self.icon.emoji().to_string(),
        ]
    }
}

/// What the card area currently shows. Each submit replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Lookup {
    #[default]
    Idle,
    Loaded(WeatherView),
    Failed(String),
}

impl Lookup {
    pub fn view(&self) -> Option<&WeatherView> {
        match self {
            Lookup::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Lookup::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Run one lookup for the raw contents of the city input.
pub fn submit<S: WeatherSource + ?Sized>(source: &S, input: &str, scale: Scale) -> Lookup {
    let city = input.trim();
    if city.is_empty() {
        warn!("lookup submitted without a city");
        return Lookup::Failed(ENTER_CITY.to_string());
    }

    let result = source
        .fetch(city)
        .and_then(|current| WeatherView::from_current(&current, scale, Local::now()));
    match result {
        Ok(view) => {
            info!(city = %view.city, temp = view.temp, "weather updated");
            Lookup::Loaded(view)
        }
        Err(err) => {
            warn!(city, error = %err, "could not fetch weather");
            Lookup::Failed(err.user_message())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::FETCH_FAILED;
    use crate::owm::tests::miami;

    /// Serves canned payloads and records the cities it was asked for.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub(crate) responses: RefCell<Vec<Result<CurrentWeather, WxError>>>,
        pub(crate) requests: RefCell<Vec<String>>,
    }

    impl FakeSource {
        pub(crate) fn with(responses: Vec<Result<CurrentWeather, WxError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                requests: RefCell::default(),
            }
        }
    }

    impl WeatherSource for FakeSource {
        fn fetch(&self, city: &str) -> Result<CurrentWeather, WxError> {
            self.requests.borrow_mut().push(city.to_string());
            self.responses.borrow_mut().remove(0)
        }
    }

    pub(crate) fn miami_weather() -> CurrentWeather {
        serde_json::from_value(miami()).unwrap()
    }

    #[test]
    fn test_end_to_end_view() {
        let view = WeatherView::from_current(&miami_weather(), Scale::Fahrenheit, Local::now())
            .unwrap();
        assert_eq!(view.icon, IconCategory::Clear);
        assert_eq!(view.wind_direction, CompassArrow::SW);
        assert_eq!(view.temp, 90);
        assert_eq!(view.feels_like, 92);
        assert_eq!(view.city, "Miami");
        assert_eq!(view.description, "clear sky");
    }

    #[test]
    fn test_view_lines() {
        let view = WeatherView::from_current(&miami_weather(), Scale::Fahrenheit, Local::now())
            .unwrap();
        assert_eq!(view.location_line(), "25.7743, -80.1937");
        assert_eq!(view.temp_line(), "90°");
        assert_eq!(view.feels_like_line(), "Real Feel: 92°");
        assert_eq!(view.wind_line(), "Wind Speed: ↗ 3.09m/s");
        assert_eq!(view.humidity_line(), "Humidity: 75%");
        let lines = view.lines();
        assert_eq!(lines[2], "90°F");
        assert_eq!(lines.last().map(String::as_str), Some("☀️"));
    }

    #[test]
    fn test_gap_code_and_calm_wind() {
        let mut weather = miami_weather();
        weather.weather[0].id = 450;
        weather.wind.deg = None;
        let view = WeatherView::from_current(&weather, Scale::Celsius, Local::now()).unwrap();
        assert_eq!(view.icon, IconCategory::Unknown);
        assert_eq!(view.wind_direction, CompassArrow::Unknown);
        assert_eq!(view.temp, 32);
    }

    #[test]
    fn test_invalid_temperature_is_an_error() {
        let mut weather = miami_weather();
        weather.main.temp = f64::NAN;
        let err = WeatherView::from_current(&weather, Scale::Fahrenheit, Local::now());
        assert!(matches!(err, Err(WxError::Conversion(_))));
    }

    #[test]
    fn test_blank_input_skips_fetch() {
        let source = FakeSource::default();
        let lookup = submit(&source, "   ", Scale::Fahrenheit);
        assert_eq!(lookup.error(), Some(ENTER_CITY));
        assert!(source.requests.borrow().is_empty());
    }

    #[test]
    fn test_submit_trims_city() {
        let source = FakeSource::with(vec![Ok(miami_weather())]);
        let lookup = submit(&source, "  Miami ", Scale::Fahrenheit);
        assert_eq!(source.requests.borrow().as_slice(), ["Miami"]);
        assert_eq!(lookup.view().map(|v| v.temp), Some(90));
        assert_eq!(lookup.error(), None);
    }

    #[test]
    fn test_failure_collapses_to_generic_message() {
        let source = FakeSource::with(vec![Err(WxError::Payload("weather"))]);
        let lookup = submit(&source, "Miami", Scale::Fahrenheit);
        assert_eq!(lookup, Lookup::Failed(FETCH_FAILED.to_string()));
        assert!(lookup.view().is_none());
    }
}
