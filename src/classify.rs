//! Total mappings from raw provider values to display categories.
//!
//! Both lookups are table driven. Every band, including the gaps, is a row in
//! a table so each boundary can be read and tested directly.

use serde::Serialize;

pub mod icon {
    use super::*;

    #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum IconCategory {
        Thunderstorm,
        Drizzle,
        Rain,
        Snow,
        Fog,
        Clear,
        Clouds,
        Unknown,
    }

    impl IconCategory {
        pub fn emoji(self) -> &'static str {
            match self {
                IconCategory::Thunderstorm => "⛈️",
                IconCategory::Drizzle => "🌦️",
                IconCategory::Rain => "🌧️",
                IconCategory::Snow => "❄️",
                IconCategory::Fog => "🌫️",
                IconCategory::Clear => "☀️",
                IconCategory::Clouds => "☁️",
                IconCategory::Unknown => "❓",
            }
        }
    }

    /// Half-open `[start, end)` condition code bands, in ascending order.
    const BANDS: [(i64, i64, IconCategory); 9] = [
        (i64::MIN, 200, IconCategory::Unknown),
        (200, 300, IconCategory::Thunderstorm),
        (300, 400, IconCategory::Drizzle),
        // the provider defines no 4xx group
        (400, 500, IconCategory::Unknown),
        (500, 600, IconCategory::Rain),
        (600, 700, IconCategory::Snow),
        (700, 800, IconCategory::Fog),
        (800, 801, IconCategory::Clear),
        (801, i64::MAX, IconCategory::Clouds),
    ];

    pub fn icon_for(code: i64) -> IconCategory {
        BANDS
            .iter()
            .find(|(start, end, _)| (*start..*end).contains(&code))
            // only i64::MAX escapes the last band
            .map_or(IconCategory::Clouds, |(_, _, icon)| *icon)
    }

}

pub mod direction {
    use super::*;

    #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum CompassArrow {
        N,
        NE,
        E,
        SE,
        S,
        SW,
        W,
        NW,
        Unknown,
    }

    impl CompassArrow {
        pub fn label(self) -> &'static str {
            match self {
                CompassArrow::N => "N",
                CompassArrow::NE => "NE",
                CompassArrow::E => "E",
                CompassArrow::SE => "SE",
                CompassArrow::S => "S",
                CompassArrow::SW => "SW",
                CompassArrow::W => "W",
                CompassArrow::NW => "NW",
                CompassArrow::Unknown => "?",
            }
        }

        /// Arrow pointing downwind, i.e. away from the bearing the wind comes from.
        pub fn arrow(self) -> &'static str {
            match self {
                CompassArrow::N => "↓",
                CompassArrow::NE => "↙",
                CompassArrow::E => "←",
                CompassArrow::SE => "↖",
                CompassArrow::S => "↑",
                CompassArrow::SW => "↗",
                CompassArrow::W => "→",
                CompassArrow::NW => "↘",
                CompassArrow::Unknown => "?",
            }
        }
    }

    /// Half-open `[start, end)` sectors in degrees. North straddles 0°.
    const SECTORS: [(f64, f64, CompassArrow); 9] = [
        (0.0, 22.5, CompassArrow::N),
        (22.5, 67.5, CompassArrow::NE),
        (67.5, 112.5, CompassArrow::E),
        (112.5, 157.5, CompassArrow::SE),
        (157.5, 202.5, CompassArrow::S),
        (202.5, 247.5, CompassArrow::SW),
        (247.5, 292.5, CompassArrow::W),
        (292.5, 337.5, CompassArrow::NW),
        (337.5, 360.0, CompassArrow::N),
    ];

    /// Reduce any finite bearing into `[0, 360)`.
    pub fn normalize(deg: f64) -> Option<f64> {
        if !deg.is_finite() {
            return None;
        }
        let deg = deg.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        Some(if deg >= 360.0 { 0.0 } else { deg })
    }

    pub fn direction_for(deg: f64) -> CompassArrow {
        let Some(deg) = normalize(deg) else {
            return CompassArrow::Unknown;
        };
        SECTORS
            .iter()
            .find(|(start, end, _)| (*start..*end).contains(&deg))
            .map_or(CompassArrow::Unknown, |(_, _, arrow)| *arrow)
    }

}
