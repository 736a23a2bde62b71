pub mod temperature {
    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    /// Offset between the Kelvin and Celsius scales.
    pub const KELVIN_OFFSET: f64 = 273.15;

    #[derive(Error, Debug, Clone, Copy, PartialEq)]
    pub enum ConversionError {
        #[error("invalid temperature {0} K: not a finite value at or above absolute zero, or too large to display")]
        InvalidInput(f64),
    }

    /// Scale a temperature is shown in.
    #[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Scale {
        #[default]
        Fahrenheit,
        Celsius,
    }

    impl Scale {
        /// Convert an absolute temperature to whole degrees on this scale.
        ///
        /// Rounds half away from zero, so 80.5 shows as 81 and -0.5 as -1.
        pub fn kelvin_to(self, kelvin: f64) -> Result<i64, ConversionError> {
            match self {
                Scale::Fahrenheit => to_display_scale(kelvin),
                Scale::Celsius => {
                    round_half_away(k2c(kelvin)?).ok_or(ConversionError::InvalidInput(kelvin))
                }
            }
        }

        pub fn symbol(self) -> &'static str {
            match self {
                Scale::Fahrenheit => "°F",
                Scale::Celsius => "°C",
            }
        }
    }

    /// Kelvin to whole degrees Fahrenheit, the default display scale.
    pub fn to_display_scale(kelvin: f64) -> Result<i64, ConversionError> {
        round_half_away(c2f(k2c(kelvin)?)).ok_or(ConversionError::InvalidInput(kelvin))
    }

    pub fn k2c(temp_k: f64) -> Result<f64, ConversionError> {
        if !temp_k.is_finite() || temp_k < 0.0 {
            return Err(ConversionError::InvalidInput(temp_k));
        }
        Ok(temp_k - KELVIN_OFFSET)
    }

    pub fn c2f(temp_c: f64) -> f64 {
        temp_c * 9.0 / 5.0 + 32.0
    }

    /// 2^63, the first value past `i64::MAX` that `f64` can represent.
    const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

    /// Round to whole degrees, or `None` when the result does not fit an `i64`.
    pub fn round_half_away(value: f64) -> Option<i64> {
        // f64::round already breaks ties away from zero
        let rounded = value.round();
        if rounded.is_finite() && (-I64_LIMIT..I64_LIMIT).contains(&rounded) {
            Some(rounded as i64)
        } else {
            None
        }
    }

}
