use thiserror::Error;

use crate::units::temperature::ConversionError;

pub const ENTER_CITY: &str = "Please Enter a City";
pub const FETCH_FAILED: &str = "Could Not Fetch Weather";

#[derive(Error, Debug)]
pub enum WxError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather service returned {status} for {city:?}")]
    Status {
        status: reqwest::StatusCode,
        city: String,
    },

    #[error("incomplete weather payload: {0}")]
    Payload(&'static str),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("could not write config: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

impl WxError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// The message shown in place of the weather card.
    ///
    /// Lookup failures all collapse into one generic line; the detail is only
    /// logged.
    pub fn user_message(&self) -> String {
        match self {
            WxError::Config(message) => message.clone(),
            _ => FETCH_FAILED.to_string(),
        }
    }
}
