//! Error types and handling for the wetbulb application

use thiserror::Error;

/// Main error type for the wetbulb application
#[derive(Error, Debug)]
pub enum WetBulbError {
    /// Weather provider could not resolve a city (network, status or payload)
    #[error("Failed to fetch weather data for {city}: {message}")]
    FetchFailed { city: String, message: String },

    /// City is already tracked by the dataset
    #[error("{city} is already in the graph")]
    AlreadyPresent { city: String },

    /// City is not tracked by the dataset
    #[error("{city} is not in the graph")]
    NotPresent { city: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Plot rendering errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WetBulbError {
    /// Create a new fetch failure for a city
    pub fn fetch_failed<C: Into<String>, S: Into<String>>(city: C, message: S) -> Self {
        Self::FetchFailed {
            city: city.into(),
            message: message.into(),
        }
    }

    pub fn already_present<C: Into<String>>(city: C) -> Self {
        Self::AlreadyPresent { city: city.into() }
    }

    pub fn not_present<C: Into<String>>(city: C) -> Self {
        Self::NotPresent { city: city.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Name of the city this error concerns, if any
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        match self {
            WetBulbError::FetchFailed { city, .. }
            | WetBulbError::AlreadyPresent { city }
            | WetBulbError::NotPresent { city } => Some(city),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WetBulbError::FetchFailed { city, message } => {
                format!("Failed to fetch weather data for {city}: {message}. Try again.")
            }
            WetBulbError::AlreadyPresent { city } => format!("{city} is already in the graph."),
            WetBulbError::NotPresent { city } => format!("{city} is not in the graph."),
            WetBulbError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file and API key.")
            }
            WetBulbError::Validation { message } => format!("Invalid input: {message}"),
            WetBulbError::Render { .. } => {
                "Unable to render the plot. Please check the output path.".to_string()
            }
            WetBulbError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
