//! Error types and handling for the weatherfeed application

use thiserror::Error;

/// Main error type for the weatherfeed application
#[derive(Error, Debug)]
pub enum FeedError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport failures (DNS, connect, read)
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// Non-success HTTP status
    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: u16 },

    /// The feed is not well-formed XML
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// A required attribute is absent from an element
    #[error("Element <{element}> is missing attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// A required element is absent from the document
    #[error("Feed has no <{element}> element")]
    MissingElement { element: String },

    /// Icon cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl FeedError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error for `url`
    pub fn network<U: Into<String>, S: Into<String>>(url: U, message: S) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn missing_attribute<E: Into<String>, A: Into<String>>(element: E, attribute: A) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    pub fn missing_element<E: Into<String>>(element: E) -> Self {
        Self::MissingElement {
            element: element.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FeedError::Config { message } => format!("Configuration error: {message}"),
            FeedError::Network { .. } | FeedError::Http { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            FeedError::Parse { .. }
            | FeedError::MissingAttribute { .. }
            | FeedError::MissingElement { .. } => {
                "The weather feed could not be understood. The feed format may have changed."
                    .to_string()
            }
            FeedError::Cache { .. } | FeedError::Io { .. } => {
                "Icon cache operation failed. Please check the images directory exists and is writable."
                    .to_string()
            }
        }
    }
}
