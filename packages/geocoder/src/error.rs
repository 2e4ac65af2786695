//! Error types for the geocoder.
//!
//! Every failure maps onto one of two lookup outcomes: the request or
//! response could not be transported and parsed, or the service answered
//! with a non-success status. See [`ErrorKind`].

use thiserror::Error;

/// Broad classification of a [`GeocoderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Opening the stream, reading it, or parsing its XML failed.
    TransportOrParse,
    /// The service reported a status other than the success code.
    ServiceStatus,
    /// Caller input was rejected before any request was made.
    InvalidInput,
}

/// Main error type for the geocoder library.
#[derive(Debug, Error)]
pub enum GeocoderError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error while reading the response stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// Element name or text was not valid UTF-8.
    #[error("XML encoding error: {0}")]
    XmlEncoding(String),

    /// Document ended while an element was still open.
    #[error("XML document ended inside unclosed element <{0}>")]
    UnclosedElement(String),

    /// Document contained no element at all.
    #[error("XML document has no root element")]
    NoRootElement,

    /// Element or text found outside the root element.
    #[error("Content outside the XML root element: {0}")]
    ContentOutsideRoot(String),

    /// Parser was used after an earlier failure.
    #[error("XML parsing was aborted by an earlier error")]
    ParseAborted,

    /// Coordinates text could not be split into two numbers.
    #[error("Invalid coordinates '{text}': {reason}")]
    InvalidCoordinates { text: String, reason: String },

    /// Missing required XML element.
    #[error("Missing required XML element: {0}")]
    MissingElement(String),

    /// Service answered with a non-success status code.
    #[error("Geocoder service returned status {0}")]
    ServiceStatus(String),

    /// Latitude outside [-90, 90].
    #[error("Invalid latitude: {0}. Expected a value between -90 and 90")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("Invalid longitude: {0}. Expected a value between -180 and 180")]
    InvalidLongitude(f64),
}

impl GeocoderError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ServiceStatus(_) => ErrorKind::ServiceStatus,
            Self::InvalidLatitude(_) | Self::InvalidLongitude(_) => ErrorKind::InvalidInput,
            Self::Http(_)
            | Self::Io(_)
            | Self::XmlParse(_)
            | Self::XmlEncoding(_)
            | Self::UnclosedElement(_)
            | Self::NoRootElement
            | Self::ContentOutsideRoot(_)
            | Self::ParseAborted
            | Self::InvalidCoordinates { .. }
            | Self::MissingElement(_) => ErrorKind::TransportOrParse,
        }
    }

    /// Status reported by the service, if this is a status failure.
    #[must_use]
    pub fn service_status(&self) -> Option<&str> {
        match self {
            Self::ServiceStatus(status) => Some(status),
            _ => None,
        }
    }
}

/// Result type alias for geocoder operations.
pub type Result<T> = std::result::Result<T, GeocoderError>;
