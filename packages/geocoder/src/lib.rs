//! Geocoder - Convert postal addresses to coordinates and back.
//!
//! This crate is a thin blocking client for an XML geocoding service. A
//! lookup builds a request URL, opens the response as a stream and feeds
//! it to an event-driven XML parser that pulls out the service status,
//! the coordinates or the address components.
//!
//! # Example
//!
//! ```
//! use geocoder::extract::forward_policy;
//! use geocoder::xml::parse;
//!
//! let response = r#"<kml><Response>
//!   <Status><code>200</code></Status>
//!   <Placemark><Point><coordinates>37.4,-122.1</coordinates></Point></Placemark>
//! </Response></kml>"#;
//!
//! let mut location = None;
//! parse(response.as_bytes(), forward_policy(&mut location)).unwrap();
//! assert_eq!(location.map(|l| l.lat), Some(37.4));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, request URL construction and validation
//! - [`types`]: Core data types (`Address`, `LatLng`)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client and response streams
//! - [`xml`]: Streaming response parser and element-context stack
//! - [`extract`]: Forward and reverse extraction policies
//! - [`geocoder`]: The `Geocoder` trait and its service implementation
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod geocoder;
pub mod http;
pub mod types;
pub mod xml;

// Re-export commonly used items
pub use error::{ErrorKind, GeocoderError, Result};
pub use geocoder::{Geocoder, GoogleGeocoder};
pub use types::{Address, LatLng};
