//! Geocoder service: forward and reverse lookups against the mapping service.

use std::fmt;

use reqwest::blocking::Client;

use crate::config::{geocode_url, reverse_url, COORDINATES_ELEMENT, GEOCODER_URL};
use crate::error::{GeocoderError, Result};
use crate::extract::{forward_policy, reverse_policy};
use crate::http::{create_client, open_stream};
use crate::types::{Address, LatLng};
use crate::xml::parse;

/// Converts between postal addresses and coordinates.
pub trait Geocoder {
    /// Forward lookup: address to coordinates.
    fn geocode(&self, address: &Address) -> Result<LatLng>;

    /// Reverse lookup: coordinates to address.
    fn revert(&self, location: &LatLng) -> Result<Address>;
}

/// Geocoder backed by the Google Maps XML geocoding endpoint.
///
/// Each lookup opens one response stream and parses it to completion.
/// No state is shared between lookups.
pub struct GoogleGeocoder {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GoogleGeocoder {
    /// Create a geocoder for the default service endpoint.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            api_key: None,
            base_url: GEOCODER_URL.to_string(),
        })
    }

    /// Use a different service endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API key at construction.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for GoogleGeocoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &Address) -> Result<LatLng> {
        let url = geocode_url(&self.base_url, address, self.api_key());
        tracing::info!(address = %address, "Forward lookup");

        let mut location = None;
        parse(open_stream(&self.client, &url)?, forward_policy(&mut location))?;

        location.ok_or_else(|| GeocoderError::MissingElement(COORDINATES_ELEMENT.to_string()))
    }

    fn revert(&self, location: &LatLng) -> Result<Address> {
        let url = reverse_url(&self.base_url, location, self.api_key());
        tracing::info!(location = %location, "Reverse lookup");

        let mut address = Address::new();
        parse(open_stream(&self.client, &url)?, reverse_policy(&mut address))?;

        Ok(address)
    }
}
