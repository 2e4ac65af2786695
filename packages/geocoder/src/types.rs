//! Core data types for the geocoder.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A postal location. Every component is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Country (the service reports an ISO country code).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// State or administrative region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Town or locality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,

    /// Street / thoroughfare.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    /// Create an empty address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_town(mut self, town: impl Into<String>) -> Self {
        self.town = Some(town.into());
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Check whether no component is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().next().is_none()
    }

    /// Present components, most specific first.
    fn components(&self) -> impl Iterator<Item = &str> + '_ {
        [
            &self.address,
            &self.postal_code,
            &self.town,
            &self.state,
            &self.country,
        ]
        .into_iter()
        .filter_map(|c| c.as_deref())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.components().collect();
        f.write_str(&parts.join(", "))
    }
}

/// Latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_builder() {
        let address = Address::new()
            .with_country("NL")
            .with_town("Den Haag")
            .with_postal_code("2511 CV");

        assert_eq!(address.country.as_deref(), Some("NL"));
        assert_eq!(address.town.as_deref(), Some("Den Haag"));
        assert_eq!(address.postal_code.as_deref(), Some("2511 CV"));
        assert!(address.state.is_none());
        assert!(!address.is_empty());
    }

    #[test]
    fn test_address_display() {
        let address = Address::new()
            .with_address("Lange Voorhout")
            .with_town("Den Haag")
            .with_country("NL");
        assert_eq!(address.to_string(), "Lange Voorhout, Den Haag, NL");
        assert_eq!(Address::new().to_string(), "");
        assert!(Address::new().is_empty());
    }

    #[test]
    fn test_address_serialization_skips_missing() {
        let json = serde_json::to_string(&Address::new().with_country("US")).unwrap();
        assert_eq!(json, r#"{"country":"US"}"#);
    }

    #[test]
    fn test_latlng_display() {
        assert_eq!(LatLng::new(37.4, -122.1).to_string(), "37.4,-122.1");
    }
}
